//! Exporting the document buffer as a downloadable markdown file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use thiserror::Error;

/// File name every export is offered under
pub const EXPORT_FILE_NAME: &str = "README.md";
/// Media type of exported files
pub const EXPORT_MEDIA_TYPE: &str = "text/markdown";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file ready to hand to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub contents: Vec<u8>,
}

impl ExportFile {
    /// Snapshot the buffer, byte for byte
    pub fn from_buffer(buffer: &str) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            media_type: EXPORT_MEDIA_TYPE,
            contents: buffer.as_bytes().to_vec(),
        }
    }
}

/// Delivers an export to the user's environment
pub trait Exporter {
    /// Returns where the file ended up, `None` if the user cancelled
    fn deliver(&self, file: &ExportFile) -> Result<Option<PathBuf>, ExportError>;
}

/// Writes exports straight into a directory, like a browser download
#[derive(Debug, Clone)]
pub struct DownloadsExporter {
    dir: PathBuf,
}

impl DownloadsExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's Downloads directory, or the current directory
    pub fn user_downloads() -> Self {
        let dir = UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
        Self::new(dir)
    }
}

impl Exporter for DownloadsExporter {
    fn deliver(&self, file: &ExportFile) -> Result<Option<PathBuf>, ExportError> {
        let path = self.dir.join(file.file_name);
        write_file(&path, &file.contents)?;
        Ok(Some(path))
    }
}

/// Asks for a destination with a native save dialog
#[derive(Debug, Clone, Default)]
pub struct DialogExporter;

impl Exporter for DialogExporter {
    fn deliver(&self, file: &ExportFile) -> Result<Option<PathBuf>, ExportError> {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(file.file_name)
            .add_filter("Markdown", &["md", "markdown"])
            .save_file()
        else {
            return Ok(None);
        };
        write_file(&path, &file.contents)?;
        Ok(Some(path))
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Exported {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_metadata() {
        let file = ExportFile::from_buffer("# Title");
        assert_eq!(file.file_name, "README.md");
        assert_eq!(file.media_type, "text/markdown");
    }

    #[test]
    fn test_export_contents_match_buffer() {
        for buffer in ["X", "", "héllo wörld \u{1F980}\r\n\ttabs"] {
            let file = ExportFile::from_buffer(buffer);
            assert_eq!(file.contents, buffer.as_bytes());
        }
    }

    #[test]
    fn test_downloads_exporter_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DownloadsExporter::new(dir.path());
        let buffer = "# Ünïcode\n\nbody";

        let path = exporter
            .deliver(&ExportFile::from_buffer(buffer))
            .unwrap()
            .unwrap();

        assert_eq!(path, dir.path().join("README.md"));
        assert_eq!(fs::read(&path).unwrap(), buffer.as_bytes());
    }

    #[test]
    fn test_downloads_exporter_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DownloadsExporter::new(dir.path());

        exporter.deliver(&ExportFile::from_buffer("old")).unwrap();
        exporter.deliver(&ExportFile::from_buffer("")).unwrap();

        assert_eq!(fs::read(dir.path().join("README.md")).unwrap(), b"");
    }

    #[test]
    fn test_downloads_exporter_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DownloadsExporter::new(dir.path().join("missing"));

        let err = exporter.deliver(&ExportFile::from_buffer("x")).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
