//! Key-value persistence for the note collection

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

/// Key under which the note collection is stored
pub const NOTES_KEY: &str = "notes";

/// Errors raised while reading or writing stored notes
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("stored value for key `{key}` is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not serialize notes: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A string key-value store, in the shape of browser local storage
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Store keeping one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory
    pub fn from_project_dirs() -> anyhow::Result<Self> {
        let dirs = ProjectDirs::from("com", "mdnotes", "MdNotes")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::new(dirs.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Replace in one step so a crash never leaves a truncated value.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }
}

/// In-memory store, nothing survives the process
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Bridge between the in-memory note collection and a key-value store
pub struct NoteStorage {
    store: Box<dyn KeyValueStore>,
}

impl NoteStorage {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Read the stored collection. A missing key means no notes yet.
    pub fn hydrate(&self) -> Result<Vec<String>, StorageError> {
        let Some(raw) = self.store.get(NOTES_KEY)? else {
            tracing::debug!("No stored notes found");
            return Ok(Vec::new());
        };
        let notes = decode_notes(&raw)?;
        tracing::info!("Loaded {} notes from storage", notes.len());
        Ok(notes)
    }

    /// Write the whole collection back
    pub fn persist(&mut self, notes: &[String]) -> Result<(), StorageError> {
        let raw = encode_notes(notes)?;
        self.store.set(NOTES_KEY, &raw)?;
        tracing::info!("Persisted {} notes", notes.len());
        Ok(())
    }
}

/// Serialize a collection as a JSON array of strings
pub fn encode_notes(notes: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(notes).map_err(StorageError::Serialize)
}

/// Parse a JSON array of strings
pub fn decode_notes(raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw).map_err(|source| StorageError::Malformed {
        key: NOTES_KEY.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_order() {
        let notes = vec![
            "# First".to_string(),
            String::new(),
            "ünïcødé \u{1F4DD}".to_string(),
            "line\nbreak \"quoted\"".to_string(),
        ];
        let raw = encode_notes(&notes).unwrap();
        assert_eq!(decode_notes(&raw).unwrap(), notes);
    }

    #[test]
    fn test_stored_format_is_string_array() {
        let raw = encode_notes(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(raw, r#"["a","b"]"#);
    }

    #[test]
    fn test_hydrate_missing_key_is_empty() {
        let storage = NoteStorage::new(MemoryStore::default());
        assert!(storage.hydrate().unwrap().is_empty());
    }

    #[test]
    fn test_hydrate_malformed_value_errors() {
        let mut store = MemoryStore::default();
        store.set(NOTES_KEY, "{not json").unwrap();
        let storage = NoteStorage::new(store);

        let err = storage.hydrate().unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
    }

    #[test]
    fn test_hydrate_wrong_shape_errors() {
        let mut store = MemoryStore::default();
        store.set(NOTES_KEY, "[1, 2, 3]").unwrap();
        let storage = NoteStorage::new(store);

        assert!(matches!(
            storage.hydrate(),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let notes = vec!["one".to_string(), "two".to_string()];

        let mut storage = NoteStorage::new(FileStore::new(dir.path().join("data")));
        storage.persist(&notes).unwrap();

        let reopened = NoteStorage::new(FileStore::new(dir.path().join("data")));
        assert_eq!(reopened.hydrate().unwrap(), notes);
        assert!(dir.path().join("data").join("notes.json").exists());
    }

    #[test]
    fn test_file_store_replaces_value_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set(NOTES_KEY, r#"["old","longer value"]"#).unwrap();
        store.set(NOTES_KEY, r#"["new"]"#).unwrap();

        assert_eq!(
            store.get(NOTES_KEY).unwrap().as_deref(),
            Some(r#"["new"]"#)
        );
        assert!(!dir.path().join("notes.json.tmp").exists());
    }

    #[test]
    fn test_file_store_ignores_stale_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.json.tmp"), "[\"trunc").unwrap();
        let mut store = FileStore::new(dir.path());

        store.set(NOTES_KEY, r#"["ok"]"#).unwrap();

        let storage = NoteStorage::new(store);
        assert_eq!(storage.hydrate().unwrap(), vec!["ok".to_string()]);
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get(NOTES_KEY).unwrap(), None);
    }
}
