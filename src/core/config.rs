//! Application configuration management

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::export::{DialogExporter, DownloadsExporter, Exporter};
use super::state::Theme;
use super::storage::FileStore;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the note store (platform data dir when unset)
    pub storage_dir: Option<PathBuf>,
    /// Export settings
    pub export: ExportConfig,
    /// Editor settings
    pub editor: EditorConfig,
    /// UI settings
    pub ui: UiConfig,
}

/// Export settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Ask for a destination instead of writing to Downloads
    pub ask_location: bool,
}

/// Editor-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in pixels
    pub font_size: f32,
    /// Minimum visible rows in the editor
    pub desired_rows: usize,
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Start the session in dark mode
    pub dark_mode: bool,
    /// Sidebar width
    pub sidebar_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            desired_rows: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            sidebar_width: 256.0,
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "mdnotes", "MdNotes")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Theme the session starts with
    pub fn initial_theme(&self) -> Theme {
        if self.ui.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Key-value store backing the note collection
    pub fn note_store(&self) -> Result<FileStore> {
        match &self.storage_dir {
            Some(dir) => Ok(FileStore::new(dir)),
            None => FileStore::from_project_dirs(),
        }
    }

    /// Destination for exported documents
    pub fn exporter(&self) -> Box<dyn Exporter> {
        if self.export.ask_location {
            Box::new(DialogExporter)
        } else {
            Box::new(DownloadsExporter::user_downloads())
        }
    }
}
