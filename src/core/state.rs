//! Editor state and the commands that change it
//!
//! Every user event becomes a [`Command`] dispatched through
//! [`EditorState::update`]. The UI never mutates the state directly.

use thiserror::Error;

use super::export::ExportFile;
use super::storage::{NoteStorage, StorageError};

/// Buffer contents before anything is loaded or typed
pub const PLACEHOLDER: &str = "# Welcome to Markdown Editor\n\nStart editing...";

/// Light or dark presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// A user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The editable surface reported new text
    Edit(String),
    Save,
    Select(usize),
    Delete(usize),
    ToggleTheme,
    Export,
}

/// Side effect the shell must carry out after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Export(ExportFile),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no note at index {index} (collection has {len})")]
    NoSuchNote { index: usize, len: usize },
    #[error("note change kept in memory but not persisted: {0}")]
    Storage(#[from] StorageError),
}

/// Document buffer, saved notes and the active selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    buffer: String,
    notes: Vec<String>,
    selection: Option<usize>,
    theme: Theme,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Vec::new(), Theme::default())
    }
}

impl EditorState {
    /// Fresh session over an already hydrated collection
    pub fn new(notes: Vec<String>, theme: Theme) -> Self {
        Self {
            buffer: PLACEHOLDER.to_string(),
            notes,
            selection: None,
            theme,
        }
    }

    /// Load the collection from storage and start a session over it
    pub fn hydrate(storage: &NoteStorage, theme: Theme) -> Result<Self, StorageError> {
        Ok(Self::new(storage.hydrate()?, theme))
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply one command. Collection changes are written through `storage`.
    pub fn update(
        &mut self,
        command: Command,
        storage: &mut NoteStorage,
    ) -> Result<Effect, CommandError> {
        tracing::debug!(?command, "Dispatching command");
        match command {
            Command::Edit(text) => {
                self.buffer = text;
            }
            Command::Save => {
                self.save();
                storage.persist(&self.notes)?;
            }
            Command::Select(index) => {
                self.select(index)?;
            }
            Command::Delete(index) => {
                self.delete(index)?;
                storage.persist(&self.notes)?;
            }
            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
            }
            Command::Export => {
                return Ok(Effect::Export(ExportFile::from_buffer(&self.buffer)));
            }
        }
        Ok(Effect::None)
    }

    fn save(&mut self) {
        match self.selection {
            Some(index) => self.notes[index] = self.buffer.clone(),
            None => {
                self.notes.push(self.buffer.clone());
                self.selection = Some(self.notes.len() - 1);
            }
        }
    }

    fn select(&mut self, index: usize) -> Result<(), CommandError> {
        let note = self.note(index)?.to_string();
        self.selection = Some(index);
        self.buffer = note;
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<(), CommandError> {
        self.note(index)?;
        self.notes.remove(index);

        match self.selection {
            Some(selected) if selected == index => match self.notes.last() {
                Some(last) => {
                    self.buffer = last.clone();
                    self.selection = Some(self.notes.len() - 1);
                }
                None => {
                    self.buffer.clear();
                    self.selection = None;
                }
            },
            // Follow the selected note as it shifts down.
            Some(selected) if selected > index => self.selection = Some(selected - 1),
            _ => {}
        }
        Ok(())
    }

    fn note(&self, index: usize) -> Result<&str, CommandError> {
        self.notes
            .get(index)
            .map(String::as_str)
            .ok_or(CommandError::NoSuchNote {
                index,
                len: self.notes.len(),
            })
    }
}
