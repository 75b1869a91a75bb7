//! Main application state and UI coordination

use anyhow::Context;
use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::export::{ExportFile, Exporter};
use crate::core::state::{Command, EditorState, Effect, Theme};
use crate::core::storage::NoteStorage;
use crate::ui::{editor::EditorPanel, preview::PreviewPanel, sidebar::Sidebar, toolbar::Toolbar};

/// Main application state
pub struct NotesApp {
    /// Buffer, saved notes and selection
    state: EditorState,
    /// Persistence for the note collection
    storage: NoteStorage,
    /// Where exported documents go
    exporter: Box<dyn Exporter>,
    /// Application configuration
    config: AppConfig,
    /// Commonmark cache for preview
    commonmark_cache: egui_commonmark::CommonMarkCache,
    /// Theme currently pushed into egui visuals
    applied_theme: Option<Theme>,
}

impl NotesApp {
    /// Create a new application instance, loading saved notes
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });
        let store = config.note_store()?;
        tracing::info!("Notes stored in {}", store.dir().display());
        let storage = NoteStorage::new(store);
        let exporter = config.exporter();
        Self::with_parts(config, storage, exporter)
    }

    /// Assemble the app from already constructed collaborators
    pub fn with_parts(
        config: AppConfig,
        storage: NoteStorage,
        exporter: Box<dyn Exporter>,
    ) -> anyhow::Result<Self> {
        let state = EditorState::hydrate(&storage, config.initial_theme())
            .context("Failed to load saved notes")?;

        Ok(Self {
            state,
            storage,
            exporter,
            config,
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            applied_theme: None,
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Run one command and carry out its side effect
    pub fn dispatch(&mut self, command: Command) {
        match self.state.update(command, &mut self.storage) {
            Ok(Effect::None) => {}
            Ok(Effect::Export(file)) => self.export(&file),
            Err(e) => tracing::error!("Command failed: {}", e),
        }
    }

    fn export(&self, file: &ExportFile) {
        match self.exporter.deliver(file) {
            Ok(Some(path)) => {
                tracing::info!("Downloaded {} ({})", path.display(), file.media_type)
            }
            Ok(None) => tracing::debug!("Export cancelled"),
            Err(e) => tracing::error!("Export failed: {}", e),
        }
    }

    /// Push the theme flag into egui when it changed
    fn apply_theme(&mut self, ctx: &egui::Context) {
        let theme = self.state.theme();
        if self.applied_theme == Some(theme) {
            return;
        }
        ctx.set_visuals(if theme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.applied_theme = Some(theme);
    }

    /// Dispatch everything one frame produced. Edits go first so a save
    /// in the same frame stores the text the user sees.
    pub fn dispatch_frame(&mut self, mut commands: Vec<Command>) {
        commands.sort_by_key(|command| !matches!(command, Command::Edit(_)));
        for command in commands {
            self.dispatch(command);
        }
    }
}

/// Map the frame's key presses to commands
pub fn shortcut_commands(events: &[egui::Event]) -> Vec<Command> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } if modifiers.ctrl => match (key, modifiers.shift) {
                (egui::Key::S, false) => Some(Command::Save),
                (egui::Key::E, true) => Some(Command::Export),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

impl eframe::App for NotesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        let mut commands = ctx.input(|i| shortcut_commands(&i.events));

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            Toolbar::show(ui, self.state.theme(), &mut commands);
            ui.add_space(4.0);
        });

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(self.config.ui.sidebar_width)
            .min_width(150.0)
            .show(ctx, |ui| {
                Sidebar::show(ui, &self.state, &mut commands);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                EditorPanel::show(
                    &mut columns[0],
                    self.state.buffer(),
                    &self.config.editor,
                    &mut commands,
                );
                PreviewPanel::show(
                    &mut columns[1],
                    &mut self.commonmark_cache,
                    self.state.buffer(),
                    self.state.theme(),
                );
            });
        });

        self.dispatch_frame(commands);
    }
}
