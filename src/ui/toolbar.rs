//! Top bar with the theme toggle and export button

use eframe::egui;

use crate::core::export::EXPORT_FILE_NAME;
use crate::core::state::{Command, Theme};

/// Title bar with theme and download buttons
pub struct Toolbar;

impl Toolbar {
    /// Show the toolbar, queueing any triggered commands
    pub fn show(ui: &mut egui::Ui, theme: Theme, commands: &mut Vec<Command>) {
        ui.horizontal(|ui| {
            ui.heading("Markdown Editor & README Generator");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!("Download {EXPORT_FILE_NAME}"))
                    .on_hover_text("Ctrl+Shift+E")
                    .clicked()
                {
                    commands.push(Command::Export);
                }
                if ui.button(theme_button_label(theme)).clicked() {
                    commands.push(Command::ToggleTheme);
                }
            });
        });
    }
}

/// The toggle names the theme it switches to
pub fn theme_button_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "Dark Mode",
        Theme::Dark => "Light Mode",
    }
}
