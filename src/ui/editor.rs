//! Markdown editor panel

use eframe::egui;

use crate::core::config::EditorConfig;
use crate::core::state::Command;

/// Editable surface over the document buffer
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel. Any edit is reported as `Command::Edit`.
    pub fn show(ui: &mut egui::Ui, buffer: &str, config: &EditorConfig, commands: &mut Vec<Command>) {
        ui.heading("Editor");
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .show(ui, |ui| {
                let mut text = buffer.to_string();
                let output = egui::TextEdit::multiline(&mut text)
                    .code_editor()
                    .font(egui::FontId::monospace(config.font_size))
                    .desired_width(f32::INFINITY)
                    .desired_rows(config.desired_rows)
                    .show(ui);

                if output.response.changed() {
                    commands.push(Command::Edit(text));
                }
            });
    }
}
