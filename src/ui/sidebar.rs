//! Sidebar listing saved notes

use eframe::egui;

use crate::core::state::{Command, EditorState};

/// Saved note list with select, delete and save actions
pub struct Sidebar;

impl Sidebar {
    /// Show the sidebar, queueing any triggered commands
    pub fn show(ui: &mut egui::Ui, state: &EditorState, commands: &mut Vec<Command>) {
        ui.vertical(|ui| {
            ui.heading("Your Notes");
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("notes_scroll")
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    if state.notes().is_empty() {
                        ui.weak("No saved notes");
                    }
                    for index in 0..state.notes().len() {
                        Self::show_note(ui, index, state.selection() == Some(index), commands);
                    }
                });

            ui.add_space(8.0);
            let save = egui::Button::new("Save Note").min_size(egui::vec2(ui.available_width(), 28.0));
            if ui.add(save).on_hover_text("Ctrl+S").clicked() {
                commands.push(Command::Save);
            }
        });
    }

    /// Show one list row
    fn show_note(ui: &mut egui::Ui, index: usize, selected: bool, commands: &mut Vec<Command>) {
        ui.horizontal(|ui| {
            if ui.selectable_label(selected, note_label(index)).clicked() {
                commands.push(Command::Select(index));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("\u{1F5D1}").on_hover_text("Delete note").clicked() {
                    commands.push(Command::Delete(index));
                }
            });
        });
    }
}

/// Display name for the note at `index`
pub fn note_label(index: usize) -> String {
    format!("Note {}", index + 1)
}
