//! Markdown preview panel using egui_commonmark

use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::core::state::Theme;

/// Read-only rendered surface over the document buffer
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview panel
    pub fn show(ui: &mut egui::Ui, cache: &mut CommonMarkCache, buffer: &str, theme: Theme) {
        ui.heading("Preview");
        ui.add_space(4.0);

        egui::Frame::group(ui.style())
            .fill(Self::background(theme))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("preview_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if buffer.trim().is_empty() {
                            ui.weak("Nothing to preview");
                        } else {
                            CommonMarkViewer::new().show(ui, cache, buffer);
                        }
                    });
            });
    }

    fn background(theme: Theme) -> egui::Color32 {
        match theme {
            Theme::Light => egui::Color32::from_gray(252),
            Theme::Dark => egui::Color32::from_gray(24),
        }
    }
}
