//! MdNotes - markdown note editor
//!
//! Edit markdown with a live preview, keep notes in local storage and
//! download the current document as `README.md`.

mod app;
mod core;
mod ui;

use app::NotesApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting MdNotes...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Markdown Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "MdNotes",
        native_options,
        Box::new(|cc| create_app(cc)),
    )
}

/// Build the app; a failure here (such as unreadable saved notes) aborts startup
fn create_app(
    cc: &eframe::CreationContext<'_>,
) -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
    Ok(Box::new(NotesApp::new(cc)?))
}
