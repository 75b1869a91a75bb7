//! UI components

pub mod editor;
pub mod preview;
pub mod sidebar;
pub mod toolbar;
