//! Core functionality: editor state, note storage, export and configuration

pub mod config;
pub mod export;
pub mod state;
pub mod storage;
