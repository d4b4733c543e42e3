//! Configuration for dotdrop
//!
//! This crate handles:
//! - Installer settings (`InstallerConfig`) and their TOML form
//! - XDG default directories
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod logging;

// Re-export error types from core
pub use dotdrop_core::{Error, Result};

pub use config::InstallerConfig;
