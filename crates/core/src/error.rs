//! Base error types for dotdrop
//!
//! This module provides the foundation error types that all crates can use.

use std::path::PathBuf;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The home directory could not be determined
    #[error("Unable to determine the home directory")]
    HomeDirNotFound,

    /// Path does not exist on disk
    #[error("Path does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    /// Removing a path failed
    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rendering a template produced no content
    #[error("Template generation failed for {}: {message}", path.display())]
    Template { path: PathBuf, message: String },

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
