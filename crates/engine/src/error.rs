//! Error types for dotdrop-engine
//!
//! Only failures the installer does not handle itself end up here. Expected
//! conditions (missing source, declined prompt, identical content, ...) are
//! reported through the [`Logger`](crate::logger::Logger) and yield an empty
//! outcome instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dotdrop-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dotdrop-engine
#[derive(Error, Debug)]
pub enum Error {
    /// Error creating a directory
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a file
    #[error("Failed to write file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error moving a destination aside before overwriting it
    #[error("Failed to back up {} to {}: {source}", path.display(), backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error creating a symbolic link
    #[error("Failed to link {} to {}: {source}", link.display(), target.display())]
    Symlink {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error setting permissions
    #[error("Failed to set permissions on {}: {source}", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error with file metadata
    #[error("Failed to read metadata for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the shared core crate
    #[error(transparent)]
    Core(#[from] dotdrop_core::Error),
}
