//! # dotdrop Template
//!
//! Template engine integration for dotdrop using minijinja.
//!
//! [`TemplateEngine`] implements the [`dotdrop_core::Templater`] contract the
//! installer consumes: text files are rendered, binary files pass through.

pub mod context;
pub mod engine;
pub mod functions;

pub use context::TemplateContext;
pub use engine::TemplateEngine;

use thiserror::Error;

/// Result type for template operations
pub type Result<T> = std::result::Result<T, Error>;

/// Template engine errors
#[derive(Error, Debug)]
pub enum Error {
    /// Template rendering error
    #[error("Template error at {location}: {message}")]
    Render { location: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        let location = match (err.name(), err.line()) {
            (Some(name), Some(line)) => format!("{name} line {line}"),
            (None, Some(line)) => format!("line {line}"),
            (Some(name), None) => name.to_string(),
            (None, None) => "unknown location".to_string(),
        };

        Error::Render {
            location,
            message: err.to_string(),
        }
    }
}
