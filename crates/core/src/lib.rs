//! Core types and utilities for dotdrop
//!
//! This is the foundation crate that all other dotdrop crates depend on.
//! It provides:
//! - Path helpers (home expansion, same-file detection, pivoting, removal)
//! - Base error types
//! - The [`Templater`] contract consumed by the installer
//!
//! This crate has no dependencies on other dotdrop crates.

pub mod error;
pub mod path;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{PassthroughTemplater, Templater};
