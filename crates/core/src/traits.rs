//! Core behavioral traits for dotdrop components
//!
//! The installer only depends on these interfaces, so any template engine can
//! be plugged in (and tests can substitute a trivial one).

use crate::Result;
use std::path::Path;

/// Template renderer interface consumed by the installer
///
/// # Examples
///
/// ```ignore
/// fn render(templater: &dyn Templater, src: &Path) -> Option<Vec<u8>> {
///     templater.generate(src).ok()
/// }
/// ```
pub trait Templater {
    /// Whether the file (or any file below the directory) at `path` contains
    /// template markup
    fn is_template(&self, path: &Path) -> bool;

    /// Produce the bytes to install for the source file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or fails to render. The
    /// installer treats any error as "no content".
    fn generate(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Templater that installs every source verbatim
///
/// Nothing is ever considered a template, so `link` always points at the
/// source itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTemplater;

impl Templater for PassthroughTemplater {
    fn is_template(&self, _path: &Path) -> bool {
        false
    }

    fn generate(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }
}
