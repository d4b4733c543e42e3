//! XDG directory utilities
//!
//! Default locations follow the XDG Base Directory specification using the
//! `xdg` crate (`XDG_CONFIG_HOME` defaults to ~/.config).

use dotdrop_core::path::expand_tilde;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// Get the dotdrop config directory
///
/// Returns `$XDG_CONFIG_HOME/dotdrop` or `~/.config/dotdrop`
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    BaseDirectories::with_prefix("dotdrop").get_config_home()
}

/// Get the default staging directory for rendered templates that get linked
///
/// Falls back to `~/.config/dotdrop` (home expanded) when XDG lookup fails.
#[must_use]
pub fn default_work_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| expand_tilde(Path::new("~/.config/dotdrop")))
}
