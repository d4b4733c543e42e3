//! Custom template functions
//!
//! This module provides custom functions and filters for use in templates.

use minijinja::Value;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

// Cached system information
static HOSTNAME_CACHE: OnceLock<String> = OnceLock::new();
static USERNAME_CACHE: OnceLock<String> = OnceLock::new();
static HOME_DIR_CACHE: OnceLock<String> = OnceLock::new();

/// Get an environment variable
///
/// Usage: `{{ env("PATH") }}`
pub fn env(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

/// Get the operating system name
///
/// Usage: `{{ os() }}`
#[must_use]
pub fn os() -> &'static str {
    #[cfg(target_os = "macos")]
    return "darwin";

    #[cfg(not(target_os = "macos"))]
    return env::consts::OS;
}

/// Get the system architecture
///
/// Usage: `{{ arch() }}`
#[must_use]
pub fn arch() -> &'static str {
    env::consts::ARCH
}

/// Get the system hostname
///
/// Usage: `{{ hostname() }}`
pub fn hostname() -> &'static str {
    HOSTNAME_CACHE.get_or_init(|| {
        hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string())
    })
}

/// Get the current username
///
/// Usage: `{{ username() }}`
pub fn username() -> &'static str {
    USERNAME_CACHE.get_or_init(|| {
        env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    })
}

/// Get the home directory
///
/// Usage: `{{ home_dir() }}`
pub fn home_dir() -> &'static str {
    HOME_DIR_CACHE.get_or_init(|| {
        dirs::home_dir().map_or_else(
            || "/home/unknown".to_string(),
            |p| p.to_string_lossy().into_owned(),
        )
    })
}

/// Join path components
///
/// Usage: `{{ joinPath("/home", "user", ".config") }}`
#[must_use]
pub fn join_path(args: &[Value]) -> String {
    let mut path = PathBuf::new();
    for arg in args {
        if let Some(s) = arg.as_str() {
            path.push(s);
        }
    }
    path.to_string_lossy().into_owned()
}

/// Quote a string for shell use
///
/// Usage: `{{ value | quote }}`
#[must_use]
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
