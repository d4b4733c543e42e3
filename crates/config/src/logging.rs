//! Logging setup for dotdrop
//!
//! Terminal output plus an optional log file, using tracing.

use crate::Result;
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Targets that the default filter enables
const TARGETS: [&str; 4] = [
    "dotdrop_engine",
    "dotdrop_template",
    "dotdrop_config",
    "dotdrop_core",
];

/// Build the default filter directive for `level`
fn default_directive(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging and timestamps
/// * `log_file` - Optional path to append detailed logs to
///
/// `RUST_LOG` overrides the terminal filter.
///
/// # Examples
/// ```ignore
/// // Info level, terminal only
/// init(false, None)?;
///
/// // Debug level with a log file
/// init(true, Some(Path::new("dotdrop.log")))?;
/// ```
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .map_err(|e| dotdrop_core::Error::Message(format!("Invalid log filter: {e}")))?;

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true);

    // No timestamps in normal mode
    let stdout_layer = if verbose {
        stdout_layer.with_filter(env_filter).boxed()
    } else {
        stdout_layer.without_time().with_filter(env_filter).boxed()
    };

    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| dotdrop_core::Error::Message(format!("Logging already initialized: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_all_crates() {
        let directive = default_directive("debug");
        for target in TARGETS {
            assert!(directive.contains(&format!("{target}=debug")));
        }
    }

    #[test]
    fn test_default_directive_parses() {
        assert!(EnvFilter::try_new(default_directive("info")).is_ok());
    }
}
