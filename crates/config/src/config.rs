//! Installer configuration
//!
//! Settings are read from an `[installer]` table:
//!
//! ```toml
//! [installer]
//! sourceBase = "~/dotfiles"
//! workDir = "~/.config/dotdrop"
//! backupBeforeOverwrite = true
//! createMissingDirs = true
//! diffBeforeWrite = true
//! safe = false
//! ```

use crate::Result;
use crate::dirs::default_work_dir;
use dotdrop_core::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one installer invocation
///
/// The installer never mutates its configuration. Shadow installs run
/// against a derived snapshot, see [`InstallerConfig::to_shadow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Create missing destination directories
    #[serde(default = "default_true", rename = "createMissingDirs")]
    pub create_missing_dirs: bool,

    /// Rename an existing destination to `<dst>.dotdropbak` before overwriting
    #[serde(default = "default_true", rename = "backupBeforeOverwrite")]
    pub backup: bool,

    /// Simulate and report, never touch the filesystem
    #[serde(default, rename = "dryRun")]
    pub dry_run: bool,

    /// Ask for confirmation before destructive changes
    #[serde(default)]
    pub safe: bool,

    /// Root prepended to relative source paths
    #[serde(default = "default_source_base", rename = "sourceBase")]
    pub source_base: PathBuf,

    /// Staging root for rendered templates that get symlinked
    #[serde(default = "default_work_dir", rename = "workDir")]
    pub work_dir: PathBuf,

    /// Emit debug messages from the installer
    #[serde(default)]
    pub debug: bool,

    /// Skip writes whose content and mode already match
    #[serde(default = "default_true", rename = "diffBeforeWrite")]
    pub diff: bool,

    /// Pivot every destination under this directory instead of its real location
    #[serde(default, rename = "tempRoot")]
    pub temp_root: Option<PathBuf>,

    #[serde(skip)]
    shadow: bool,
}

fn default_true() -> bool {
    true
}

fn default_source_base() -> PathBuf {
    PathBuf::from(".")
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            create_missing_dirs: true,
            backup: true,
            dry_run: false,
            safe: false,
            source_base: default_source_base(),
            work_dir: default_work_dir(),
            debug: false,
            diff: true,
            temp_root: None,
            shadow: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    installer: InstallerConfig,
}

impl InstallerConfig {
    /// Load the `[installer]` table from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or TOML parsing fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading installer config: {}", path.as_ref().display());
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            dotdrop_core::Error::Message(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml_str(&content).map_err(|e| {
            dotdrop_core::Error::Message(format!("{} ({})", e, path.as_ref().display()))
        })
    }

    /// Parse the `[installer]` table from a TOML string
    ///
    /// A missing table yields the defaults. `~` is expanded in every path.
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing fails
    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml_content).map_err(|e| {
            dotdrop_core::Error::Message(format!("Failed to parse config TOML: {e}"))
        })?;

        let mut config = file.installer;
        config.expand_paths();
        Ok(config)
    }

    fn expand_paths(&mut self) {
        self.source_base = expand_tilde(&self.source_base);
        self.work_dir = expand_tilde(&self.work_dir);
        if let Some(ref root) = self.temp_root {
            self.temp_root = Some(expand_tilde(root));
        }
    }

    /// Derive the snapshot used for a shadow install
    ///
    /// Shadow installs always write (no dry-run, no diff skip), always create
    /// directories, and suppress the per-file success line. Every other setting
    /// is inherited.
    #[must_use]
    pub fn to_shadow(&self) -> Self {
        Self {
            dry_run: false,
            diff: false,
            create_missing_dirs: true,
            shadow: true,
            ..self.clone()
        }
    }

    /// Whether this is a shadow-install snapshot
    pub fn is_shadow(&self) -> bool {
        self.shadow
    }

    /// Set the source base directory
    #[must_use]
    pub fn with_source_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.source_base = base.into();
        self
    }

    /// Set the staging directory for linked templates
    #[must_use]
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Redirect every destination under `root`
    #[must_use]
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Enable or disable dry-run mode
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enable or disable safe mode
    #[must_use]
    pub fn with_safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Enable or disable backups before overwrite
    #[must_use]
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Enable or disable identical-content detection
    #[must_use]
    pub fn with_diff(mut self, diff: bool) -> Self {
        self.diff = diff;
        self
    }

    /// Allow or forbid creating missing directories
    #[must_use]
    pub fn with_create_missing_dirs(mut self, create: bool) -> Self {
        self.create_missing_dirs = create;
        self
    }

    /// Enable or disable installer debug messages
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
