//! Low-level write policy
//!
//! [`write`] decides between skipping, backing up and overwriting a single
//! destination file. [`ensure_dir`] creates missing parent directories under
//! the same dry-run and `create_missing_dirs` rules.

use crate::context::InstallContext;
use crate::error::{Error, Result};
use dotdrop_core::path::lexists;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Suffix appended to a destination moved aside before an overwrite
pub const BACKUP_SUFFIX: &str = ".dotdropbak";

/// Result of writing one destination
#[derive(Debug)]
pub(crate) enum WriteOutcome {
    /// The destination now holds the content
    Written { bytes: usize },
    /// Nothing was changed on purpose
    Skipped(SkipReason),
    /// A handled failure, already reported
    Failed(FailReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    DryRun,
    Identical,
    Declined,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum FailReason {
    #[error("parent directory {} could not be created", .0.display())]
    MissingParent(PathBuf),
    #[error("{0}")]
    TypeCollision(std::io::Error),
}

/// Path a destination is renamed to before being overwritten
///
/// Trailing separators are dropped, so `dir/` backs up to `dir.dotdropbak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let trimmed: PathBuf = path.components().collect();
    let mut name = OsString::from(trimmed.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Permission bits of `path`
pub(crate) fn file_mode(path: &Path) -> Result<u32> {
    let metadata = fs::metadata(path).map_err(|e| Error::Metadata {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Ok(metadata.permissions().mode() & 0o7777)
    }

    #[cfg(not(unix))]
    {
        Ok(if metadata.permissions().readonly() {
            0o444
        } else {
            0o644
        })
    }
}

fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777)).map_err(|e| {
            Error::Permissions {
                path: path.to_path_buf(),
                source: e,
            }
        })
    }

    #[cfg(not(unix))]
    {
        let mut permissions = fs::metadata(path)
            .map_err(|e| Error::Metadata {
                path: path.to_path_buf(),
                source: e,
            })?
            .permissions();
        permissions.set_readonly(mode & 0o200 == 0);
        fs::set_permissions(path, permissions).map_err(|e| Error::Permissions {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn is_identical(dst: &Path, content: &[u8], mode: u32) -> bool {
    let Ok(current_mode) = file_mode(dst) else {
        return false;
    };
    if current_mode != mode {
        return false;
    }
    fs::read(dst).is_ok_and(|current| current == content)
}

/// Write `content` to `dst` with permission bits `mode`
pub(crate) fn write(
    ctx: &InstallContext<'_>,
    dst: &Path,
    content: &[u8],
    mode: u32,
) -> Result<WriteOutcome> {
    if ctx.dry_run() {
        ctx.logger.dry(&format!("would install {}", dst.display()));
        return Ok(WriteOutcome::Skipped(SkipReason::DryRun));
    }

    if lexists(dst) {
        if ctx.config.diff && is_identical(dst, content, mode) {
            ctx.debug(&format!("{} is already up to date", dst.display()));
            return Ok(WriteOutcome::Skipped(SkipReason::Identical));
        }

        if ctx.config.safe
            && !ctx
                .logger
                .confirm(&format!("Overwrite \"{}\"", dst.display()))
        {
            ctx.logger
                .warn(&format!("ignoring {}, not overwritten", dst.display()));
            return Ok(WriteOutcome::Skipped(SkipReason::Declined));
        }

        if ctx.config.backup {
            let backup = backup_path(dst);
            fs::rename(dst, &backup).map_err(|e| Error::Backup {
                path: dst.to_path_buf(),
                backup: backup.clone(),
                source: e,
            })?;
            ctx.logger.log(&format!(
                "backup {} to {}",
                dst.display(),
                backup.display()
            ));
        }
    }

    let parent = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !ensure_dir(ctx, parent)? {
        ctx.logger
            .error(&format!("creating directory for {}", dst.display()));
        return Ok(WriteOutcome::Failed(FailReason::MissingParent(
            parent.to_path_buf(),
        )));
    }

    ctx.debug(&format!("write content to {}", dst.display()));
    if let Err(e) = fs::write(dst, content) {
        return match e.kind() {
            ErrorKind::NotADirectory | ErrorKind::IsADirectory => {
                ctx.logger
                    .error(&format!("opening dest file {}: {e}", dst.display()));
                Ok(WriteOutcome::Failed(FailReason::TypeCollision(e)))
            }
            _ => Err(Error::FileWrite {
                path: dst.to_path_buf(),
                source: e,
            }),
        };
    }

    set_mode(dst, mode)?;
    Ok(WriteOutcome::Written {
        bytes: content.len(),
    })
}

/// Make sure `dir` exists, creating it when allowed
///
/// Returns `false` when the directory is missing and may not be created.
pub(crate) fn ensure_dir(ctx: &InstallContext<'_>, dir: &Path) -> Result<bool> {
    if dir.exists() {
        return Ok(true);
    }
    if !ctx.config.create_missing_dirs {
        return Ok(false);
    }
    if ctx.dry_run() {
        ctx.logger.dry(&format!("would mkdir -p {}", dir.display()));
        return Ok(true);
    }

    ctx.debug(&format!("mkdir -p {}", dir.display()));
    fs::create_dir_all(dir).map_err(|e| Error::DirectoryCreate {
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(dir.exists())
}
