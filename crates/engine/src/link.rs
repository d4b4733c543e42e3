//! Symlink creation with deduplication

use crate::context::InstallContext;
use crate::error::{Error, Result};
use crate::installer::{InstallOutcome, Installed};
use crate::write::ensure_dir;
use dotdrop_core::path::{lexists, real_path, remove};
use std::path::Path;

/// Point `dst` at `src`, replacing whatever `dst` currently is
///
/// A destination that already resolves to `src` is left alone.
pub(crate) fn symlink(ctx: &InstallContext<'_>, src: &Path, dst: &Path) -> Result<InstallOutcome> {
    if lexists(dst) {
        if real_path(dst) == real_path(src) {
            ctx.debug(&format!("ignoring \"{}\", link exists", dst.display()));
            return Ok(Vec::new());
        }
        if ctx.dry_run() {
            ctx.logger.dry(&format!(
                "would remove {} and link to {}",
                dst.display(),
                src.display()
            ));
            return Ok(Vec::new());
        }
        if ctx.config.safe
            && !ctx.logger.confirm(&format!(
                "Remove \"{}\" for link creation?",
                dst.display()
            ))
        {
            ctx.logger.warn(&format!(
                "ignoring \"{}\", link was not created",
                dst.display()
            ));
            return Ok(Vec::new());
        }
        if let Err(e) = remove(dst) {
            ctx.logger.error(&format!("something went wrong with {}: {e}", dst.display()));
            return Ok(Vec::new());
        }
    }

    if ctx.dry_run() {
        ctx.logger
            .dry(&format!("would link {} to {}", dst.display(), src.display()));
        return Ok(Vec::new());
    }

    let parent = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !ensure_dir(ctx, parent)? {
        ctx.logger
            .error(&format!("creating directory for {}", dst.display()));
        return Ok(Vec::new());
    }

    let target = std::path::absolute(src).unwrap_or_else(|_| src.to_path_buf());
    create_symlink(&target, dst).map_err(|e| Error::Symlink {
        link: dst.to_path_buf(),
        target: target.clone(),
        source: e,
    })?;

    ctx.logger.success(&format!(
        "linked \"{}\" to \"{}\"",
        dst.display(),
        target.display()
    ));
    Ok(vec![Installed {
        source: src.to_path_buf(),
        destination: dst.to_path_buf(),
    }])
}

fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}
