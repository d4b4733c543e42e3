//! Install and link orchestration
//!
//! [`Installer`] turns a managed source (file or directory tree) into a
//! destination on disk, either by writing rendered content or by symlinking.
//! Every expected failure is reported through the [`Logger`] and results in
//! an empty [`InstallOutcome`]; only unexpected filesystem errors come back
//! as `Err`.

use crate::context::InstallContext;
use crate::error::Result;
use crate::link::symlink;
use crate::logger::{Logger, TracingLogger};
use crate::write::{SkipReason, WriteOutcome, ensure_dir, file_mode, write};
use dotdrop_config::InstallerConfig;
use dotdrop_core::Templater;
use dotdrop_core::path::{expand_tilde, pivot, pivot_strip_home, same_file};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A destination that was changed, and the source it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    /// Source path (or staged rendering) that was installed
    pub source: PathBuf,
    /// Destination path that was written or linked
    pub destination: PathBuf,
}

/// Changed destinations in the order they were changed
///
/// Empty means nothing changed, whether because everything was up to date
/// or because a handled failure was logged.
pub type InstallOutcome = Vec<Installed>;

/// Installs dotfiles according to an [`InstallerConfig`]
///
/// # Examples
///
/// ```no_run
/// use dotdrop_config::InstallerConfig;
/// use dotdrop_core::PassthroughTemplater;
/// use dotdrop_engine::Installer;
///
/// let config = InstallerConfig::default().with_source_base("/home/user/dotfiles");
/// let installer = Installer::new(config);
/// let changed = installer.install(&PassthroughTemplater, "vimrc", "~/.vimrc")?;
/// for item in &changed {
///     println!("{} -> {}", item.source.display(), item.destination.display());
/// }
/// # Ok::<(), dotdrop_engine::Error>(())
/// ```
#[derive(Debug)]
pub struct Installer<L: Logger = TracingLogger> {
    config: InstallerConfig,
    logger: L,
}

impl Installer<TracingLogger> {
    /// Create an installer that reports through `tracing`
    pub fn new(config: InstallerConfig) -> Self {
        Self::with_logger(config, TracingLogger)
    }
}

impl<L: Logger> Installer<L> {
    /// Create an installer with a custom logger
    pub fn with_logger(config: InstallerConfig, logger: L) -> Self {
        Self { config, logger }
    }

    /// The configuration this installer runs with
    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// The logger receiving installer messages
    pub fn logger(&self) -> &L {
        &self.logger
    }

    fn context<'a>(&'a self, templater: &'a dyn Templater) -> InstallContext<'a> {
        InstallContext::new(&self.config, templater, &self.logger)
    }

    /// Install `src` to `dst` by writing its generated content
    ///
    /// Relative sources are taken from `source_base`. A leading `~` is
    /// expanded in both paths, and the destination is moved under
    /// `temp_root` when one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error only for filesystem failures the installer does not
    /// handle itself, such as a failing backup rename.
    pub fn install(
        &self,
        templater: &dyn Templater,
        src: impl AsRef<Path>,
        dst: impl AsRef<Path>,
    ) -> Result<InstallOutcome> {
        let ctx = self.context(templater);
        let src = self.source_path(src.as_ref());
        let dst = self.destination_path(dst.as_ref());
        install_resolved(&ctx, &src, &dst)
    }

    /// Link `dst` to `src`
    ///
    /// A templated source is rendered under `work_dir` first and the link
    /// points at the rendering. With `temp_root` set this is the same as
    /// [`Installer::install`].
    ///
    /// # Errors
    ///
    /// Returns an error only for filesystem failures the installer does not
    /// handle itself, such as a failing symlink creation.
    pub fn link(
        &self,
        templater: &dyn Templater,
        src: impl AsRef<Path>,
        dst: impl AsRef<Path>,
    ) -> Result<InstallOutcome> {
        if self.config.temp_root.is_some() {
            return self.install(templater, src, dst);
        }

        let ctx = self.context(templater);
        let src = self.source_path(src.as_ref());
        let dst = expand_tilde(dst.as_ref());

        if !src.exists() {
            self.logger.error(&format!(
                "source dotfile does not exist: {}",
                src.display()
            ));
            return Ok(Vec::new());
        }
        if same_file(&src, &dst) && !dst.is_symlink() {
            self.logger
                .error(&format!("dotfile points to itself: {}", dst.display()));
            return Ok(Vec::new());
        }

        let target = if templater.is_template(&src) {
            let staged = match dotdrop_core::path::home_dir() {
                Ok(home) => pivot_strip_home(&dst, &self.config.work_dir, &home),
                Err(_) => pivot(&dst, &self.config.work_dir),
            };
            ctx.debug(&format!(
                "{} is a template, installing to {}",
                src.display(),
                staged.display()
            ));

            let rendered = install_resolved(&ctx, &src, &staged)?;
            if rendered.is_empty() && !staged.exists() {
                return Ok(Vec::new());
            }
            staged
        } else {
            src
        };

        symlink(&ctx, &target, &dst)
    }

    /// Install into a scratch directory for comparison
    ///
    /// Produces under `tmpdir` the file a real install of `src` to `dst`
    /// would produce, and returns it alongside the outcome. The run always
    /// writes and creates directories, ignoring dry-run and diff settings;
    /// the installer's own configuration is left as it was.
    ///
    /// # Errors
    ///
    /// Same as [`Installer::install`].
    pub fn install_to_temp(
        &self,
        templater: &dyn Templater,
        tmpdir: impl AsRef<Path>,
        src: impl AsRef<Path>,
        dst: impl AsRef<Path>,
    ) -> Result<(InstallOutcome, PathBuf)> {
        let shadow = self.config.to_shadow();
        let ctx = InstallContext::new(&shadow, templater, &self.logger);

        let src = self.source_path(src.as_ref());
        let tmpdst = pivot(&expand_tilde(dst.as_ref()), tmpdir.as_ref());
        ctx.debug(&format!("shadow install {} to {}", src.display(), tmpdst.display()));

        let outcome = install_resolved(&ctx, &src, &tmpdst)?;
        Ok((outcome, tmpdst))
    }

    fn source_path(&self, src: &Path) -> PathBuf {
        self.config.source_base.join(expand_tilde(src))
    }

    fn destination_path(&self, dst: &Path) -> PathBuf {
        let dst = expand_tilde(dst);
        match &self.config.temp_root {
            Some(root) => pivot(&dst, root),
            None => dst,
        }
    }
}

/// Install with fully resolved paths
fn install_resolved(ctx: &InstallContext<'_>, src: &Path, dst: &Path) -> Result<InstallOutcome> {
    if !src.exists() {
        ctx.logger.error(&format!(
            "source dotfile does not exist: {}",
            src.display()
        ));
        return Ok(Vec::new());
    }
    if same_file(src, dst) {
        ctx.logger.error(&format!(
            "dotfile points to itself: {}",
            dst.display()
        ));
        return Ok(Vec::new());
    }

    ctx.debug(&format!("install {} to {}", src.display(), dst.display()));
    if src.is_dir() {
        handle_dir(ctx, src, dst)
    } else {
        handle_file(ctx, src, dst)
    }
}

fn handle_dir(ctx: &InstallContext<'_>, src: &Path, dst: &Path) -> Result<InstallOutcome> {
    ctx.debug(&format!("install dir {} to {}", src.display(), dst.display()));
    // A missing destination root is reported again by the first write
    ensure_dir(ctx, dst)?;

    let mut outcome = Vec::new();
    for entry in WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                ctx.logger
                    .error(&format!("walking {}: {e}", src.display()));
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(ctx, &target)?;
        } else {
            outcome.extend(handle_file(ctx, entry.path(), &target)?);
        }
    }

    Ok(outcome)
}

fn handle_file(ctx: &InstallContext<'_>, src: &Path, dst: &Path) -> Result<InstallOutcome> {
    if same_file(src, dst) {
        ctx.logger.error(&format!(
            "dotfile points to itself: {}",
            dst.display()
        ));
        return Ok(Vec::new());
    }

    let content = match ctx.templater.generate(src) {
        Ok(content) => content,
        Err(e) => {
            ctx.logger.error(&format!(
                "generate from template {}: {e}",
                src.display()
            ));
            return Ok(Vec::new());
        }
    };

    if !src.exists() {
        ctx.logger.error(&format!(
            "source dotfile does not exist: {}",
            src.display()
        ));
        return Ok(Vec::new());
    }

    let mode = file_mode(src)?;
    match write(ctx, dst, &content, mode)? {
        WriteOutcome::Failed(reason) => {
            ctx.logger.error(&format!(
                "installing {} to {}: {reason}",
                src.display(),
                dst.display()
            ));
            Ok(Vec::new())
        }
        WriteOutcome::Skipped(reason) => {
            if reason == SkipReason::Identical {
                ctx.debug(&format!("ignoring {}, same content", dst.display()));
            }
            Ok(Vec::new())
        }
        WriteOutcome::Written { bytes } => {
            ctx.debug(&format!("wrote {bytes} bytes to {}", dst.display()));
            if !ctx.config.dry_run && !ctx.config.is_shadow() {
                ctx.logger.success(&format!(
                    "copied {} to {}",
                    src.display(),
                    dst.display()
                ));
            }
            Ok(vec![Installed {
                source: src.to_path_buf(),
                destination: dst.to_path_buf(),
            }])
        }
    }
}
