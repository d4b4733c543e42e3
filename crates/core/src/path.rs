//! Path helpers used by the installer
//!
//! - [`expand_tilde`]: expand a leading `~` to the user's home directory
//! - [`same_file`]: do two paths resolve to the same filesystem entity
//! - [`lexists`]: existence check that does not follow symlinks
//! - [`remove`]: remove a file, symlink or directory tree
//! - [`pivot`] / [`pivot_strip_home`]: relocate a path under another root
//!
//! # Examples
//!
//! ```
//! use dotdrop_core::path::pivot;
//! use std::path::Path;
//!
//! let moved = pivot(Path::new("/etc/hosts"), Path::new("/tmp/shadow"));
//! assert_eq!(moved, Path::new("/tmp/shadow/etc/hosts"));
//! ```

use crate::error::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Get the current user's home directory
///
/// # Errors
///
/// Returns [`Error::HomeDirNotFound`] if no home directory can be determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(Error::HomeDirNotFound)
}

/// Expand a leading `~` or `~/` to the home directory
///
/// Paths without a leading tilde (and tilde paths when no home directory is
/// known) are returned unchanged.
///
/// ```
/// use dotdrop_core::path::expand_tilde;
/// use std::path::Path;
///
/// assert_eq!(expand_tilde(Path::new("/etc/hosts")), Path::new("/etc/hosts"));
/// ```
pub fn expand_tilde(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Check whether a path exists without following a final symlink
///
/// Unlike [`Path::exists`], a dangling symlink counts as existing.
pub fn lexists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Check whether two paths resolve to the identical filesystem entity
///
/// Symlinks are followed. Returns `false` when either path does not exist
/// (a dangling symlink does not exist for this purpose).
pub fn same_file(a: &Path, b: &Path) -> bool {
    let (Ok(meta_a), Ok(meta_b)) = (fs::metadata(a), fs::metadata(b)) else {
        return false;
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino()
    }

    #[cfg(not(unix))]
    {
        let _ = (meta_a, meta_b);
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Resolve a path to its real location
///
/// Relative paths are made absolute first. When the path (or a trailing part
/// of it) does not exist, dangling links are followed and the longest existing
/// ancestor is canonicalized with the remaining components appended unchanged.
pub fn real_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    resolve(&absolute, 0)
}

// Symlink hops followed before giving up on a loop
const MAX_LINK_DEPTH: usize = 40;

fn resolve(path: &Path, depth: usize) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }

    // Dangling symlink: resolve the link text relative to its directory
    if depth < MAX_LINK_DEPTH
        && let Ok(target) = fs::read_link(path)
    {
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        return resolve(&base.join(target), depth + 1);
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            resolve(parent, depth).join(name)
        }
        _ => path.to_path_buf(),
    }
}

/// Remove a file, symlink or directory tree
///
/// Symlinks are removed themselves, never their target.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if nothing exists at `path`, and
/// [`Error::Remove`] if the removal fails.
pub fn remove(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|_| Error::NotFound {
        path: path.to_path_buf(),
    })?;

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    removed.map_err(|source| Error::Remove {
        path: path.to_path_buf(),
        source,
    })
}

/// Relocate `path` under `new_root`
///
/// The root (and drive prefix) of `path` is dropped and the rest is joined
/// onto `new_root`, so `/etc/hosts` pivoted to `/tmp/x` becomes
/// `/tmp/x/etc/hosts`.
pub fn pivot(path: &Path, new_root: &Path) -> PathBuf {
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    new_root.join(relative)
}

/// Relocate `path` under `new_root` after stripping the `home` prefix
///
/// `~/.config/foo` pivoted to `/work` becomes `/work/.config/foo`, so the
/// staged layout mirrors the real one. Paths outside `home` are pivoted as-is.
///
/// ```
/// use dotdrop_core::path::pivot_strip_home;
/// use std::path::Path;
///
/// let staged = pivot_strip_home(
///     Path::new("/home/user/.vimrc"),
///     Path::new("/work"),
///     Path::new("/home/user"),
/// );
/// assert_eq!(staged, Path::new("/work/.vimrc"));
/// ```
pub fn pivot_strip_home(path: &Path, new_root: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix(home) {
        Ok(relative) => pivot(relative, new_root),
        Err(_) => pivot(path, new_root),
    }
}
