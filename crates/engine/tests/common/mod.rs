//! Shared fixtures for installer integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::panic)]

use dotdrop_config::InstallerConfig;
use dotdrop_engine::{Installer, MemoryLogger};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A scratch layout with a dotfiles tree, a home and a staging root
pub struct Fixture {
    pub temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        for dir in ["dotfiles", "home", "work"] {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        Self { temp }
    }

    pub fn dotfiles(&self) -> PathBuf {
        self.temp.path().join("dotfiles")
    }

    pub fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    pub fn work(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    /// Write a source file relative to the dotfiles directory
    pub fn source(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dotfiles().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn config(&self) -> InstallerConfig {
        InstallerConfig::default()
            .with_source_base(self.dotfiles())
            .with_work_dir(self.work())
    }

    pub fn installer(&self, config: InstallerConfig) -> Installer<MemoryLogger> {
        Installer::with_logger(config, MemoryLogger::default())
    }

    pub fn installer_answering(
        &self,
        config: InstallerConfig,
        answer: bool,
    ) -> Installer<MemoryLogger> {
        Installer::with_logger(config, MemoryLogger::answering(answer))
    }
}

/// What a tree entry looks like, without following symlinks
#[derive(Debug, PartialEq, Eq)]
pub enum Node {
    Dir,
    File(Vec<u8>),
    Link(PathBuf),
}

/// Record every entry under `root`
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Node> {
    WalkDir::new(root)
        .into_iter()
        .map(Result::unwrap)
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let node = if entry.path_is_symlink() {
                Node::Link(fs::read_link(entry.path()).unwrap())
            } else if entry.file_type().is_dir() {
                Node::Dir
            } else {
                Node::File(fs::read(entry.path()).unwrap())
            };
            (relative, node)
        })
        .collect()
}
