//! Integration tests for installing into a scratch directory

#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use common::{Fixture, snapshot};
use dotdrop_core::PassthroughTemplater;
use dotdrop_engine::logger::Level;
use std::fs;

#[test]
fn test_shadow_install_writes_despite_dry_run() {
    let fx = Fixture::new();
    fx.source("tmux.conf", "set -g mouse on\n");
    let dst = fx.home().join(".tmux.conf");
    let scratch = fx.temp.path().join("scratch");
    let home_before = snapshot(&fx.home());

    let installer = fx.installer(fx.config().with_dry_run(true).with_diff(true));
    let (outcome, tmpdst) = installer
        .install_to_temp(&PassthroughTemplater, &scratch, "tmux.conf", &dst)
        .unwrap();

    assert_eq!(tmpdst, dotdrop_core::path::pivot(&dst, &scratch));
    assert_eq!(outcome.len(), 1);
    assert_eq!(fs::read_to_string(&tmpdst).unwrap(), "set -g mouse on\n");
    assert_eq!(snapshot(&fx.home()), home_before);

    // The installer keeps its own settings
    assert!(installer.config().dry_run);
    assert!(installer.config().diff);
    assert!(!installer.config().is_shadow());
    assert_eq!(installer.logger().count(Level::Success), 0);
}

#[test]
fn test_shadow_install_rewrites_identical() {
    let fx = Fixture::new();
    fx.source("rc", "x\n");
    let scratch = fx.temp.path().join("scratch");
    let installer = fx.installer(fx.config());

    let (first, tmpdst) = installer
        .install_to_temp(&PassthroughTemplater, &scratch, "rc", "/etc/rc")
        .unwrap();
    let (second, _) = installer
        .install_to_temp(&PassthroughTemplater, &scratch, "rc", "/etc/rc")
        .unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert!(tmpdst.is_file());
}

#[test]
fn test_shadow_install_creates_directories() {
    let fx = Fixture::new();
    fx.source("conf/a/b", "b\n");
    let scratch = fx.temp.path().join("scratch");

    let installer = fx.installer(fx.config().with_create_missing_dirs(false));
    let (outcome, tmpdst) = installer
        .install_to_temp(&PassthroughTemplater, &scratch, "conf", fx.home().join("conf"))
        .unwrap();

    assert_eq!(outcome.len(), 1);
    assert_eq!(fs::read_to_string(tmpdst.join("a/b")).unwrap(), "b\n");
}

#[test]
fn test_shadow_install_ignores_temp_root() {
    let fx = Fixture::new();
    fx.source("rc", "x\n");
    let scratch = fx.temp.path().join("scratch");
    let redirect = fx.temp.path().join("redirect");

    let installer = fx.installer(fx.config().with_temp_root(&redirect));
    let (_, tmpdst) = installer
        .install_to_temp(&PassthroughTemplater, &scratch, "rc", "/etc/rc")
        .unwrap();

    assert_eq!(tmpdst, scratch.join("etc/rc"));
    assert!(tmpdst.is_file());
    assert!(!redirect.exists());
}
