//! Integration tests for linking dotfiles

#![allow(clippy::unwrap_used, clippy::panic)]
#![cfg(unix)]

mod common;

use common::{Fixture, snapshot};
use dotdrop_core::PassthroughTemplater;
use dotdrop_engine::logger::Level;
use dotdrop_template::{TemplateContext, TemplateEngine};
use serial_test::serial;
use std::fs;

#[test]
fn test_link_plain_file() {
    let fx = Fixture::new();
    let src = fx.source("inputrc", "set bell-style none\n");
    let dst = fx.home().join(".inputrc");

    let installer = fx.installer(fx.config());
    let outcome = installer.link(&PassthroughTemplater, "inputrc", &dst).unwrap();

    assert_eq!(outcome.len(), 1);
    assert_eq!(fs::read_link(&dst).unwrap(), src);
    assert_eq!(installer.logger().count(Level::Success), 1);
}

#[test]
fn test_link_directory() {
    let fx = Fixture::new();
    fx.source("vim/colors/dark.vim", "hi Normal\n");
    let dst = fx.home().join(".vim");

    let outcome = fx
        .installer(fx.config())
        .link(&PassthroughTemplater, "vim", &dst)
        .unwrap();

    assert_eq!(outcome.len(), 1);
    assert!(dst.is_symlink());
    assert_eq!(
        fs::read_to_string(dst.join("colors/dark.vim")).unwrap(),
        "hi Normal\n"
    );
}

#[test]
fn test_link_dedup() {
    let fx = Fixture::new();
    fx.source("inputrc", "x\n");
    let dst = fx.home().join(".inputrc");
    let installer = fx.installer(fx.config());

    let first = installer.link(&PassthroughTemplater, "inputrc", &dst).unwrap();
    let before = snapshot(fx.temp.path());
    let second = installer.link(&PassthroughTemplater, "inputrc", &dst).unwrap();

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(snapshot(fx.temp.path()), before);
}

#[test]
fn test_link_replaces_existing_file() {
    let fx = Fixture::new();
    let src = fx.source("inputrc", "new\n");
    let dst = fx.home().join(".inputrc");
    fs::write(&dst, "old\n").unwrap();

    let outcome = fx
        .installer(fx.config())
        .link(&PassthroughTemplater, "inputrc", &dst)
        .unwrap();

    assert_eq!(outcome.len(), 1);
    assert_eq!(fs::read_link(&dst).unwrap(), src);
}

#[test]
fn test_link_safe_mode_decline() {
    let fx = Fixture::new();
    fx.source("inputrc", "new\n");
    let dst = fx.home().join(".inputrc");
    fs::write(&dst, "old\n").unwrap();

    let installer = fx.installer_answering(fx.config().with_safe(true), false);
    let outcome = installer.link(&PassthroughTemplater, "inputrc", &dst).unwrap();

    assert!(outcome.is_empty());
    assert!(!dst.is_symlink());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "old\n");
    assert_eq!(installer.logger().count(Level::Warn), 1);
}

#[test]
fn test_link_dry_run_is_pure() {
    let fx = Fixture::new();
    fx.source("inputrc", "x\n");
    fx.source("tpl", "{{ 1 + 1 }}\n");
    fs::write(fx.home().join(".existing"), "old\n").unwrap();
    let before = snapshot(fx.temp.path());

    let engine = TemplateEngine::new();
    let installer = fx.installer(fx.config().with_dry_run(true));
    for (src, dst) in [
        ("inputrc", fx.home().join(".inputrc")),
        ("inputrc", fx.home().join(".existing")),
        ("inputrc", fx.home().join("nested/dir/.inputrc")),
        ("tpl", fx.home().join(".tpl")),
    ] {
        assert!(installer.link(&engine, src, &dst).unwrap().is_empty());
    }

    assert_eq!(snapshot(fx.temp.path()), before);
}

#[test]
#[serial]
fn test_link_template_through_staging() {
    let fx = Fixture::new();
    fx.source("gitconfig", "[user]\n\tname = {{ name }}\n");
    let dst = fx.home().join(".config/git/config");

    let mut context = TemplateContext::new();
    context.add_variable("name", serde_json::json!("octo"));
    let engine = TemplateEngine::with_context(context, None);

    temp_env::with_var("HOME", Some(fx.home()), || {
        let installer = fx.installer(fx.config());
        let outcome = installer.link(&engine, "gitconfig", &dst).unwrap();

        let staged = fx.work().join(".config/git/config");
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome[0].source, staged);
        assert_eq!(
            fs::read_to_string(&staged).unwrap(),
            "[user]\n\tname = octo\n"
        );
        assert_eq!(fs::read_link(&dst).unwrap(), staged);

        // Relinking renders identical content and finds the link in place
        assert!(installer.link(&engine, "gitconfig", &dst).unwrap().is_empty());
    });
}

#[test]
fn test_link_with_temp_root_installs() {
    let fx = Fixture::new();
    fx.source("inputrc", "x\n");
    let root = fx.temp.path().join("redirect");
    let dst = fx.home().join(".inputrc");

    let outcome = fx
        .installer(fx.config().with_temp_root(&root))
        .link(&PassthroughTemplater, "inputrc", &dst)
        .unwrap();

    let redirected = dotdrop_core::path::pivot(&dst, &root);
    assert_eq!(outcome.len(), 1);
    assert!(redirected.is_file());
    assert!(!redirected.is_symlink());
    assert!(!dst.exists());
}
