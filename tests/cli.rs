//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

fn empty_project(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("swag_cli_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn run_swag(root: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_swag");
    Command::new(bin)
        .args(args)
        .current_dir(root)
        .env("SWAG_ROOT", root)
        .env_remove("SWAG_ORIGIN_URL")
        .env_remove("SWAG_RECORD")
        .output()
        .expect("failed to run swag binary")
}

#[test]
fn help_lists_subcommands() {
    let root = empty_project("help");
    let output = run_swag(&root, &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for command in ["sync", "diff", "impact", "update", "show"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn unknown_subcommand_fails() {
    let root = empty_project("unknown");
    let output = run_swag(&root, &["frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn update_without_target_shows_error() {
    let root = empty_project("update");
    let output = run_swag(&root, &["update"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--all") || stderr.contains("--mod"));
}

#[test]
fn impact_without_lock_asks_for_sync() {
    let root = empty_project("impact");
    let output = run_swag(&root, &["impact", "User"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("swag sync"));
}

#[test]
fn sync_without_origin_url_fails_before_fetching() {
    let root = empty_project("sync");
    let output = run_swag(&root, &["sync"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("originUrl is not set"));
}

#[test]
fn invalid_config_is_reported() {
    let root = empty_project("config");
    std::fs::write(root.join("swag-config.json"), "{ not json").unwrap();
    let output = run_swag(&root, &["show", "User"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("invalid configuration"));
}
