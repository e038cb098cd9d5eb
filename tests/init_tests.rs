//! Tests for the `init` command
//!
//! Tests starter config creation and that existing configs are kept

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::fixtures;

/// Helper to get the limit-pack binary command
fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_limit-pack"));
    cmd.env("NO_EMOJI", "1");
    cmd
}

#[test]
fn test_init_creates_starter_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");

    get_bin()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .size-limit.toml"));

    let config_path = temp_dir.path().join(".size-limit.toml");
    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).expect("Failed to read file contents");
    assert!(contents.contains("check"));
    assert!(contents.contains("\"index.js\""));
}

#[test]
fn test_init_with_cwd_writes_into_that_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let project = temp_dir.path().join("widgets");
    fs::create_dir_all(&project).unwrap();

    get_bin()
        .arg("init")
        .arg("--cwd")
        .arg(&project)
        .assert()
        .success();

    let contents = fs::read_to_string(project.join(".size-limit.toml")).unwrap();
    assert!(contents.contains("project = \"widgets\""));
}

#[test]
fn test_init_keeps_existing_config() {
    let project = fixtures::create_project_with_checks().expect("Failed to create fixture");
    let config_path = project.path().join(".size-limit.toml");
    let before = fs::read_to_string(&config_path).unwrap();

    get_bin()
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&config_path).unwrap(), before);
}

#[test]
fn test_init_then_config_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    fs::write(temp_dir.path().join("index.js"), "export default 1\n").unwrap();

    get_bin()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    get_bin()
        .env_remove("NODE_ENV")
        .arg("config")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("index.js"));
}
