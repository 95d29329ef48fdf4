//! End-to-end tests for the `fledge` binary.
#![cfg(unix)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Config that replaces yarn with `true` so no network is needed.
const OFFLINE_CONFIG: &str = r#"
[commands.install]
program = "true"
args = []

[commands.fix]
program = "true"
args = []
"#;

fn fledge(workdir: &Path) -> Command {
    let config = workdir.join("fledge.toml");
    if !config.exists() {
        std::fs::write(&config, OFFLINE_CONFIG).unwrap();
    }
    let mut cmd = Command::cargo_bin("fledge").unwrap();
    cmd.current_dir(workdir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("fledge")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("fledge")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_is_usage_error() {
    Command::cargo_bin("fledge")
        .unwrap()
        .args(["init", "--frobnicate"])
        .assert()
        .code(2);
}

#[test]
fn init_creates_npm_project() {
    let temp = TempDir::new().unwrap();

    fledge(temp.path())
        .args(["init", "widget", "--scope", "@acme", "--author-name", "Ada"])
        .assert()
        .success();

    let root = temp.path().join("widget");
    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root.join("package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["name"], "@acme/widget");
    assert_eq!(manifest["homepage"], "https://github.com/acme/widget");
    assert!(manifest["engines"]["node"].as_str().is_some_and(|range| range.contains(">=")));
    assert!(root.join(".npmignore").is_file());
    assert!(!root.join("webpack.config.js").exists());
    assert!(root.join(".idea").join("widget.iml").is_file());
    assert!(root.join(".git").join("HEAD").is_file());
}

#[test]
fn init_creates_webapp_project() {
    let temp = TempDir::new().unwrap();

    fledge(temp.path())
        .args(["init", "site", "--webapp"])
        .assert()
        .success();

    let root = temp.path().join("site");
    assert!(root.join("webpack.config.js").is_file());
    assert!(!root.join(".npmignore").exists());
}

#[test]
fn init_refuses_non_empty_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("busy");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("notes.txt"), "keep me").unwrap();

    fledge(temp.path())
        .args(["init", "busy"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory not empty"));

    assert_eq!(
        std::fs::read_to_string(root.join("notes.txt")).unwrap(),
        "keep me"
    );
    assert!(!root.join("package.json").exists());
}

#[test]
fn init_refuses_file_destination() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("taken"), "").unwrap();

    fledge(temp.path())
        .args(["init", "taken"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Target exists and is not a directory",
        ));
}

#[test]
fn failed_install_is_reported_after_writing() {
    let temp = TempDir::new().unwrap();

    fledge(temp.path())
        .env("FLEDGE_COMMANDS__INSTALL__PROGRAM", "false")
        .args(["init", "widget"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Dependency installation failed"));

    assert!(temp.path().join("widget").join("package.json").is_file());
}

#[test]
fn failed_fix_is_reported() {
    let temp = TempDir::new().unwrap();

    fledge(temp.path())
        .env("FLEDGE_COMMANDS__FIX__PROGRAM", "false")
        .args(["init", "widget"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to apply code style rules"));
}

#[test]
fn invalid_package_name_is_user_error() {
    let temp = TempDir::new().unwrap();

    fledge(temp.path())
        .args(["init", "widget", "--name", "Widget"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Widget"));

    assert!(!temp.path().join("widget").exists());
}

#[test]
fn malformed_license_is_user_error() {
    let temp = TempDir::new().unwrap();

    fledge(temp.path())
        .args(["init", "widget", "--license", "MIT OR"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("MIT OR"));

    assert!(!temp.path().join("widget").exists());
}

#[test]
fn inspect_reads_generated_project() {
    let temp = TempDir::new().unwrap();
    fledge(temp.path())
        .args(["init", "widget", "--scope", "acme", "--webapp"])
        .assert()
        .success();

    let output = fledge(temp.path())
        .args(["inspect", "widget"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let project: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(project["npm_package"]["scope"], "acme");
    assert_eq!(project["npm_package"]["name"], "widget");
    assert_eq!(project["target"], "webapp");
    assert_eq!(project["git_host"]["service"], "github");
    assert!(project["node"].as_array().is_some_and(|majors| !majors.is_empty()));
}

#[test]
fn inspect_without_manifest_is_user_error() {
    let temp = TempDir::new().unwrap();

    fledge(temp.path())
        .arg("inspect")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("package.json"));
}

#[test]
fn missing_config_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();

    Command::cargo_bin("fledge")
        .unwrap()
        .current_dir(temp.path())
        .args(["--config", "absent.toml", "config", "show"])
        .assert()
        .code(4);
}

#[test]
fn config_show_prints_effective_commands() {
    let temp = TempDir::new().unwrap();

    fledge(temp.path())
        .env("FLEDGE_GIT__MODE", "command")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("program = \"true\""))
        .stdout(predicate::str::contains("mode = \"command\""));
}

#[test]
fn completions_for_bash() {
    Command::cargo_bin("fledge")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fledge"));
}
