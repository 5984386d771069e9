//! Configuration layering tests.
//!
//! Verifies project-local config discovery, CLI precedence and config
//! validation warnings, without requiring the classifier model.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn photo_pick() -> Command {
    Command::cargo_bin("photo-pick").unwrap()
}

/// A workspace with a product folder and an isolated XDG config home.
struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("product")).unwrap();
        fs::create_dir(root.path().join("xdg")).unwrap();
        Self { root }
    }

    fn write_project_config(&self, content: &str) {
        fs::write(self.root.path().join(".photo-pick.toml"), content).unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = photo_pick();
        cmd.current_dir(self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join("xdg"))
            .env("HOME", self.root.path());
        cmd
    }
}

#[test]
fn test_project_config_models_dir_is_used() {
    let ws = Workspace::new();
    let models_dir = ws.root.path().join("custom-models");
    fs::create_dir(&models_dir).unwrap();
    ws.write_project_config(&format!(
        "[models]\ndir = \"{}\"\n",
        models_dir.display()
    ));

    // The model lookup fails, but in the directory the config named.
    let mut cmd = ws.command();
    cmd.arg("--quiet").arg("product");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("custom-models"));
}

#[test]
fn test_cli_models_dir_overrides_config() {
    let ws = Workspace::new();
    let config_dir = ws.root.path().join("config-models");
    let cli_dir = ws.root.path().join("cli-models");
    fs::create_dir(&config_dir).unwrap();
    fs::create_dir(&cli_dir).unwrap();
    ws.write_project_config(&format!(
        "[models]\ndir = \"{}\"\n",
        config_dir.display()
    ));

    let mut cmd = ws.command();
    cmd.arg("--quiet")
        .arg("--models-dir")
        .arg(&cli_dir)
        .arg("product");
    cmd.assert()
        .code(2)
        .stderr(
            predicate::str::contains("cli-models")
                .and(predicate::str::contains("config-models").not()),
        );
}

#[test]
fn test_invalid_config_value_warns() {
    let ws = Workspace::new();
    ws.write_project_config("[general]\nnum_best = 0\n");

    let mut cmd = ws.command();
    cmd.arg("--quiet").arg("product");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("num_best"));
}

#[test]
fn test_config_found_in_parent_directory() {
    let ws = Workspace::new();
    let models_dir = ws.root.path().join("parent-models");
    fs::create_dir(&models_dir).unwrap();
    ws.write_project_config(&format!(
        "[models]\ndir = \"{}\"\n",
        models_dir.display()
    ));

    // Run from the nested product folder; config sits one level up.
    let mut cmd = photo_pick();
    cmd.current_dir(ws.root.path().join("product"))
        .env("XDG_CONFIG_HOME", ws.root.path().join("xdg"))
        .env("HOME", ws.root.path())
        .arg("--quiet")
        .arg(".");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("parent-models"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_xdg_config_is_loaded() {
    let ws = Workspace::new();
    let models_dir = ws.root.path().join("xdg-models");
    fs::create_dir(&models_dir).unwrap();
    let config_dir = ws.root.path().join("xdg").join("photo-pick");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!("[models]\ndir = \"{}\"\n", models_dir.display()),
    )
    .unwrap();

    let mut cmd = ws.command();
    cmd.arg("--quiet").arg("product");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("xdg-models"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_project_config_overrides_xdg() {
    let ws = Workspace::new();
    let xdg_models = ws.root.path().join("xdg-models");
    let project_models = ws.root.path().join("project-models");
    fs::create_dir(&xdg_models).unwrap();
    fs::create_dir(&project_models).unwrap();

    let config_dir = ws.root.path().join("xdg").join("photo-pick");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!("[models]\ndir = \"{}\"\n", xdg_models.display()),
    )
    .unwrap();
    ws.write_project_config(&format!(
        "[models]\ndir = \"{}\"\n",
        project_models.display()
    ));

    let mut cmd = ws.command();
    cmd.arg("--quiet").arg("product");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("project-models"));
}
