//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the qmk-langmap binary
pub fn langmap_bin() -> &'static str {
    env!("CARGO_BIN_EXE_qmk-langmap")
}

/// Creates an empty config directory so tests never touch the user's config.
pub fn temp_config_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp config dir")
}

/// Writes `config.toml` into `config_dir`.
pub fn write_config(config_dir: &Path, content: &str) {
    fs::write(config_dir.join("config.toml"), content).expect("Failed to write config");
}

/// Runs the binary with an isolated config directory.
pub fn run_isolated(args: &[&str], config_dir: &Path) -> Output {
    Command::new(langmap_bin())
        .env("QMK_LANGMAP_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Runs the binary with a fresh isolated config directory.
pub fn run(args: &[&str]) -> Output {
    let config_dir = temp_config_dir();
    run_isolated(args, config_dir.path())
}

/// Parses stdout as JSON, panicking with stderr on failure.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Should parse JSON ({e}). stdout: {stdout}, stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}
