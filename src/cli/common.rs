//! Shared CLI plumbing: error type, exit codes, layout selection.

use qmk_langmap::config::Config;
use qmk_langmap::constants::APP_BINARY_NAME;
use qmk_langmap::lang::{LanguageMapping, LayoutRegistry};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Bad input: unknown layout, unmapped key, unparsable expression
    ValidationError = 1,
    /// Failed to read/write files or load embedded data
    IoError = 2,
}

/// Error returned by CLI command handlers.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the config, falling back to defaults if it can't be read.
pub fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        warn!("Ignoring unreadable configuration: {e:#}");
        Config::default()
    })
}

/// Picks the layout named by `--layout`, or the configured default.
pub fn select_layout(
    layout: Option<&str>,
    config: &Config,
) -> CliResult<(&'static str, &'static LanguageMapping)> {
    let registry = LayoutRegistry::global()
        .map_err(|e| CliError::io(format!("Failed to load layouts: {e:#}")))?;

    let key = layout.unwrap_or(config.layout.default.as_str());

    registry
        .iter()
        .find(|(registered, _)| *registered == key)
        .ok_or_else(|| {
            CliError::validation(format!(
                "Unknown layout '{key}'. Available layouts: {} (see `{APP_BINARY_NAME} layouts`)",
                registry.keys().join(", ")
            ))
        })
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
