//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use clap::{Args, Subcommand};
use qmk_langmap::config::Config;
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Default layout key (us, uk, fi)
    #[arg(long, value_name = "LAYOUT")]
    layout: Option<String>,

    /// Print JSON by default (true or false)
    #[arg(long, value_name = "BOOL")]
    json_output: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    exists: bool,
    default_layout: String,
    json_output: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let config_file = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))?;

        let output = ConfigOutput {
            config_file: config_file.to_string_lossy().to_string(),
            exists: config_file.exists(),
            default_layout: config.layout.default.clone(),
            json_output: config.output.json,
        };

        if self.json {
            print_json(&output)?;
        } else {
            println!("Config file:    {}", output.config_file);
            if !output.exists {
                println!("                (not created yet, showing defaults)");
            }
            println!("Default layout: {}", output.default_layout);
            println!("JSON output:    {}", output.json_output);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.layout.is_none() && self.json_output.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --layout or --json-output",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(layout) = &self.layout {
            config.layout.default.clone_from(layout);
        }
        if let Some(json) = self.json_output {
            config.output.json = json;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(e.to_string()))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}
