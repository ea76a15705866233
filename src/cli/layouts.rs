//! Built-in layout listing command.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use clap::Args;
use qmk_langmap::lang::{LayoutRegistry, ReferenceKeyboard};
use serde::Serialize;

/// List the built-in national layouts
#[derive(Debug, Clone, Args)]
pub struct LayoutsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LayoutInfo {
    key: String,
    lang: String,
    name: String,
    reference_keyboard: ReferenceKeyboard,
    reference_keyboard_name: String,
    key_count: usize,
    default: bool,
}

impl LayoutsArgs {
    /// Execute the layouts command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let registry = LayoutRegistry::global()
            .map_err(|e| CliError::io(format!("Failed to load layouts: {e:#}")))?;

        let layouts: Vec<LayoutInfo> = registry
            .iter()
            .map(|(key, mapping)| LayoutInfo {
                key: key.to_string(),
                lang: mapping.lang().to_string(),
                name: mapping.name().to_string(),
                reference_keyboard: mapping.reference_keyboard(),
                reference_keyboard_name: mapping.reference_keyboard().display_name().to_string(),
                key_count: mapping.len(),
                default: key == config.layout.default,
            })
            .collect();

        if self.json || config.output.json {
            print_json(&layouts)?;
        } else {
            for layout in &layouts {
                let marker = if layout.default { "*" } else { " " };
                println!(
                    "{} {:<4} {:<14} {:<8} {}",
                    marker, layout.key, layout.name, layout.lang, layout.reference_keyboard_name
                );
            }
        }

        Ok(())
    }
}
