//! Key expression rendering command.

use crate::cli::common::{load_config, print_json, select_layout, CliError, CliResult};
use clap::Args;
use qmk_langmap::lang::KeyExpr;
use serde::Serialize;

/// Render QMK keycode expressions for a national layout
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Keycode expressions (e.g., "KC_7", "LSFT(KC_7)", "LT(1, KC_SCLN)")
    #[arg(value_name = "EXPR", required = true)]
    pub exprs: Vec<String>,

    /// Layout key (us, uk, fi); defaults to the configured layout
    #[arg(short, long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RenderResult {
    input: String,
    rendered: KeyExpr,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let (_, mapping) = select_layout(self.layout.as_deref(), &config)?;

        let results = self
            .exprs
            .iter()
            .map(|input| {
                let expr = KeyExpr::parse(input)
                    .map_err(|e| CliError::validation(format!("{e:#}")))?;
                Ok(RenderResult {
                    input: input.clone(),
                    rendered: mapping.render_expr(&expr),
                })
            })
            .collect::<CliResult<Vec<_>>>()?;

        if self.json || config.output.json {
            print_json(&results)?;
        } else {
            let width = results.iter().map(|r| r.input.len()).max().unwrap_or(0);
            for result in &results {
                println!("{:<width$}  =>  {}", result.input, result.rendered.label());
            }
        }

        Ok(())
    }
}
