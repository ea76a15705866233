//! Keycap lookup command.

use crate::cli::common::{load_config, print_json, select_layout, CliError, CliResult};
use clap::Args;
use qmk_langmap::lang::{KeycapText, SymbolSlot};
use serde::Serialize;

/// Show the keycap text for a key in a national layout
#[derive(Debug, Clone, Args)]
pub struct KeycapArgs {
    /// Layout key (us, uk, fi); defaults to the configured layout
    #[arg(short, long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// USB HID usage code (decimal or 0x-prefixed hex)
    #[arg(
        short,
        long,
        value_name = "CODE",
        value_parser = parse_usbcode,
        conflicts_with = "keycode",
        required_unless_present = "keycode"
    )]
    pub usbcode: Option<u16>,

    /// QMK keycode (e.g., "KC_SCLN")
    #[arg(short, long, value_name = "KEYCODE")]
    pub keycode: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KeycapResult {
    layout: String,
    usbcode: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    keycode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    keycap: KeycapText,
    produces_symbol: bool,
    dead_keys: Vec<SymbolSlot>,
}

impl KeycapArgs {
    /// Execute the keycap command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let (layout_key, mapping) = select_layout(self.layout.as_deref(), &config)?;

        let (usbcode, keycode) = match (self.usbcode, &self.keycode) {
            (Some(usbcode), _) => (usbcode, None),
            (None, Some(keycode)) => {
                let usbcode = mapping.resolver().usbcode(keycode).ok_or_else(|| {
                    CliError::validation(format!("Keycode '{keycode}' has no USB usage code"))
                })?;
                (usbcode, Some(keycode.clone()))
            }
            (None, None) => {
                return Err(CliError::validation(
                    "Either --usbcode or --keycode must be specified",
                ))
            }
        };

        let keycap = mapping.keycap_text_from_usbcode(usbcode).ok_or_else(|| {
            CliError::validation(format!(
                "Usage code {usbcode:#04x} is not mapped in layout '{layout_key}'"
            ))
        })?;

        let keycode =
            keycode.or_else(|| mapping.resolver().keycode_for(usbcode).map(str::to_string));

        let result = KeycapResult {
            layout: layout_key.to_string(),
            usbcode,
            keycode,
            name: mapping.entry(usbcode).and_then(|entry| entry.name.clone()),
            keycap,
            produces_symbol: mapping.produces_symbol(usbcode),
            dead_keys: mapping.dead_key_slots(usbcode),
        };

        if self.json || config.output.json {
            print_json(&result)?;
        } else {
            output_human_readable(&result);
        }

        Ok(())
    }
}

fn output_human_readable(result: &KeycapResult) {
    println!("Layout:   {}", result.layout);
    match &result.keycode {
        Some(keycode) => println!("Key:      {} ({:#04x})", keycode, result.usbcode),
        None => println!("Key:      {:#04x}", result.usbcode),
    }
    if let Some(name) = &result.name {
        println!("Name:     {name}");
    }

    let positions = [
        ("Top left", &result.keycap.topleft),
        ("Top right", &result.keycap.topright),
        ("Center left", &result.keycap.centerleft),
        ("Center", &result.keycap.centered),
        ("Center right", &result.keycap.centerright),
        ("Bottom left", &result.keycap.bottomleft),
        ("Bottom right", &result.keycap.bottomright),
    ];
    for (label, value) in positions {
        if let Some(text) = value.as_deref().filter(|text| !text.is_empty()) {
            println!("{:<13} {}", format!("{label}:"), text);
        }
    }

    if !result.dead_keys.is_empty() {
        let slots: Vec<String> = result
            .dead_keys
            .iter()
            .map(|slot| format!("{slot:?}").to_lowercase())
            .collect();
        println!("Dead keys: {}", slots.join(", "));
    }
}

/// Parses a usage code given as decimal or 0x-prefixed hex.
fn parse_usbcode(value: &str) -> Result<u16, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    };

    parsed.map_err(|e| format!("invalid usage code '{value}': {e}"))
}
