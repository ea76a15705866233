//! QMK keycode to USB HID usage code resolution.
//!
//! This module provides the embedded keycode table that maps QMK basic
//! keycodes (and their aliases) to the HID usage codes that national
//! layout tables are keyed by.

mod modifier;

pub use modifier::ModifierKey;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves key code names to USB HID usage codes.
///
/// Language mappings only rely on this capability, so callers with their
/// own keycode database can plug it in instead of [`UsbKeycodeTable`].
pub trait KeycodeResolver {
    /// Returns true if `value` names a key code this resolver knows about.
    fn is_keycode(&self, value: &str) -> bool;

    /// Maps a key code to its USB usage code, or `None` if it has no
    /// physical key (layer keys, macros, unknown names).
    fn usbcode(&self, keycode: &str) -> Option<u16>;

    /// Reverse lookup: the canonical key code on the key at `usbcode`.
    fn keycode_for(&self, _usbcode: u16) -> Option<&str> {
        None
    }
}

/// Individual keycode row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsbKeycode {
    /// Canonical QMK keycode (e.g., "`KC_A`", "`KC_NUBS`")
    pub code: String,
    /// USB HID usage code on the keyboard/keypad page
    pub usbcode: u16,
    /// Alternative keycode names
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Database schema from usb_keycodes.json.
#[derive(Debug, Clone, Deserialize)]
struct UsbKeycodeDatabase {
    #[allow(dead_code)]
    version: String,
    keycodes: Vec<UsbKeycode>,
}

/// Keycode table with O(1) lookup by code or alias.
#[derive(Debug, Clone)]
pub struct UsbKeycodeTable {
    keycodes: Vec<UsbKeycode>,
    lookup: HashMap<String, usize>,
}

impl UsbKeycodeTable {
    /// Loads the keycode table from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("usb_keycodes.json");
        let db: UsbKeycodeDatabase = serde_json::from_str(json_data)
            .context("Failed to parse embedded usb_keycodes.json")?;

        Ok(Self::from_keycodes(db.keycodes))
    }

    /// Builds a table from explicit rows. Later rows win on name clashes.
    #[must_use]
    pub fn from_keycodes(keycodes: Vec<UsbKeycode>) -> Self {
        let mut lookup = HashMap::new();

        for (idx, keycode) in keycodes.iter().enumerate() {
            lookup.insert(keycode.code.clone(), idx);
            for alias in &keycode.aliases {
                lookup.insert(alias.clone(), idx);
            }
        }

        Self { keycodes, lookup }
    }

    /// Gets a keycode row by code or alias.
    #[must_use]
    pub fn get(&self, keycode: &str) -> Option<&UsbKeycode> {
        let idx = self.lookup.get(keycode)?;
        self.keycodes.get(*idx)
    }

    /// Gets the total number of canonical keycodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keycodes.len()
    }

    /// Returns true if the table has no keycodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keycodes.is_empty()
    }
}

impl KeycodeResolver for UsbKeycodeTable {
    fn is_keycode(&self, value: &str) -> bool {
        self.lookup.contains_key(value)
    }

    fn usbcode(&self, keycode: &str) -> Option<u16> {
        self.get(keycode).map(|k| k.usbcode)
    }

    fn keycode_for(&self, usbcode: u16) -> Option<&str> {
        self.keycodes
            .iter()
            .find(|k| k.usbcode == usbcode)
            .map(|k| k.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_table() -> UsbKeycodeTable {
        UsbKeycodeTable::load().expect("Failed to load keycode table")
    }

    #[test]
    fn test_load_table() {
        let table = get_test_table();
        assert!(table.len() > 100);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_letters_and_digits() {
        let table = get_test_table();
        assert_eq!(table.usbcode("KC_A"), Some(0x04));
        assert_eq!(table.usbcode("KC_Z"), Some(0x1D));
        assert_eq!(table.usbcode("KC_1"), Some(0x1E));
        assert_eq!(table.usbcode("KC_7"), Some(0x24));
        assert_eq!(table.usbcode("KC_0"), Some(0x27));
    }

    #[test]
    fn test_aliases_resolve_to_same_usage() {
        let table = get_test_table();
        assert_eq!(table.usbcode("KC_ENTER"), table.usbcode("KC_ENT"));
        assert_eq!(table.usbcode("KC_NONUS_BACKSLASH"), Some(0x64));
        assert_eq!(table.usbcode("KC_ALGR"), Some(0xE6));
        assert_eq!(table.get("KC_DELETE").unwrap().code, "KC_DEL");
    }

    #[test]
    fn test_is_keycode() {
        let table = get_test_table();
        assert!(table.is_keycode("KC_SCLN"));
        assert!(table.is_keycode("KC_LSHIFT"));
        assert!(!table.is_keycode("KC_TRNS"));
        assert!(!table.is_keycode("ä"));
        assert!(!table.is_keycode(""));
    }

    #[test]
    fn test_non_physical_keycodes_unresolvable() {
        let table = get_test_table();
        assert_eq!(table.usbcode("MO(1)"), None);
        assert_eq!(table.usbcode("KC_NO"), None);
    }

    #[test]
    fn test_keycode_for_usbcode() {
        let table = get_test_table();
        assert_eq!(table.keycode_for(0x33), Some("KC_SCLN"));
        assert_eq!(table.keycode_for(0x00), None);
    }

    #[test]
    fn test_keycode_for_through_trait_object() {
        struct ForwardOnly;

        impl KeycodeResolver for ForwardOnly {
            fn is_keycode(&self, value: &str) -> bool {
                value == "KC_A"
            }

            fn usbcode(&self, keycode: &str) -> Option<u16> {
                self.is_keycode(keycode).then_some(0x04)
            }
        }

        let table = get_test_table();
        let resolver: &dyn KeycodeResolver = &table;
        assert_eq!(resolver.keycode_for(0x1F), Some("KC_2"));

        let forward_only: &dyn KeycodeResolver = &ForwardOnly;
        assert_eq!(forward_only.keycode_for(0x04), None);
    }

    #[test]
    fn test_from_keycodes_later_rows_win() {
        let table = UsbKeycodeTable::from_keycodes(vec![
            UsbKeycode {
                code: "KC_X".to_string(),
                usbcode: 1,
                aliases: vec![],
            },
            UsbKeycode {
                code: "KC_Y".to_string(),
                usbcode: 2,
                aliases: vec!["KC_X".to_string()],
            },
        ]);
        assert_eq!(table.usbcode("KC_X"), Some(2));
    }
}
