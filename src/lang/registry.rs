//! Built-in national layouts.
//!
//! The registry is fixed at compile time: each layout's rows are embedded
//! from `data/<key>.json` and paired with the physical keyboard standard
//! the layout is drawn against.

use super::{LanguageMapping, SharedResolver};
use crate::keycode::UsbKeycodeTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Physical keyboard standard a layout is designed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKeyboard {
    /// ANSI 104-key
    Ansi104,
    /// ISO 105-key
    Iso105,
}

impl ReferenceKeyboard {
    /// Human-readable name (e.g., "ISO 105-key").
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ansi104 => "ANSI 104-key",
            Self::Iso105 => "ISO 105-key",
        }
    }
}

impl fmt::Display for ReferenceKeyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Static description of one built-in layout.
struct LayoutSource {
    key: &'static str,
    lang: &'static str,
    name: &'static str,
    reference_keyboard: ReferenceKeyboard,
    data: &'static str,
}

const LAYOUT_SOURCES: &[LayoutSource] = &[
    LayoutSource {
        key: "us",
        lang: "en-US",
        name: "English (US)",
        reference_keyboard: ReferenceKeyboard::Ansi104,
        data: include_str!("data/us.json"),
    },
    LayoutSource {
        key: "uk",
        lang: "en-GB",
        name: "English (UK)",
        reference_keyboard: ReferenceKeyboard::Iso105,
        data: include_str!("data/uk.json"),
    },
    LayoutSource {
        key: "fi",
        lang: "fi-FI",
        name: "Finnish",
        reference_keyboard: ReferenceKeyboard::Iso105,
        data: include_str!("data/fi.json"),
    },
];

static GLOBAL_REGISTRY: OnceLock<LayoutRegistry> = OnceLock::new();

/// Read-only table of built-in layouts, keyed by layout key ("us", "uk", "fi").
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    keys: Vec<String>,
    layouts: HashMap<String, LanguageMapping>,
}

impl LayoutRegistry {
    /// Builds all built-in layouts from the embedded data.
    pub fn load() -> Result<Self> {
        let resolver: SharedResolver =
            Arc::new(UsbKeycodeTable::load().context("Failed to load keycode table")?);
        Self::load_with_resolver(resolver)
    }

    /// Builds all built-in layouts using a custom key-code resolver.
    pub fn load_with_resolver(resolver: SharedResolver) -> Result<Self> {
        let mut keys = Vec::with_capacity(LAYOUT_SOURCES.len());
        let mut layouts = HashMap::with_capacity(LAYOUT_SOURCES.len());

        for source in LAYOUT_SOURCES {
            let mapping = LanguageMapping::from_json(
                source.lang,
                source.name,
                source.reference_keyboard,
                source.data,
                Arc::clone(&resolver),
            )
            .context(format!("Failed to load built-in layout '{}'", source.key))?;

            debug!(
                key = source.key,
                lang = source.lang,
                keys = mapping.len(),
                "loaded layout"
            );

            keys.push(source.key.to_string());
            layouts.insert(source.key.to_string(), mapping);
        }

        Ok(Self { keys, layouts })
    }

    /// Process-wide registry, built on first access.
    pub fn global() -> Result<&'static Self> {
        if let Some(registry) = GLOBAL_REGISTRY.get() {
            return Ok(registry);
        }

        let registry = Self::load()?;
        Ok(GLOBAL_REGISTRY.get_or_init(|| registry))
    }

    /// Gets a layout by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LanguageMapping> {
        self.layouts.get(key)
    }

    /// Returns true if `key` names a built-in layout.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.layouts.contains_key(key)
    }

    /// Layout keys in registration order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Iterates `(key, mapping)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageMapping)> {
        self.keys
            .iter()
            .filter_map(|key| self.layouts.get(key).map(|mapping| (key.as_str(), mapping)))
    }

    /// Number of layouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the registry has no layouts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Keys of all built-in layouts, without loading them.
#[must_use]
pub fn builtin_layout_keys() -> Vec<&'static str> {
    LAYOUT_SOURCES.iter().map(|source| source.key).collect()
}
