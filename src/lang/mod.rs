//! National keyboard layout tables.
//!
//! A [`LanguageMapping`] answers two questions for one national layout:
//! which glyphs are printed on the keycap for a USB usage code, and how a
//! [`KeyExpr`] should be annotated for display under that layout.

pub mod expr;
pub mod registry;
mod render;

pub use expr::{FunctionCall, KeyExpr, LangKeycode, LangSymbol, ModResult};
pub use registry::{LayoutRegistry, ReferenceKeyboard};

use crate::keycode::KeycodeResolver;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One of the four modifier states a key can produce a symbol in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolSlot {
    /// No modifiers
    Normal,
    /// Shift
    Shifted,
    /// AltGr (right alt)
    #[serde(rename = "altgr")]
    AltGr,
    /// AltGr + Shift
    #[serde(rename = "altgrshifted")]
    AltGrShifted,
}

impl SymbolSlot {
    /// Parses a slot name as used in the layout data (`normal`, `altgr`, ...).
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "normal" => Ok(Self::Normal),
            "shifted" => Ok(Self::Shifted),
            "altgr" => Ok(Self::AltGr),
            "altgrshifted" => Ok(Self::AltGrShifted),
            other => bail!("Unknown symbol slot '{other}'"),
        }
    }
}

/// One physical key of a national layout, keyed by USB usage code.
///
/// Empty strings mean "nothing": no symbol in that modifier state, or no
/// text printed at that keycap position. Every field except `usbcode` may
/// be omitted from a data row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    /// USB HID usage code
    pub usbcode: u16,
    /// Symbol produced without modifiers
    #[serde(default)]
    pub normal: String,
    /// Symbol produced with shift
    #[serde(default)]
    pub shifted: String,
    /// Symbol produced with AltGr
    #[serde(default)]
    pub altgr: String,
    /// Symbol produced with AltGr + shift
    #[serde(default)]
    pub altgrshifted: String,
    /// Space-separated list of slots that are dead keys
    #[serde(default)]
    pub deadkeys: String,
    /// Keycap text, bottom left corner
    #[serde(default)]
    pub bottomleft: String,
    /// Keycap text, top left corner
    #[serde(default)]
    pub topleft: String,
    /// Keycap text, bottom right corner
    #[serde(default)]
    pub bottomright: String,
    /// Keycap text, top right corner
    #[serde(default)]
    pub topright: String,
    /// Keycap text, center left
    #[serde(default)]
    pub centerleft: String,
    /// Keycap text, center
    #[serde(default)]
    pub centered: String,
    /// Keycap text, center right
    #[serde(default)]
    pub centerright: String,
    /// Display name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LayoutEntry {
    /// Returns the symbol stored in `slot`.
    #[must_use]
    pub fn symbol(&self, slot: SymbolSlot) -> &str {
        match slot {
            SymbolSlot::Normal => &self.normal,
            SymbolSlot::Shifted => &self.shifted,
            SymbolSlot::AltGr => &self.altgr,
            SymbolSlot::AltGrShifted => &self.altgrshifted,
        }
    }

    /// Returns true if any of the seven keycap positions has text.
    #[must_use]
    pub fn has_glyphs(&self) -> bool {
        [
            &self.bottomleft,
            &self.topleft,
            &self.bottomright,
            &self.topright,
            &self.centerleft,
            &self.centered,
            &self.centerright,
        ]
        .iter()
        .any(|glyph| !glyph.is_empty())
    }

    /// Parses `deadkeys` into slots.
    pub fn dead_key_slots(&self) -> Result<Vec<SymbolSlot>> {
        self.deadkeys
            .split_whitespace()
            .map(SymbolSlot::parse)
            .collect()
    }
}

/// Text printed at each position of a physical keycap.
///
/// `None` means the position is unset, as opposed to explicitly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeycapText {
    /// Bottom left corner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottomleft: Option<String>,
    /// Top left corner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topleft: Option<String>,
    /// Bottom right corner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottomright: Option<String>,
    /// Top right corner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topright: Option<String>,
    /// Center left
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centerleft: Option<String>,
    /// Center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centered: Option<String>,
    /// Center right
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centerright: Option<String>,
}

impl KeycapText {
    /// Keycap with a single centered label.
    #[must_use]
    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            centered: Some(text.into()),
            ..Self::default()
        }
    }

    /// Returns true if no position is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Copy of `self` with only the centered position replaced.
    #[must_use]
    pub fn with_centered(&self, text: impl Into<String>) -> Self {
        Self {
            centered: Some(text.into()),
            ..self.clone()
        }
    }
}

/// Pluggable keycap lookup for layouts whose keycaps don't follow the
/// default glyph/symbol rule.
pub type KeycapLookup = Arc<dyn Fn(&LanguageMapping, u16) -> Option<KeycapText> + Send + Sync>;

/// Shared key-code resolver handle.
pub type SharedResolver = Arc<dyn KeycodeResolver + Send + Sync>;

/// Symbol and keycap table for one national keyboard layout.
///
/// Immutable after construction; cheap to clone.
#[derive(Clone)]
pub struct LanguageMapping {
    lang: String,
    name: String,
    reference_keyboard: ReferenceKeyboard,
    entries: Arc<HashMap<u16, LayoutEntry>>,
    resolver: SharedResolver,
    keycap_lookup: Option<KeycapLookup>,
}

impl fmt::Debug for LanguageMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageMapping")
            .field("lang", &self.lang)
            .field("name", &self.name)
            .field("reference_keyboard", &self.reference_keyboard)
            .field("entries", &self.entries.len())
            .field("custom_keycap_lookup", &self.keycap_lookup.is_some())
            .finish()
    }
}

impl LanguageMapping {
    /// Builds a mapping from layout rows.
    ///
    /// Duplicate usage codes keep the last row. Fails if a row lists an
    /// unknown dead-key slot.
    pub fn from_rows(
        lang: impl Into<String>,
        name: impl Into<String>,
        reference_keyboard: ReferenceKeyboard,
        rows: Vec<LayoutEntry>,
        resolver: SharedResolver,
    ) -> Result<Self> {
        let lang = lang.into();
        let mut entries = HashMap::with_capacity(rows.len());

        for row in rows {
            row.dead_key_slots().context(format!(
                "Invalid deadkeys for usbcode {:#04x} in layout '{lang}'",
                row.usbcode
            ))?;
            entries.insert(row.usbcode, row);
        }

        Ok(Self {
            lang,
            name: name.into(),
            reference_keyboard,
            entries: Arc::new(entries),
            resolver,
            keycap_lookup: None,
        })
    }

    /// Builds a mapping from a JSON array of layout rows.
    pub fn from_json(
        lang: impl Into<String>,
        name: impl Into<String>,
        reference_keyboard: ReferenceKeyboard,
        json: &str,
        resolver: SharedResolver,
    ) -> Result<Self> {
        let lang = lang.into();
        let rows: Vec<LayoutEntry> = serde_json::from_str(json)
            .context(format!("Failed to parse layout data for '{lang}'"))?;

        Self::from_rows(lang, name, reference_keyboard, rows, resolver)
    }

    /// Replaces the keycap lookup used by [`Self::keycap_text_from_usbcode`].
    ///
    /// The custom lookup can call [`Self::default_keycap_text`] to fall back
    /// to the standard rule.
    #[must_use]
    pub fn with_keycap_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&LanguageMapping, u16) -> Option<KeycapText> + Send + Sync + 'static,
    {
        self.keycap_lookup = Some(Arc::new(lookup));
        self
    }

    /// Language code (e.g., "fi-FI").
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Display name (e.g., "Finnish").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical keyboard standard this layout is drawn against.
    #[must_use]
    pub fn reference_keyboard(&self) -> ReferenceKeyboard {
        self.reference_keyboard
    }

    /// Key-code resolver used for rendering.
    #[must_use]
    pub fn resolver(&self) -> &dyn KeycodeResolver {
        self.resolver.as_ref()
    }

    /// Gets the row for a usage code.
    #[must_use]
    pub fn entry(&self, usbcode: u16) -> Option<&LayoutEntry> {
        self.entries.get(&usbcode)
    }

    /// All rows sorted by usage code.
    #[must_use]
    pub fn entries(&self) -> Vec<&LayoutEntry> {
        let mut entries: Vec<&LayoutEntry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.usbcode);
        entries
    }

    /// Number of mapped keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots of `usbcode` that are dead keys. Empty for unmapped codes.
    #[must_use]
    pub fn dead_key_slots(&self, usbcode: u16) -> Vec<SymbolSlot> {
        self.entry(usbcode)
            .and_then(|entry| entry.dead_key_slots().ok())
            .unwrap_or_default()
    }

    /// Returns the text printed on the keycap for `usbcode`.
    ///
    /// `None` if the key isn't part of this layout.
    #[must_use]
    pub fn keycap_text_from_usbcode(&self, usbcode: u16) -> Option<KeycapText> {
        match &self.keycap_lookup {
            Some(lookup) => lookup(self, usbcode),
            None => self.default_keycap_text(usbcode),
        }
    }

    /// Standard keycap rule: explicit glyph positions win entirely,
    /// otherwise the four symbol slots go to the four corners.
    #[must_use]
    pub fn default_keycap_text(&self, usbcode: u16) -> Option<KeycapText> {
        let entry = self.entry(usbcode)?;

        if entry.has_glyphs() {
            return Some(KeycapText {
                bottomleft: Some(entry.bottomleft.clone()),
                topleft: Some(entry.topleft.clone()),
                bottomright: Some(entry.bottomright.clone()),
                topright: Some(entry.topright.clone()),
                centerleft: Some(entry.centerleft.clone()),
                centered: Some(entry.centered.clone()),
                centerright: Some(entry.centerright.clone()),
            });
        }

        Some(KeycapText {
            bottomleft: Some(entry.normal.clone()),
            topleft: Some(entry.shifted.clone()),
            bottomright: Some(entry.altgr.clone()),
            topright: Some(entry.altgrshifted.clone()),
            ..KeycapText::default()
        })
    }

    /// Returns true if the key produces a symbol in any modifier state.
    pub fn produces_symbol(&self, usbcode: u16) -> bool {
        self.entry(usbcode).is_some_and(|entry| {
            !(entry.normal.is_empty()
                && entry.shifted.is_empty()
                && entry.altgr.is_empty()
                && entry.altgrshifted.is_empty())
        })
    }

    /// Symbol in `slot`, or "" for unmapped codes.
    pub fn symbol(&self, slot: SymbolSlot, usbcode: u16) -> &str {
        self.entry(usbcode).map_or("", |entry| entry.symbol(slot))
    }

    /// Stored centered glyph, or "" for unmapped codes.
    pub fn centered_text(&self, usbcode: u16) -> &str {
        self.entry(usbcode).map_or("", |entry| entry.centered.as_str())
    }
}
