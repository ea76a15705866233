//! HID modifier key identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight HID modifier keys.
///
/// Serialized with the QMK long names (`KC_LSHIFT`, `KC_RALT`, ...);
/// the short forms are accepted when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKey {
    /// Left Control
    #[serde(rename = "KC_LCTRL", alias = "KC_LCTL")]
    LeftCtrl,
    /// Left Shift
    #[serde(rename = "KC_LSHIFT", alias = "KC_LSFT")]
    LeftShift,
    /// Left Alt / Option
    #[serde(rename = "KC_LALT", alias = "KC_LOPT")]
    LeftAlt,
    /// Left GUI / Command / Windows
    #[serde(rename = "KC_LGUI", alias = "KC_LCMD", alias = "KC_LWIN")]
    LeftGui,
    /// Right Control
    #[serde(rename = "KC_RCTRL", alias = "KC_RCTL")]
    RightCtrl,
    /// Right Shift
    #[serde(rename = "KC_RSHIFT", alias = "KC_RSFT")]
    RightShift,
    /// Right Alt, AltGr on ISO layouts
    #[serde(rename = "KC_RALT", alias = "KC_ALGR", alias = "KC_ROPT")]
    RightAlt,
    /// Right GUI / Command / Windows
    #[serde(rename = "KC_RGUI", alias = "KC_RCMD", alias = "KC_RWIN")]
    RightGui,
}

impl ModifierKey {
    /// All modifiers in HID bit order.
    pub const ALL: [Self; 8] = [
        Self::LeftCtrl,
        Self::LeftShift,
        Self::LeftAlt,
        Self::LeftGui,
        Self::RightCtrl,
        Self::RightShift,
        Self::RightAlt,
        Self::RightGui,
    ];

    /// Parses a QMK modifier keycode, accepting long and short names.
    #[must_use]
    pub fn from_keycode(keycode: &str) -> Option<Self> {
        match keycode {
            "KC_LCTRL" | "KC_LCTL" | "KC_LEFT_CTRL" => Some(Self::LeftCtrl),
            "KC_LSHIFT" | "KC_LSFT" | "KC_LEFT_SHIFT" => Some(Self::LeftShift),
            "KC_LALT" | "KC_LOPT" | "KC_LEFT_ALT" => Some(Self::LeftAlt),
            "KC_LGUI" | "KC_LCMD" | "KC_LWIN" | "KC_LEFT_GUI" => Some(Self::LeftGui),
            "KC_RCTRL" | "KC_RCTL" | "KC_RIGHT_CTRL" => Some(Self::RightCtrl),
            "KC_RSHIFT" | "KC_RSFT" | "KC_RIGHT_SHIFT" => Some(Self::RightShift),
            "KC_RALT" | "KC_ALGR" | "KC_ROPT" | "KC_RIGHT_ALT" => Some(Self::RightAlt),
            "KC_RGUI" | "KC_RCMD" | "KC_RWIN" | "KC_RIGHT_GUI" => Some(Self::RightGui),
            _ => None,
        }
    }

    /// The canonical QMK keycode used in serialized output.
    #[must_use]
    pub const fn keycode(self) -> &'static str {
        match self {
            Self::LeftCtrl => "KC_LCTRL",
            Self::LeftShift => "KC_LSHIFT",
            Self::LeftAlt => "KC_LALT",
            Self::LeftGui => "KC_LGUI",
            Self::RightCtrl => "KC_RCTRL",
            Self::RightShift => "KC_RSHIFT",
            Self::RightAlt => "KC_RALT",
            Self::RightGui => "KC_RGUI",
        }
    }

    /// Returns true for either shift key.
    #[must_use]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::LeftShift | Self::RightShift)
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keycode())
    }
}
