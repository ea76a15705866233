//! Key expressions and their rendered forms.
//!
//! A [`KeyExpr`] is either input to [`LanguageMapping::render_expr`]
//! (a bare keycode, a text literal, a keycode with modifiers, or a QMK
//! function node) or one of the annotated nodes it produces.
//!
//! [`LanguageMapping::render_expr`]: super::LanguageMapping::render_expr

use super::KeycapText;
use crate::keycode::ModifierKey;
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A keycode pressed together with a set of modifiers, e.g. `LSFT(KC_7)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModResult {
    /// Base keycode
    pub keycode: String,
    /// Active modifiers, outermost first
    pub mods: Vec<ModifierKey>,
    /// Rendering annotations
    #[serde(default, skip_serializing_if = "KeycapText::is_empty")]
    pub rendered: KeycapText,
}

/// Keycode that produces a symbol in the current layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangSymbol {
    /// Base keycode
    pub keycode: String,
    /// Keycap text to display
    pub rendered: KeycapText,
    /// Modifiers the symbol was produced with
    pub mods: Vec<ModifierKey>,
    /// The produced symbol, as stored in the layout
    pub symbol: String,
}

/// Keycode for a non-symbol key with printed keycap text (Enter, Delete, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangKeycode {
    /// Base keycode
    pub keycode: String,
    /// Keycap text to display
    pub rendered: KeycapText,
}

/// Any other QMK function (`LT(1, KC_A)`, `MO(2)`, ...).
///
/// `rendered.centered` may hold a keycode still waiting to be translated
/// to the layout's symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name (e.g., "LT")
    pub name: String,
    /// Raw arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// Rendering annotations
    #[serde(default)]
    pub rendered: KeycapText,
}

/// Key expression tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KeyExpr {
    /// Bare keycode (e.g., `KC_7`)
    Keycode {
        /// QMK keycode
        keycode: String,
    },
    /// Literal text, already final
    Text {
        /// The text
        text: String,
    },
    /// Keycode with modifiers
    ModResult(ModResult),
    /// Rendered symbol-producing key
    LangSymbol(LangSymbol),
    /// Rendered named key
    LangKeycode(LangKeycode),
    /// Other QMK function
    Function(FunctionCall),
}

impl KeyExpr {
    /// Bare keycode node.
    #[must_use]
    pub fn keycode(keycode: impl Into<String>) -> Self {
        Self::Keycode {
            keycode: keycode.into(),
        }
    }

    /// Text literal node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Modifier result node with no rendering yet.
    #[must_use]
    pub fn mod_result(keycode: impl Into<String>, mods: Vec<ModifierKey>) -> Self {
        Self::ModResult(ModResult {
            keycode: keycode.into(),
            mods,
            rendered: KeycapText::default(),
        })
    }

    /// Rendering annotations, for node kinds that carry them.
    #[must_use]
    pub fn rendered(&self) -> Option<&KeycapText> {
        match self {
            Self::Keycode { .. } | Self::Text { .. } => None,
            Self::ModResult(node) => Some(&node.rendered),
            Self::LangSymbol(node) => Some(&node.rendered),
            Self::LangKeycode(node) => Some(&node.rendered),
            Self::Function(node) => Some(&node.rendered),
        }
    }

    /// Copy of `self` with only `rendered.centered` replaced.
    ///
    /// Nodes without rendering annotations are returned as-is.
    #[must_use]
    pub fn with_centered(&self, text: impl Into<String>) -> Self {
        match self {
            Self::Keycode { .. } | Self::Text { .. } => self.clone(),
            Self::ModResult(node) => Self::ModResult(ModResult {
                rendered: node.rendered.with_centered(text),
                ..node.clone()
            }),
            Self::LangSymbol(node) => Self::LangSymbol(LangSymbol {
                rendered: node.rendered.with_centered(text),
                ..node.clone()
            }),
            Self::LangKeycode(node) => Self::LangKeycode(LangKeycode {
                rendered: node.rendered.with_centered(text),
                ..node.clone()
            }),
            Self::Function(node) => Self::Function(FunctionCall {
                rendered: node.rendered.with_centered(text),
                ..node.clone()
            }),
        }
    }

    /// Short label for plain-text output: the centered glyph when set,
    /// otherwise the symbol, keycode or text.
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(centered) = self.rendered().and_then(|r| r.centered.as_deref()) {
            if !centered.is_empty() {
                return centered.to_string();
            }
        }

        match self {
            Self::Keycode { keycode } => keycode.clone(),
            Self::Text { text } => text.clone(),
            Self::ModResult(node) => node.keycode.clone(),
            Self::LangSymbol(node) => node.symbol.clone(),
            Self::LangKeycode(node) => node.keycode.clone(),
            Self::Function(node) => format!("{}({})", node.name, node.args.join(", ")),
        }
    }

    /// Parses a QMK keycode expression.
    ///
    /// Accepts bare keycodes (`KC_A`), quoted text (`"hello"`), modifier
    /// wrappers that nest into one [`ModResult`] (`RALT(LSFT(KC_2))`), and
    /// any other function call (`LT(1, KC_A)`).
    ///
    /// # Examples
    ///
    /// ```
    /// use qmk_langmap::keycode::ModifierKey;
    /// use qmk_langmap::lang::KeyExpr;
    ///
    /// let expr = KeyExpr::parse("LSFT(KC_7)").unwrap();
    /// assert_eq!(expr, KeyExpr::mod_result("KC_7", vec![ModifierKey::LeftShift]));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Empty key expression");
        }

        if let Some(rest) = input.strip_prefix('"') {
            let Some(text) = rest.strip_suffix('"') else {
                bail!("Unterminated string literal: {input}");
            };
            return Ok(Self::text(text));
        }

        let ident_regex =
            Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").context("Invalid identifier pattern")?;
        if ident_regex.is_match(input) {
            return Ok(Self::keycode(input));
        }

        let call_regex = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)$")
            .context("Invalid function pattern")?;
        let Some(caps) = call_regex.captures(input) else {
            bail!("Invalid key expression: {input}");
        };
        let name = &caps[1];
        let args = split_args(&caps[2]).context(format!("Invalid key expression: {input}"))?;

        if let Some(wrapper_mods) = modifier_wrapper(name) {
            if args.len() != 1 {
                bail!("{name}() takes exactly one argument, got {}", args.len());
            }
            return match Self::parse(&args[0])? {
                Self::Keycode { keycode } => Ok(Self::mod_result(keycode, wrapper_mods.to_vec())),
                Self::ModResult(inner) => {
                    let mut mods = wrapper_mods.to_vec();
                    mods.extend(inner.mods);
                    Ok(Self::mod_result(inner.keycode, mods))
                }
                _ => bail!("{name}() must wrap a keycode: {input}"),
            };
        }

        let rendered = match args.last() {
            Some(last) if ident_regex.is_match(last) => KeycapText::centered(last.clone()),
            _ => KeycapText::default(),
        };

        Ok(Self::Function(FunctionCall {
            name: name.to_string(),
            args,
            rendered,
        }))
    }
}

/// Modifiers applied by a QMK modifier wrapper function.
fn modifier_wrapper(name: &str) -> Option<&'static [ModifierKey]> {
    use ModifierKey::{LeftAlt, LeftCtrl, LeftGui, LeftShift, RightAlt, RightCtrl, RightGui, RightShift};

    let mods: &'static [ModifierKey] = match name {
        "LSFT" | "S" => &[LeftShift],
        "RSFT" => &[RightShift],
        "LCTL" | "C" => &[LeftCtrl],
        "RCTL" => &[RightCtrl],
        "LALT" | "A" | "LOPT" => &[LeftAlt],
        "RALT" | "ALGR" | "ROPT" => &[RightAlt],
        "LGUI" | "G" | "LCMD" | "LWIN" => &[LeftGui],
        "RGUI" | "RCMD" | "RWIN" => &[RightGui],
        "LCS" => &[LeftCtrl, LeftShift],
        "LSA" => &[LeftShift, LeftAlt],
        "RSA" | "SAGR" => &[RightShift, RightAlt],
        _ => return None,
    };

    Some(mods)
}

/// Splits function arguments on top-level commas.
fn split_args(args: &str) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;

    for ch in args.chars() {
        match ch {
            '"' => {
                in_string = !in_string;
                current.push(ch);
            }
            '(' if !in_string => {
                depth += 1;
                current.push(ch);
            }
            ')' if !in_string => {
                if depth == 0 {
                    bail!("Unbalanced ')'");
                }
                depth -= 1;
                current.push(ch);
            }
            ',' if !in_string && depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if depth != 0 {
        bail!("Unbalanced '('");
    }
    if in_string {
        bail!("Unterminated string literal");
    }

    let last = current.trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last.to_string());
    }
    if parts.iter().any(String::is_empty) {
        bail!("Empty argument");
    }

    Ok(parts)
}
