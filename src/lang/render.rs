//! Layout-aware rendering of key expressions.

use super::expr::{KeyExpr, LangKeycode, LangSymbol, ModResult};
use super::{KeycapText, LanguageMapping, SymbolSlot};
use crate::keycode::ModifierKey;
use tracing::trace;

impl LanguageMapping {
    /// Annotates one key expression with what it displays as in this layout.
    ///
    /// Never fails: whenever a lookup comes up empty the input is returned
    /// unchanged. The input itself is never modified.
    #[must_use]
    pub fn render_expr(&self, expr: &KeyExpr) -> KeyExpr {
        let rendered = match expr {
            KeyExpr::Keycode { keycode } => self.render_keycode(keycode),
            KeyExpr::Text { .. } => None,
            KeyExpr::ModResult(node) => self.render_mod_result(node),
            KeyExpr::LangSymbol(_) | KeyExpr::LangKeycode(_) | KeyExpr::Function(_) => {
                self.render_centered_keycode(expr)
            }
        };

        rendered.unwrap_or_else(|| {
            trace!(lang = %self.lang, ?expr, "expression left unchanged");
            expr.clone()
        })
    }

    /// Renders a sequence of expressions.
    #[must_use]
    pub fn render_all(&self, exprs: &[KeyExpr]) -> Vec<KeyExpr> {
        exprs.iter().map(|expr| self.render_expr(expr)).collect()
    }

    fn render_keycode(&self, keycode: &str) -> Option<KeyExpr> {
        let usbcode = self.resolver.usbcode(keycode)?;
        let keycap = self.keycap_text_from_usbcode(usbcode);
        let symbol = self.symbol(SymbolSlot::Normal, usbcode);

        if !symbol.is_empty() {
            return Some(KeyExpr::LangSymbol(LangSymbol {
                keycode: keycode.to_string(),
                rendered: keycap.unwrap_or_else(|| KeycapText::centered(symbol)),
                mods: Vec::new(),
                symbol: symbol.to_string(),
            }));
        }

        keycap.map(|rendered| {
            KeyExpr::LangKeycode(LangKeycode {
                keycode: keycode.to_string(),
                rendered,
            })
        })
    }

    fn render_mod_result(&self, node: &ModResult) -> Option<KeyExpr> {
        let usbcode = self.resolver.usbcode(&node.keycode)?;

        if let Some(symbol) = self.symbol_with_modifiers(&node.mods, usbcode) {
            return Some(KeyExpr::LangSymbol(LangSymbol {
                keycode: node.keycode.clone(),
                rendered: KeycapText::centered(symbol.to_uppercase()),
                mods: node.mods.clone(),
                symbol: symbol.to_string(),
            }));
        }

        let normal = self.symbol(SymbolSlot::Normal, usbcode);
        if normal.is_empty() {
            return None;
        }

        Some(KeyExpr::ModResult(ModResult {
            rendered: node.rendered.with_centered(normal.to_uppercase()),
            ..node.clone()
        }))
    }

    /// Translates a keycode sitting in `rendered.centered` into the
    /// layout's upper-cased symbol, or its printed label for named keys.
    fn render_centered_keycode(&self, expr: &KeyExpr) -> Option<KeyExpr> {
        let centered = expr.rendered()?.centered.as_deref()?;
        if !self.resolver.is_keycode(centered) {
            return None;
        }

        let usbcode = self.resolver.usbcode(centered)?;
        let normal = self.symbol(SymbolSlot::Normal, usbcode).to_uppercase();
        let text = if normal.is_empty() {
            self.centered_text(usbcode).to_string()
        } else {
            normal
        };

        Some(expr.with_centered(text))
    }

    /// Picks the symbol slot selected by an exact modifier combination.
    ///
    /// Shift alone selects `shifted`, right alt alone selects `altgr`, and
    /// right alt plus one shift selects `altgrshifted`. Empty slots count
    /// as no symbol.
    pub(crate) fn symbol_with_modifiers(&self, mods: &[ModifierKey], usbcode: u16) -> Option<&str> {
        let slot = match mods {
            [only] if only.is_shift() => SymbolSlot::Shifted,
            [ModifierKey::RightAlt] => SymbolSlot::AltGr,
            [ModifierKey::RightAlt, other] | [other, ModifierKey::RightAlt] if other.is_shift() => {
                SymbolSlot::AltGrShifted
            }
            _ => return None,
        };

        let symbol = self.symbol(slot, usbcode);
        (!symbol.is_empty()).then_some(symbol)
    }
}
