//! Tests for the built-in layouts through the public library API.

use qmk_langmap::keycode::{KeycodeResolver, ModifierKey, UsbKeycodeTable};
use qmk_langmap::lang::{KeyExpr, KeycapText, LanguageMapping, LayoutRegistry, SymbolSlot};

fn registry() -> LayoutRegistry {
    LayoutRegistry::load().expect("Failed to load built-in layouts")
}

fn usbcode(keycode: &str) -> u16 {
    UsbKeycodeTable::load()
        .unwrap()
        .usbcode(keycode)
        .unwrap_or_else(|| panic!("{keycode} should resolve"))
}

fn layout<'a>(registry: &'a LayoutRegistry, key: &str) -> &'a LanguageMapping {
    registry.get(key).unwrap_or_else(|| panic!("layout {key} missing"))
}

#[test]
fn test_unmapped_usbcodes_have_no_keycap() {
    let registry = registry();
    for (_, mapping) in registry.iter() {
        for code in 0..=0xFF_u16 {
            if mapping.entry(code).is_none() {
                assert_eq!(mapping.keycap_text_from_usbcode(code), None);
            }
        }
    }
}

#[test]
fn test_keycap_rule_holds_for_every_entry() {
    let registry = registry();
    for (key, mapping) in registry.iter() {
        for entry in mapping.entries() {
            let keycap = mapping.keycap_text_from_usbcode(entry.usbcode).unwrap();
            let expected = if entry.has_glyphs() {
                KeycapText {
                    bottomleft: Some(entry.bottomleft.clone()),
                    topleft: Some(entry.topleft.clone()),
                    bottomright: Some(entry.bottomright.clone()),
                    topright: Some(entry.topright.clone()),
                    centerleft: Some(entry.centerleft.clone()),
                    centered: Some(entry.centered.clone()),
                    centerright: Some(entry.centerright.clone()),
                }
            } else {
                KeycapText {
                    bottomleft: Some(entry.normal.clone()),
                    topleft: Some(entry.shifted.clone()),
                    bottomright: Some(entry.altgr.clone()),
                    topright: Some(entry.altgrshifted.clone()),
                    ..KeycapText::default()
                }
            };
            assert_eq!(keycap, expected, "{key} usbcode {:#04x}", entry.usbcode);
        }
    }
}

#[test]
fn test_us_seven_keycap() {
    let registry = registry();
    let keycap = layout(&registry, "us")
        .keycap_text_from_usbcode(usbcode("KC_7"))
        .unwrap();

    assert_eq!(
        keycap,
        KeycapText {
            bottomleft: Some("7".to_string()),
            topleft: Some(String::new()),
            bottomright: Some(String::new()),
            topright: Some(String::new()),
            ..KeycapText::default()
        }
    );
}

#[test]
fn test_finnish_shift_seven_renders_slash() {
    let registry = registry();
    let expr = KeyExpr::mod_result("KC_7", vec![ModifierKey::LeftShift]);

    let rendered = layout(&registry, "fi").render_expr(&expr);

    assert_eq!(
        serde_json::to_value(&rendered).unwrap(),
        serde_json::json!({
            "type": "langsymbol",
            "keycode": "KC_7",
            "rendered": {"centered": "/"},
            "mods": ["KC_LSHIFT"],
            "symbol": "/"
        })
    );
}

#[test]
fn test_bare_keycode_symbol_is_not_uppercased() {
    let registry = registry();
    let KeyExpr::LangSymbol(node) = layout(&registry, "fi").render_expr(&KeyExpr::keycode("KC_QUOT"))
    else {
        panic!("expected langsymbol");
    };
    assert_eq!(node.symbol, "ä");
}

#[test]
fn test_shift_uppercases_centered_glyph() {
    let registry = registry();
    let expr = KeyExpr::mod_result("KC_LBRC", vec![ModifierKey::RightShift]);
    let rendered = layout(&registry, "fi").render_expr(&expr);
    assert_eq!(rendered.rendered().unwrap().centered.as_deref(), Some("Å"));
}

#[test]
fn test_altgr_shift_selects_altgrshifted_slot() {
    let registry = registry();
    let uk = layout(&registry, "uk");
    let a = usbcode("KC_A");
    assert_eq!(uk.symbol(SymbolSlot::AltGrShifted, a), "Á");

    let expr = KeyExpr::mod_result("KC_A", vec![ModifierKey::RightAlt, ModifierKey::RightShift]);
    let KeyExpr::LangSymbol(node) = uk.render_expr(&expr) else {
        panic!("expected langsymbol");
    };
    assert_eq!(node.symbol, "Á");
    assert_ne!(node.symbol, uk.symbol(SymbolSlot::AltGr, a));
    assert_ne!(node.symbol, uk.symbol(SymbolSlot::Shifted, a));
}

#[test]
fn test_three_modifiers_fall_back_to_normal() {
    let registry = registry();
    let expr = KeyExpr::mod_result(
        "KC_A",
        vec![ModifierKey::RightAlt, ModifierKey::RightShift, ModifierKey::LeftCtrl],
    );

    let KeyExpr::ModResult(node) = layout(&registry, "uk").render_expr(&expr) else {
        panic!("expected modresult");
    };
    assert_eq!(node.rendered.centered.as_deref(), Some("A"));
    assert_eq!(node.mods.len(), 3);
}

#[test]
fn test_text_render_is_identity_everywhere() {
    let registry = registry();
    for (_, mapping) in registry.iter() {
        for text in ["", "KC_A", "hello", "ä"] {
            let expr = KeyExpr::text(text);
            assert_eq!(mapping.render_expr(&expr), expr);
        }
    }
}

#[test]
fn test_uk_altgr_four_is_euro() {
    let registry = registry();
    let rendered = layout(&registry, "uk").render_expr(&KeyExpr::parse("RALT(KC_4)").unwrap());
    assert_eq!(rendered.label(), "€");
}

#[test]
fn test_us_shift_digit_falls_back_to_digit() {
    // US rows only carry the unshifted symbol
    let registry = registry();
    let rendered = layout(&registry, "us").render_expr(&KeyExpr::parse("LSFT(KC_7)").unwrap());
    let KeyExpr::ModResult(node) = rendered else {
        panic!("expected modresult");
    };
    assert_eq!(node.rendered.centered.as_deref(), Some("7"));
}

#[test]
fn test_finnish_dead_keys() {
    let registry = registry();
    let fi = layout(&registry, "fi");
    assert_eq!(
        fi.dead_key_slots(usbcode("KC_EQL")),
        vec![SymbolSlot::Normal, SymbolSlot::Shifted]
    );
    assert!(fi.dead_key_slots(usbcode("KC_A")).is_empty());
}

#[test]
fn test_iso_key_only_on_iso_layouts() {
    let registry = registry();
    let nubs = usbcode("KC_NUBS");
    assert!(layout(&registry, "us").keycap_text_from_usbcode(nubs).is_none());
    assert!(layout(&registry, "uk").produces_symbol(nubs));
    assert_eq!(layout(&registry, "fi").symbol(SymbolSlot::AltGr, nubs), "|");
}

#[test]
fn test_render_is_stable_on_its_own_output() {
    let registry = registry();
    let fi = layout(&registry, "fi");
    for input in ["KC_A", "KC_ENT", "LSFT(KC_2)", "RALT(KC_E)", "LT(2, KC_SCLN)"] {
        let once = fi.render_expr(&KeyExpr::parse(input).unwrap());
        let twice = fi.render_expr(&once);
        assert_eq!(once, twice, "{input}");
    }
}
