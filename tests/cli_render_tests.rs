//! End-to-end tests for `qmk-langmap render` command.

mod fixtures;

use fixtures::*;

#[test]
fn test_render_shifted_symbol_json() {
    let output = run(&["render", "--layout", "fi", "--json", "LSFT(KC_7)"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let results = stdout_json(&output);
    assert_eq!(results[0]["input"], "LSFT(KC_7)");
    assert_eq!(
        results[0]["rendered"],
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
fn test_render_multiple_expressions() {
    let output = run(&[
        "render",
        "--layout",
        "uk",
        "--json",
        "KC_QUOT",
        "KC_DEL",
        "\"hi\"",
        "LT(1, KC_NUHS)",
    ]);

    assert_eq!(output.status.code(), Some(0));

    let results = stdout_json(&output);
    let results = results.as_array().expect("Should be an array");
    assert_eq!(results.len(), 4);

    assert_eq!(results[0]["rendered"]["type"], "langsymbol");
    assert_eq!(results[0]["rendered"]["symbol"], "'");
    assert_eq!(results[1]["rendered"]["type"], "langkeycode");
    assert_eq!(results[1]["rendered"]["rendered"]["centered"], "Delete");
    assert_eq!(results[2]["rendered"], serde_json::json!({"type": "text", "text": "hi"}));
    assert_eq!(results[3]["rendered"]["type"], "function");
    assert_eq!(results[3]["rendered"]["rendered"]["centered"], "#");
}

#[test]
fn test_render_plain_output() {
    let output = run(&["render", "--layout", "fi", "RALT(KC_7)", "KC_QUOT"]);

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("RALT(KC_7)"));
    assert!(lines[0].ends_with("=>  {"));
    assert!(lines[1].ends_with("=>  ä"));
}

#[test]
fn test_render_invalid_expression_fails() {
    let output = run(&["render", "--layout", "us", "LSFT(KC_A"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid key expression"));
}

#[test]
fn test_render_requires_expression() {
    let output = run(&["render", "--layout", "us"]);

    assert_ne!(output.status.code(), Some(0));
}
