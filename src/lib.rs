//! QMK Langmap Library
//!
//! National keyboard layout tables for QMK keycodes: which symbols a key
//! produces under each modifier state, what is printed on its keycap, and
//! how keycode expressions render for a given layout.
//!
//! ```
//! use qmk_langmap::lang::{KeyExpr, LayoutRegistry};
//!
//! let registry = LayoutRegistry::load().unwrap();
//! let finnish = registry.get("fi").unwrap();
//! let rendered = finnish.render_expr(&KeyExpr::parse("LSFT(KC_7)").unwrap());
//! assert_eq!(rendered.label(), "/");
//! ```

// Module declarations
pub mod config;
pub mod constants;
pub mod keycode;
pub mod lang;
