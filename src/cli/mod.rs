//! CLI command handlers for qmk-langmap.
//!
//! This module provides headless, scriptable access to the layout tables
//! for automation and testing.

pub mod common;
pub mod config;
pub mod keycap;
pub mod layouts;
pub mod render;

pub use common::{CliError, ExitCode};
pub use config::ConfigArgs;
pub use keycap::KeycapArgs;
pub use layouts::LayoutsArgs;
pub use render::RenderArgs;
