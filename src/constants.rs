//! Application-wide constants.

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "qmk-langmap";

/// Directory name under the platform config directory.
pub const APP_CONFIG_DIR_NAME: &str = "qmk-langmap";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "QMK_LANGMAP_CONFIG_DIR";
