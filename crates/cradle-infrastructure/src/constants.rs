//! Infrastructure layer constants
//!
//! Syntax constants of raw arguments live in `cradle_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cradle.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cradle";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CRADLE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "CRADLE_LOG";

/// File name prefix of rolled log files
pub const DEFAULT_LOG_FILE_PREFIX: &str = "cradle";
