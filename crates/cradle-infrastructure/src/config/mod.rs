//! Configuration
//!
//! ```text
//! AppConfig::default() → cradle.toml → CRADLE_* environment → AppConfig
//! ```

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
