//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the container engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration through figment |
//! | [`constants`] | Centralized configuration constants |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`bootstrap`] | Registry + configuration → validated container |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{AppContext, init_app, init_container};
pub use error_ext::ErrorContext;
