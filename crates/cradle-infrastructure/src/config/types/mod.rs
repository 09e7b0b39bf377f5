//! Configuration types module

pub mod app;
pub mod logging;
pub mod validation;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use validation::ValidationConfig;
