//! Application configuration

use std::collections::BTreeMap;

use cradle_domain::{Error, Result, Value};
use cradle_engine::Parameters;
use serde::{Deserialize, Serialize};

use super::{LoggingConfig, ValidationConfig};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging
    pub logging: LoggingConfig,

    /// Container validation
    pub validation: ValidationConfig,

    /// Values substituted for `%name%` placeholders
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl AppConfig {
    /// The `[parameters]` table as container parameters
    ///
    /// # Errors
    ///
    /// Fails for a value with no container counterpart, such as an integer
    /// above `i64::MAX`.
    pub fn container_parameters(&self) -> Result<Parameters> {
        self.parameters
            .iter()
            .map(|(name, value)| match Value::try_from(value.clone()) {
                Ok(value) => Ok((name.clone(), value)),
                Err(Error::Configuration { message }) => Err(Error::configuration(format!(
                    "parameter '{name}': {message}"
                ))),
                Err(other) => Err(other),
            })
            .collect()
    }
}
