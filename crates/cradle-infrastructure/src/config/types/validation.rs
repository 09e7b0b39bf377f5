//! Validation configuration types

use cradle_domain::Result;
use cradle_validate::{ContainerValidator, ValidationMode};
use serde::{Deserialize, Serialize};

/// Which constraints run before the container is handed out, and how
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Fail at the first violation or collect all of them
    pub mode: ValidationMode,

    /// Constraint names to run, in order; every registered one when unset
    pub constraints: Option<Vec<String>>,
}

impl ValidationConfig {
    /// Build the configured validator
    ///
    /// # Errors
    ///
    /// Fails for an unknown constraint name.
    pub fn validator(&self) -> Result<ContainerValidator> {
        let validator = match &self.constraints {
            Some(names) => ContainerValidator::with_constraints(names)?,
            None => ContainerValidator::with_defaults(),
        };
        Ok(validator.with_mode(self.mode))
    }
}
