//! Invalid factory

use cradle_domain::{Error, Result, Value};

use super::Factory;
use crate::resolver::ParameterResolver;

/// A descriptor that failed its construction checks
///
/// Generation always fails with the recorded error; the descriptor is never
/// re-checked.
#[derive(Debug, Clone)]
pub struct InvalidType {
    error: Error,
}

impl InvalidType {
    /// Record `error` permanently
    pub fn new(error: Error) -> Self {
        Self { error }
    }

    /// The recorded construction error
    pub fn error(&self) -> &Error {
        &self.error
    }
}

impl Factory for InvalidType {
    fn arguments(&self) -> Vec<Value> {
        Vec::new()
    }

    fn generate(&self, _resolver: &ParameterResolver<'_>) -> Result<Value> {
        Err(self.error.clone())
    }
}
