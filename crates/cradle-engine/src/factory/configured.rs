//! Configured factory
//!
//! Wraps another factory and hands each freshly generated instance to a
//! configurator member (`@configurator::Method`) before returning it.

use cradle_domain::{Error, Result, TypeReference, Value};
use tracing::trace;

use super::{Factory, TypeFactory};
use crate::resolver::ParameterResolver;

/// Runs a configurator over the instance produced by an embedded factory
#[derive(Debug, Clone)]
pub struct ConfiguredType {
    embedded: Box<TypeFactory>,
    configurator: TypeReference,
}

impl ConfiguredType {
    /// Configure instances of `embedded` with `configurator_id::method`
    ///
    /// An invalid embedded factory makes the configured factory invalid with
    /// the same error.
    pub fn new(embedded: TypeFactory, configurator_id: &str, method: &str) -> TypeFactory {
        if let Some(err) = embedded.construction_error() {
            return TypeFactory::invalid(err.clone());
        }
        if configurator_id.is_empty() || method.is_empty() {
            return TypeFactory::invalid(Error::construction(format!(
                "configurator type ID and method must not be empty (given {configurator_id:?}, {method:?})"
            )));
        }
        TypeFactory::Configured(Self {
            embedded: Box::new(embedded),
            configurator: TypeReference::with_member(configurator_id, method),
        })
    }

    /// The configurator type and method
    pub fn configurator(&self) -> &TypeReference {
        &self.configurator
    }
}

impl Factory for ConfiguredType {
    fn arguments(&self) -> Vec<Value> {
        let mut arguments = self.embedded.arguments();
        arguments.push(Value::Str(self.configurator.to_string()));
        arguments
    }

    fn generate(&self, resolver: &ParameterResolver<'_>) -> Result<Value> {
        let instance = self.embedded.generate(resolver)?;

        let configure = resolver.retrieve(&self.configurator)?;
        let Value::Callable(configure) = configure else {
            return Err(Error::InvalidReference {
                type_id: self.configurator.id().to_string(),
                instance_type: configure.type_name(),
            });
        };

        trace!(configurator = %self.configurator, "Configuring instance");
        configure.call(vec![instance.clone()])?;
        Ok(instance)
    }
}
