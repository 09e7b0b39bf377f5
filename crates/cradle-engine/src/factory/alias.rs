//! Alias factory

use cradle_domain::{Error, Result, TypeReference, Value};

use super::{Factory, TypeFactory, from_result};
use crate::resolver::ParameterResolver;

/// Delegates generation to another registered type
///
/// With a member suffix (`id::Member`) the alias becomes the member callable
/// bound to the target instance instead of the instance itself.
#[derive(Debug, Clone)]
pub struct AliasType {
    target: TypeReference,
}

impl AliasType {
    /// Build an alias for `target` (`id` or `id::Member`)
    pub fn new(target: &str) -> TypeFactory {
        from_result(Self::try_new(target), TypeFactory::Alias)
    }

    fn try_new(target: &str) -> Result<Self> {
        let target = TypeReference::from_id(target);
        if target.id().is_empty() {
            return Err(Error::construction("the aliased type ID must not be empty"));
        }
        if target.member().is_some_and(str::is_empty) {
            return Err(Error::construction(format!(
                "the aliased member of {:?} must not be empty",
                target.id()
            )));
        }
        Ok(Self { target })
    }

    /// The aliased reference
    pub fn target(&self) -> &TypeReference {
        &self.target
    }
}

impl Factory for AliasType {
    fn arguments(&self) -> Vec<Value> {
        vec![Value::Str(self.target.to_string())]
    }

    fn generate(&self, resolver: &ParameterResolver<'_>) -> Result<Value> {
        resolver.retrieve(&self.target)
    }
}
