//! Proxy factory
//!
//! For factory objects whose creation method needs further constructor
//! arguments: the member is extracted from the referenced instance and
//! invoked right away, and its result becomes the generated instance.

use cradle_domain::{Error, Result, TypeReference, Value};
use tracing::trace;

use super::function::{check_constructor, resolve_arguments};
use super::{Factory, TypeFactory, from_result};
use crate::resolver::ParameterResolver;

/// Builds an instance by invoking a member of another registered type
#[derive(Debug, Clone)]
pub struct ProxyType {
    reference: TypeReference,
    arguments: Vec<Value>,
}

impl ProxyType {
    /// Build a proxy invoking `member` of `type_id` with `arguments`
    pub fn new(type_id: &str, member: &str, arguments: Vec<Value>) -> TypeFactory {
        from_result(Self::try_new(type_id, member, arguments), TypeFactory::Proxy)
    }

    fn try_new(type_id: &str, member: &str, arguments: Vec<Value>) -> Result<Self> {
        if type_id.is_empty() {
            return Err(Error::construction("the proxied type ID must not be empty"));
        }
        if member.is_empty() {
            return Err(Error::construction(format!(
                "the proxied member of {type_id:?} must not be empty"
            )));
        }
        Ok(Self {
            reference: TypeReference::with_member(type_id, member),
            arguments,
        })
    }

    /// The proxied type and member
    pub fn reference(&self) -> &TypeReference {
        &self.reference
    }
}

impl Factory for ProxyType {
    fn arguments(&self) -> Vec<Value> {
        let mut arguments = Vec::with_capacity(self.arguments.len() + 1);
        arguments.push(Value::Str(self.reference.to_string()));
        arguments.extend(self.arguments.iter().cloned());
        arguments
    }

    fn generate(&self, resolver: &ParameterResolver<'_>) -> Result<Value> {
        let member = resolver.retrieve(&self.reference)?;
        let Value::Callable(method) = member else {
            return Err(Error::InvalidReference {
                type_id: self.reference.id().to_string(),
                instance_type: member.type_name(),
            });
        };

        // the member's signature is only known once the target exists
        check_constructor(&method, self.arguments.len())?;
        let resolved = resolve_arguments(&method, &self.arguments, resolver)?;
        trace!(member = %self.reference, "Invoking proxied member");
        method.call(resolved)
    }
}
