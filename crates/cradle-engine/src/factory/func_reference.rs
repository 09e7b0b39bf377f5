//! Func reference factory

use cradle_domain::{Error, Result, TypeReference, Value};

use super::{Factory, TypeFactory, from_result};
use crate::resolver::ParameterResolver;

/// Exposes one member of another registered type as a bound callable
#[derive(Debug, Clone)]
pub struct FuncReferenceType {
    reference: TypeReference,
}

impl FuncReferenceType {
    /// Build a reference to `member` of `type_id`
    pub fn new(type_id: &str, member: &str) -> TypeFactory {
        from_result(Self::try_new(type_id, member), TypeFactory::FuncReference)
    }

    fn try_new(type_id: &str, member: &str) -> Result<Self> {
        if type_id.is_empty() {
            return Err(Error::construction("the referenced type ID must not be empty"));
        }
        if member.is_empty() {
            return Err(Error::construction(format!(
                "the referenced member of {type_id:?} must not be empty"
            )));
        }
        Ok(Self {
            reference: TypeReference::with_member(type_id, member),
        })
    }

    /// The referenced type and member
    pub fn reference(&self) -> &TypeReference {
        &self.reference
    }
}

impl Factory for FuncReferenceType {
    fn arguments(&self) -> Vec<Value> {
        vec![Value::Str(self.reference.to_string())]
    }

    fn generate(&self, resolver: &ParameterResolver<'_>) -> Result<Value> {
        resolver.retrieve(&self.reference)
    }
}
