//! Instance and func factories

use cradle_domain::{Error, Result, Value};

use super::{Factory, TypeFactory, from_result};
use crate::resolver::ParameterResolver;

/// Hands out a value that was built outside the container
#[derive(Debug, Clone)]
pub struct InstanceType {
    value: Value,
}

impl InstanceType {
    /// Register an existing value; null is rejected
    pub fn new(value: impl Into<Value>) -> TypeFactory {
        let value = value.into();
        if value.is_null() {
            return TypeFactory::invalid(Error::construction("the given instance must not be null"));
        }
        TypeFactory::Instance(Self { value })
    }
}

impl Factory for InstanceType {
    fn arguments(&self) -> Vec<Value> {
        Vec::new()
    }

    fn generate(&self, _resolver: &ParameterResolver<'_>) -> Result<Value> {
        Ok(self.value.clone())
    }
}

/// Registers a callable as the component itself
///
/// Retrieval yields the callable; it is never invoked by the container.
#[derive(Debug, Clone)]
pub struct FuncType {
    function: Value,
}

impl FuncType {
    /// Register `function`, which must be a callable
    pub fn new(function: impl Into<Value>) -> TypeFactory {
        from_result(Self::try_new(function.into()), TypeFactory::Func)
    }

    fn try_new(function: Value) -> Result<Self> {
        match function {
            Value::Callable(_) => Ok(Self { function }),
            other => Err(Error::construction(format!(
                "the given function must be a callable (given {})",
                other.kind()
            ))),
        }
    }
}

impl Factory for FuncType {
    fn arguments(&self) -> Vec<Value> {
        Vec::new()
    }

    fn generate(&self, _resolver: &ParameterResolver<'_>) -> Result<Value> {
        Ok(self.function.clone())
    }
}
