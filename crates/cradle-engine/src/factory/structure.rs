//! Struct factory
//!
//! Sugar over [`FunctionType`]: a constructor is synthesized that allocates
//! `T::default()` and assigns the resolved arguments to the declared fields
//! in order. Fewer arguments than fields are allowed, more are not.

use std::any;
use std::sync::Arc;

use cradle_domain::{Callable, Error, Instance, Result, Shape, Signature, Structure, Value};

use super::function::FunctionType;
use super::{Factory, TypeFactory, from_result};
use crate::resolver::ParameterResolver;

/// Allocates a struct target and fills its fields positionally
#[derive(Debug, Clone)]
pub struct StructType {
    target: &'static str,
    function: FunctionType,
}

impl StructType {
    /// Build a struct factory for `T`
    pub fn new<T: Structure>(arguments: Vec<Value>) -> TypeFactory {
        from_result(Self::try_new::<T>(arguments), TypeFactory::Struct)
    }

    fn try_new<T: Structure>(arguments: Vec<Value>) -> Result<Self> {
        let target = any::type_name::<T>();
        let fields = T::fields();
        if arguments.len() > fields.len() {
            return Err(Error::construction(format!(
                "the struct {target} has only {} fields but {} arguments were provided",
                fields.len(),
                arguments.len()
            )));
        }

        let params = fields[..arguments.len()]
            .iter()
            .map(|field| field.shape().clone())
            .collect();
        let signature = Signature::new(params).returning(Shape::pointer::<T>());

        let constructor = Callable::new(target, signature, |values: Vec<Value>| {
            let mut instance = T::default();
            for (index, value) in values.into_iter().enumerate() {
                instance.assign(index, value)?;
            }
            Ok(Value::Instance(Instance::component(Arc::new(instance))))
        });

        let function = FunctionType::try_new(Value::Callable(constructor), arguments)?;
        Ok(Self { target, function })
    }

    /// Rust type name of the target struct
    pub fn target(&self) -> &'static str {
        self.target
    }
}

impl Factory for StructType {
    fn arguments(&self) -> Vec<Value> {
        self.function.arguments()
    }

    fn generate(&self, resolver: &ParameterResolver<'_>) -> Result<Value> {
        self.function.generate(resolver)
    }
}
