//! Function factory

use cradle_domain::{Callable, Error, Result, Value};
use tracing::trace;

use super::{Factory, TypeFactory, from_result};
use crate::resolver::ParameterResolver;

/// Invokes a constructor callable with resolved arguments
#[derive(Debug, Clone)]
pub struct FunctionType {
    constructor: Callable,
    arguments: Vec<Value>,
}

impl FunctionType {
    /// Build a function factory
    ///
    /// The result is [`TypeFactory::Invalid`] if:
    /// - `constructor` is not a callable,
    /// - it declares zero or more than one return value,
    /// - its return shape is neither pointer- nor interface-like,
    /// - the argument count does not match its fixed arity (for variadic
    ///   constructors, fewer arguments than fixed parameters).
    pub fn new(constructor: impl Into<Value>, arguments: Vec<Value>) -> TypeFactory {
        from_result(
            Self::try_new(constructor.into(), arguments),
            TypeFactory::Function,
        )
    }

    pub(crate) fn try_new(constructor: Value, arguments: Vec<Value>) -> Result<Self> {
        let constructor = match constructor {
            Value::Callable(callable) => callable,
            other => {
                return Err(Error::construction(format!(
                    "the given constructor must be a callable (given {})",
                    other.kind()
                )));
            }
        };

        check_constructor(&constructor, arguments.len())?;
        Ok(Self {
            constructor,
            arguments,
        })
    }

    /// The wrapped constructor
    pub fn constructor(&self) -> &Callable {
        &self.constructor
    }
}

impl Factory for FunctionType {
    fn arguments(&self) -> Vec<Value> {
        self.arguments.clone()
    }

    fn generate(&self, resolver: &ParameterResolver<'_>) -> Result<Value> {
        let resolved = resolve_arguments(&self.constructor, &self.arguments, resolver)?;
        trace!(constructor = self.constructor.name(), "Invoking constructor");
        self.constructor.call(resolved)
    }
}

/// Eager return-shape and arity checks for a constructor
pub(crate) fn check_constructor(constructor: &Callable, argument_count: usize) -> Result<()> {
    let signature = constructor.signature();

    let [returned] = signature.returns() else {
        return Err(Error::construction(format!(
            "invalid number of return parameters: {}",
            signature.returns().len()
        )));
    };
    if !returned.is_reference_like() {
        return Err(Error::construction(format!(
            "return parameter is no interface or pointer but a {returned}"
        )));
    }

    let fixed = signature.fixed_arity();
    if signature.is_variadic() {
        if argument_count < fixed {
            return Err(Error::construction(format!(
                "invalid number of input parameters for variadic function: got {argument_count} but expected at least {fixed}"
            )));
        }
    } else if argument_count != fixed {
        return Err(Error::construction(format!(
            "invalid number of input parameters: got {argument_count} but expected {fixed}"
        )));
    }

    Ok(())
}

/// Resolve raw arguments against a constructor's signature
///
/// Fixed arguments resolve against their positional shape; a variadic tail
/// resolves element-wise and is packed, in order, into one trailing list.
pub(crate) fn resolve_arguments(
    constructor: &Callable,
    arguments: &[Value],
    resolver: &ParameterResolver<'_>,
) -> Result<Vec<Value>> {
    let signature = constructor.signature();
    let fixed = signature.fixed_arity();
    let mut resolved = Vec::with_capacity(fixed + 1);

    for (index, (raw, expected)) in arguments.iter().zip(signature.params()).enumerate() {
        let value = resolver
            .resolve(raw, expected)
            .map_err(|err| enrich(constructor, err, index))?;
        resolved.push(value);
    }

    if let Some(element) = signature.variadic() {
        let tail = arguments
            .iter()
            .enumerate()
            .skip(fixed)
            .map(|(index, raw)| {
                resolver
                    .resolve(raw, element)
                    .map_err(|err| enrich(constructor, err, index))
            })
            .collect::<Result<Vec<_>>>()?;
        resolved.push(Value::List(tail));
    }

    Ok(resolved)
}

/// Attach the constructor and argument position to a resolution error
fn enrich(constructor: &Callable, err: Error, index: usize) -> Error {
    match err {
        Error::InvalidReference {
            type_id,
            instance_type,
        } => Error::TypeReference {
            type_id,
            instance_type,
            position: index + 1,
            constructor: constructor.name().to_string(),
            signature: constructor.signature().to_string(),
        },
        other => other.at_position(index + 1),
    }
}
