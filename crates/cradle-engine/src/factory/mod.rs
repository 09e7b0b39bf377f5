//! Type factories
//!
//! A [`TypeFactory`] is an immutable descriptor that knows how to produce one
//! instance. The set of variants is closed; every variant implements the
//! shared [`Factory`] contract and the enum dispatches to it.
//!
//! Descriptors are validated when they are built. A malformed descriptor is
//! turned into [`TypeFactory::Invalid`], which keeps the construction error
//! and returns it from every generation attempt.

mod alias;
mod configured;
mod func_reference;
mod function;
mod instance;
mod invalid;
mod proxy;
mod structure;

pub use alias::AliasType;
pub use configured::ConfiguredType;
pub use func_reference::FuncReferenceType;
pub use function::FunctionType;
pub use instance::{FuncType, InstanceType};
pub use invalid::InvalidType;
pub use proxy::ProxyType;
pub use structure::StructType;

use cradle_domain::{Error, Result, Structure, Value};

use crate::resolver::ParameterResolver;

/// Capability shared by every factory variant
pub trait Factory {
    /// The raw arguments, in declaration order
    fn arguments(&self) -> Vec<Value>;

    /// Produce an instance, resolving arguments through `resolver`
    fn generate(&self, resolver: &ParameterResolver<'_>) -> Result<Value>;
}

/// Closed set of factory variants
#[derive(Debug, Clone)]
pub enum TypeFactory {
    /// Invokes a constructor callable with resolved arguments
    Function(FunctionType),
    /// Allocates a struct and assigns its fields positionally
    Struct(StructType),
    /// Delegates to another registered type (optionally one of its members)
    Alias(AliasType),
    /// Exposes a bound member of another registered type
    FuncReference(FuncReferenceType),
    /// Invokes a member of another registered type to build the instance
    Proxy(ProxyType),
    /// Hands out an already-built value
    Instance(InstanceType),
    /// Registers a callable as the component itself
    Func(FuncType),
    /// Runs a configurator member over a freshly generated instance
    Configured(ConfiguredType),
    /// A malformed descriptor
    Invalid(InvalidType),
}

impl TypeFactory {
    /// Function factory: `constructor` must be a [`Value::Callable`]
    pub fn function(constructor: impl Into<Value>, arguments: Vec<Value>) -> Self {
        FunctionType::new(constructor, arguments)
    }

    /// Struct factory for the target `T`
    pub fn structure<T: Structure>(arguments: Vec<Value>) -> Self {
        StructType::new::<T>(arguments)
    }

    /// Alias for `target` (`id` or `id::Member`)
    pub fn alias(target: &str) -> Self {
        AliasType::new(target)
    }

    /// Bound member `member` of the type `type_id`
    pub fn func_reference(type_id: &str, member: &str) -> Self {
        FuncReferenceType::new(type_id, member)
    }

    /// Instance built by invoking `member` of `type_id` with `arguments`
    pub fn proxy(type_id: &str, member: &str, arguments: Vec<Value>) -> Self {
        ProxyType::new(type_id, member, arguments)
    }

    /// An already-built value
    pub fn instance(value: impl Into<Value>) -> Self {
        InstanceType::new(value)
    }

    /// A callable registered as the component itself
    pub fn func(function: impl Into<Value>) -> Self {
        FuncType::new(function)
    }

    /// `embedded`, configured by `configurator_id::method` after generation
    pub fn configured(embedded: TypeFactory, configurator_id: &str, method: &str) -> Self {
        ConfiguredType::new(embedded, configurator_id, method)
    }

    /// A permanently invalid factory
    pub fn invalid(error: Error) -> Self {
        Self::Invalid(InvalidType::new(error))
    }

    /// Whether the descriptor was built without errors
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }

    /// The recorded construction error of an invalid descriptor
    pub fn construction_error(&self) -> Option<&Error> {
        match self {
            Self::Invalid(invalid) => Some(invalid.error()),
            _ => None,
        }
    }

    /// Short variant name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Struct(_) => "struct",
            Self::Alias(_) => "alias",
            Self::FuncReference(_) => "func_reference",
            Self::Proxy(_) => "proxy",
            Self::Instance(_) => "instance",
            Self::Func(_) => "func",
            Self::Configured(_) => "configured",
            Self::Invalid(_) => "invalid",
        }
    }

    fn as_factory(&self) -> &dyn Factory {
        match self {
            Self::Function(f) => f,
            Self::Struct(f) => f,
            Self::Alias(f) => f,
            Self::FuncReference(f) => f,
            Self::Proxy(f) => f,
            Self::Instance(f) => f,
            Self::Func(f) => f,
            Self::Configured(f) => f,
            Self::Invalid(f) => f,
        }
    }
}

impl Factory for TypeFactory {
    fn arguments(&self) -> Vec<Value> {
        self.as_factory().arguments()
    }

    fn generate(&self, resolver: &ParameterResolver<'_>) -> Result<Value> {
        self.as_factory().generate(resolver)
    }
}

fn from_result<T>(result: Result<T>, variant: impl FnOnce(T) -> TypeFactory) -> TypeFactory {
    match result {
        Ok(factory) => variant(factory),
        Err(err) => TypeFactory::invalid(err),
    }
}
