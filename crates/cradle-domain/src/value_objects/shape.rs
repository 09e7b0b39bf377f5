//! Shapes and signatures
//!
//! A [`Shape`] is the runtime description of what a constructor parameter or
//! return value looks like. Constructors carry an explicit [`Signature`]
//! built from shapes, which is what arity and return checks run against.

use std::any::{self, TypeId};
use std::fmt;

use crate::value_objects::Value;

/// Identity of a concrete Rust type behind a shared handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of the Rust type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Rust type name, as reported by `std::any::type_name`
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Expected shape of a value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Accepts every value
    Any,
    /// `bool`
    Bool,
    /// `i64`
    Int,
    /// `f64`
    Float,
    /// `String`
    Str,
    /// Homogeneous list
    List(Box<Shape>),
    /// String-keyed map
    Map,
    /// Shared handle to one concrete type (`Arc<T>`)
    Pointer(TypeKey),
    /// Opaque handle to any component instance
    Interface,
    /// A callable
    Func,
    /// The inner shape, or null (`Option<T>`)
    Optional(Box<Shape>),
}

impl Shape {
    /// Pointer shape for `Arc<T>`
    pub fn pointer<T: ?Sized + 'static>() -> Self {
        Self::Pointer(TypeKey::of::<std::sync::Arc<T>>())
    }

    /// Optional shape: null or a value of `inner`
    pub fn optional(inner: Shape) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// List shape with the given element shape
    pub fn list(element: Shape) -> Self {
        Self::List(Box::new(element))
    }

    /// Whether this shape is pointer- or interface-like
    ///
    /// Only such shapes are valid constructor return shapes.
    pub fn is_reference_like(&self) -> bool {
        matches!(self, Self::Pointer(_) | Self::Interface)
    }

    /// Whether `value` has this shape
    ///
    /// No coercion is applied: an `Int` never satisfies `Float`. A null value
    /// satisfies only [`Shape::Optional`] and [`Shape::Any`].
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::Str, Value::Str(_))
            | (Self::Map, Value::Map(_))
            | (Self::Func, Value::Callable(_))
            | (Self::Interface, Value::Instance(_))
            | (Self::Optional(_), Value::Null) => true,
            (Self::Optional(inner), value) => inner.accepts(value),
            (Self::List(element), Value::List(items)) => items.iter().all(|v| element.accepts(v)),
            (Self::Pointer(key), Value::Instance(instance)) => instance.type_key() == *key,
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("string"),
            Self::List(element) => write!(f, "[]{element}"),
            Self::Map => f.write_str("map"),
            Self::Pointer(key) => write!(f, "{key}"),
            Self::Interface => f.write_str("interface"),
            Self::Func => f.write_str("func"),
            Self::Optional(inner) => write!(f, "?{inner}"),
        }
    }
}

/// Explicit constructor signature
///
/// `params` are the fixed positional parameters, `variadic` the element
/// shape of a trailing variadic parameter, `returns` every declared return
/// shape. A valid constructor declares exactly one reference-like return.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    params: Vec<Shape>,
    variadic: Option<Shape>,
    returns: Vec<Shape>,
}

impl Signature {
    /// Signature with the given fixed parameters and no return values
    pub fn new(params: Vec<Shape>) -> Self {
        Self {
            params,
            variadic: None,
            returns: Vec::new(),
        }
    }

    /// Add a trailing variadic parameter with the given element shape
    #[must_use]
    pub fn with_variadic(mut self, element: Shape) -> Self {
        self.variadic = Some(element);
        self
    }

    /// Add a return shape
    #[must_use]
    pub fn returning(mut self, shape: Shape) -> Self {
        self.returns.push(shape);
        self
    }

    /// Replace all return shapes
    #[must_use]
    pub fn with_returns(mut self, returns: Vec<Shape>) -> Self {
        self.returns = returns;
        self
    }

    /// Fixed positional parameters
    pub fn params(&self) -> &[Shape] {
        &self.params
    }

    /// Element shape of the variadic tail
    pub fn variadic(&self) -> Option<&Shape> {
        self.variadic.as_ref()
    }

    /// Declared return shapes
    pub fn returns(&self) -> &[Shape] {
        &self.returns
    }

    /// Number of fixed parameters
    pub fn fixed_arity(&self) -> usize {
        self.params.len()
    }

    /// Whether the signature ends in a variadic parameter
    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// Expected shape of the raw argument at `index` (0-based)
    pub fn expected_shape(&self, index: usize) -> Option<&Shape> {
        self.params.get(index).or(self.variadic.as_ref())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        if let Some(element) = &self.variadic {
            params.push(format!("...{element}"));
        }
        write!(f, "({})", params.join(", "))?;
        match self.returns.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {single}"),
            many => {
                let rendered: Vec<String> = many.iter().map(ToString::to_string).collect();
                write!(f, " ({})", rendered.join(", "))
            }
        }
    }
}
