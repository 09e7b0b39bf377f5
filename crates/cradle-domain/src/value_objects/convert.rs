//! Typed conversions between Rust values and [`Value`]
//!
//! These traits are what lets an ordinary closure become a registrable
//! constructor: parameter types describe their [`Shape`] and know how to
//! extract themselves from a resolved value, return types describe their
//! return shapes and know how to wrap themselves back up.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::{Callable, Component, Instance, Shape, TypeKey, Value};

/// A Rust type with a known parameter shape
pub trait Shaped {
    /// Whether this parameter type is a variadic tail marker
    const VARIADIC: bool = false;

    /// Shape of the type; for variadic markers, the element shape
    fn shape() -> Shape;
}

/// Extraction of a typed value from a resolved [`Value`]
pub trait FromValue: Sized {
    /// Convert, failing with [`Error::ShapeMismatch`] on the wrong kind
    fn from_value(value: Value) -> Result<Self>;
}

/// A constructor return type
pub trait Returns {
    /// Every return shape this type declares (empty for `()`)
    fn shapes() -> Vec<Shape>;

    /// Wrap the returned value; `callable` names the producer for errors
    fn into_value(self, callable: &str) -> Result<Value>;
}

/// Marker for a trailing variadic parameter
///
/// A constructor whose last parameter is `Variadic<T>` accepts any number of
/// trailing raw arguments of shape `T`, which arrive packed in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variadic<T>(pub Vec<T>);

impl<T> Variadic<T> {
    /// The packed values
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Variadic<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn mismatch<T>(expected: impl Display, value: &Value) -> Result<T> {
    Err(Error::shape_mismatch(expected, value.type_name()))
}

macro_rules! impl_literal {
    ($ty:ty, $variant:ident, $shape:expr) => {
        impl Shaped for $ty {
            fn shape() -> Shape {
                $shape
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => mismatch(Self::shape(), &other),
                }
            }
        }

        impl Returns for $ty {
            fn shapes() -> Vec<Shape> {
                vec![Self::shape()]
            }

            fn into_value(self, _callable: &str) -> Result<Value> {
                Ok(Value::$variant(self))
            }
        }
    };
}

impl_literal!(String, Str, Shape::Str);
impl_literal!(i64, Int, Shape::Int);
impl_literal!(f64, Float, Shape::Float);
impl_literal!(bool, Bool, Shape::Bool);
impl_literal!(Instance, Instance, Shape::Interface);
impl_literal!(Callable, Callable, Shape::Func);
impl_literal!(BTreeMap<String, Value>, Map, Shape::Map);

impl Shaped for Value {
    fn shape() -> Shape {
        Shape::Any
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl Returns for Value {
    fn shapes() -> Vec<Shape> {
        vec![Shape::Any]
    }

    fn into_value(self, _callable: &str) -> Result<Value> {
        Ok(self)
    }
}

impl<T: ?Sized + Send + Sync + 'static> Shaped for Arc<T> {
    fn shape() -> Shape {
        Shape::Pointer(TypeKey::of::<Arc<T>>())
    }
}

impl<T: ?Sized + Send + Sync + 'static> FromValue for Arc<T> {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Instance(instance) => match instance.downcast::<Arc<T>>() {
                Some(handle) => Ok(handle),
                None => mismatch(Self::shape(), &value),
            },
            _ => mismatch(Self::shape(), &value),
        }
    }
}

impl<T: ?Sized + Component> Returns for Arc<T> {
    fn shapes() -> Vec<Shape> {
        vec![Self::shape()]
    }

    fn into_value(self, _callable: &str) -> Result<Value> {
        Ok(Value::Instance(Instance::component(self)))
    }
}

impl<T: Shaped> Shaped for Option<T> {
    fn shape() -> Shape {
        Shape::optional(T::shape())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn shape() -> Shape {
        Shape::list(T::shape())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => mismatch("list", &other),
        }
    }
}

impl<T: Shaped> Shaped for Variadic<T> {
    const VARIADIC: bool = true;

    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: FromValue> FromValue for Variadic<T> {
    fn from_value(value: Value) -> Result<Self> {
        Vec::<T>::from_value(value).map(Variadic)
    }
}

impl Returns for () {
    fn shapes() -> Vec<Shape> {
        Vec::new()
    }

    fn into_value(self, _callable: &str) -> Result<Value> {
        Ok(Value::Null)
    }
}

impl<A: Returns, B: Returns> Returns for (A, B) {
    fn shapes() -> Vec<Shape> {
        let mut shapes = A::shapes();
        shapes.extend(B::shapes());
        shapes
    }

    fn into_value(self, callable: &str) -> Result<Value> {
        Ok(Value::List(vec![
            self.0.into_value(callable)?,
            self.1.into_value(callable)?,
        ]))
    }
}

impl<T: Returns, E: Display> Returns for std::result::Result<T, E> {
    fn shapes() -> Vec<Shape> {
        T::shapes()
    }

    fn into_value(self, callable: &str) -> Result<Value> {
        match self {
            Ok(value) => value.into_value(callable),
            Err(err) => Err(Error::invocation(callable, err)),
        }
    }
}
