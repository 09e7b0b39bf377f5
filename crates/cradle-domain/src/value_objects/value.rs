//! Dynamic values
//!
//! [`Value`] carries raw arguments, configuration parameters, resolved
//! arguments and generated instances through the engine.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::value_objects::{Callable, Instance};

/// A dynamically typed value
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value (optional references, unit returns)
    #[default]
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating point literal
    Float(f64),
    /// String literal (possibly a placeholder or reference before resolution)
    Str(String),
    /// List of values
    List(Vec<Value>),
    /// String-keyed map of values
    Map(BTreeMap<String, Value>),
    /// A generated component instance
    Instance(Instance),
    /// A callable (constructors, extracted members, registered functions)
    Callable(Callable),
}

impl Value {
    /// Short name of the runtime kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Instance(_) => "instance",
            Self::Callable(_) => "func",
        }
    }

    /// Descriptive runtime type, naming the Rust type of instances
    pub fn type_name(&self) -> String {
        match self {
            Self::Instance(instance) => instance.type_name().to_string(),
            Self::Callable(callable) => format!("func{}", callable.signature()),
            other => other.kind().to_string(),
        }
    }

    /// Whether this is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Instance handle, if this is an instance
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Callable, if this is a callable
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Callable(callable) => Some(callable),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Instance(a), Self::Instance(b)) => a.ptr_eq(b),
            (Self::Callable(a), Self::Callable(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::Int(v) => write!(f, "Int({v})"),
            Self::Float(v) => write!(f, "Float({v})"),
            Self::Str(v) => write!(f, "Str({v:?})"),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            Self::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Self::Instance(v) => write!(f, "Instance({})", v.type_name()),
            Self::Callable(v) => write!(f, "Callable({})", v.name()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Self::Instance(instance)
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Self::Callable(callable)
    }
}

/// Configuration values
///
/// Integers become [`Value::Int`] and other numbers [`Value::Float`]. An
/// integer above `i64::MAX` is rejected rather than rounded to a float.
impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Ok(match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if n.is_u64() {
                    return Err(Error::configuration(format!(
                        "integer {n} does not fit into a signed 64-bit value"
                    )));
                } else {
                    n.as_f64().map(Self::Float).ok_or_else(|| {
                        Error::configuration(format!("number {n} is not representable"))
                    })?
                }
            }
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_>>()?,
            ),
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Self::try_from(v)?)))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

/// Build a `Vec<Value>` of raw arguments from heterogeneous literals
///
/// ```
/// use cradle_domain::{args, Value};
///
/// let raw: Vec<Value> = args!["foo", "%bar%", 42];
/// assert_eq!(raw.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Value>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
