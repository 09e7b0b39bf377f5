//! Value objects
//!
//! Immutable building blocks of type descriptors and generated values.

pub mod callable;
pub mod convert;
pub mod instance;
pub mod reference;
pub mod shape;
pub mod structure;
pub mod value;

pub use callable::{Callable, CallableBody, IntoCallable, signature_from_params};
pub use convert::{FromValue, Returns, Shaped, Variadic};
pub use instance::{Component, Instance};
pub use reference::{
    RawArgument, TypeReference, is_parameter, is_parameter_or_type_reference,
    is_type_reference, parameter_name,
};
pub use shape::{Shape, Signature, TypeKey};
pub use structure::{Field, Structure};
pub use value::Value;
