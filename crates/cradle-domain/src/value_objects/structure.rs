//! Struct targets
//!
//! A [`Structure`] describes its fields in declaration order and knows how
//! to assign a resolved value to a field by position. The struct factory
//! uses this to synthesize a constructor. The [`structure!`] macro writes
//! the implementation for plain structs.

use crate::error::Result;
use crate::value_objects::{Component, Shape};

/// One declared field of a struct target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    shape: Shape,
}

impl Field {
    /// Describe a field
    pub fn new(name: &'static str, shape: Shape) -> Self {
        Self { name, shape }
    }

    /// Field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// A struct the container can allocate and fill positionally
pub trait Structure: Component + Default {
    /// Declared fields in declaration order
    fn fields() -> Vec<Field>;

    /// Assign `value` to the field at `index` (0-based)
    fn assign(&mut self, index: usize, value: crate::value_objects::Value) -> Result<()>;
}

/// Implement [`Structure`] for a plain struct
///
/// Fields must be listed in declaration order with types implementing
/// `Shaped + FromValue`. Fields not listed are never assigned.
///
/// ```
/// use cradle_domain::{structure, Component, Structure, Shape};
///
/// #[derive(Default)]
/// struct Endpoint {
///     host: String,
///     port: i64,
/// }
///
/// impl Component for Endpoint {}
///
/// structure!(Endpoint { host: String, port: i64 });
///
/// assert_eq!(Endpoint::fields()[1].shape(), &Shape::Int);
/// ```
#[macro_export]
macro_rules! structure {
    ($target:ty { $($field:ident : $field_ty:ty),* $(,)? }) => {
        impl $crate::Structure for $target {
            fn fields() -> ::std::vec::Vec<$crate::Field> {
                ::std::vec![
                    $($crate::Field::new(
                        stringify!($field),
                        <$field_ty as $crate::Shaped>::shape(),
                    )),*
                ]
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn assign(&mut self, index: usize, value: $crate::Value) -> $crate::Result<()> {
                let mut position = 0_usize;
                $(
                    if index == position {
                        self.$field = <$field_ty as $crate::FromValue>::from_value(value)
                            .map_err(|err| err.at_position(index + 1))?;
                        return ::std::result::Result::Ok(());
                    }
                    position += 1;
                )*
                ::std::result::Result::Err($crate::Error::construction(format!(
                    "{} has no field at position {}",
                    stringify!($target),
                    index + 1
                )))
            }
        }
    };
}
