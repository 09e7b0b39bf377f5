//! Parameter resolution
//!
//! Turns one raw argument into the value handed to a constructor:
//!
//! ```text
//! @id / @?id / @id::Member  ──▶ Container retrieval (+ member extraction)
//! %name%                    ──▶ configuration lookup, resolved again if the
//!                               substituted value is placeholder text
//! anything else             ──▶ literal, checked against the expected shape
//! ```
//!
//! No coercion is ever applied; a value either has the expected shape or the
//! resolution fails.

use cradle_domain::{
    Error, RawArgument, Result, Shape, TypeReference, Value, is_parameter_or_type_reference,
};

use crate::container::Container;

/// Resolves raw arguments against one [`Container`]
///
/// The resolver carries the chain of TypeIDs currently being generated so
/// that a reference back into that chain fails with [`Error::Cycle`].
#[derive(Debug, Clone)]
pub struct ParameterResolver<'c> {
    container: &'c Container,
    chain: Vec<String>,
}

impl<'c> ParameterResolver<'c> {
    /// A resolver outside of any generation
    pub fn new(container: &'c Container) -> Self {
        Self::within(container, Vec::new())
    }

    pub(crate) fn within(container: &'c Container, chain: Vec<String>) -> Self {
        Self { container, chain }
    }

    /// The bound container
    pub fn container(&self) -> &'c Container {
        self.container
    }

    /// TypeIDs under generation, outermost first
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Resolve `raw` against `expected`
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidReference`] if a referenced instance has the wrong shape
    /// - [`Error::ParameterNotFound`] for an undefined `%name%`
    /// - [`Error::ShapeMismatch`] for a literal of the wrong shape
    /// - any retrieval error of a referenced type
    pub fn resolve(&self, raw: &Value, expected: &Shape) -> Result<Value> {
        self.resolve_with(raw, expected, &mut Vec::new())
    }

    fn resolve_with(&self, raw: &Value, expected: &Shape, seen: &mut Vec<String>) -> Result<Value> {
        match RawArgument::classify(raw) {
            RawArgument::Reference(reference) => self.resolve_reference(&reference, expected),
            RawArgument::Parameter(name) => self.resolve_parameter(name, expected, seen),
            RawArgument::Literal(value) => check_literal(value, expected),
        }
    }

    fn resolve_reference(&self, reference: &TypeReference, expected: &Shape) -> Result<Value> {
        let value = self.retrieve(reference)?;
        if expected.accepts(&value) {
            Ok(value)
        } else {
            Err(Error::InvalidReference {
                type_id: reference.id().to_string(),
                instance_type: value.type_name(),
            })
        }
    }

    fn resolve_parameter(&self, name: &str, expected: &Shape, seen: &mut Vec<String>) -> Result<Value> {
        if seen.iter().any(|visited| visited == name) {
            let mut chain: Vec<String> = seen.iter().map(|visited| format!("%{visited}%")).collect();
            chain.push(format!("%{name}%"));
            return Err(Error::Cycle { chain });
        }

        let value = self
            .container
            .parameter(name)
            .ok_or_else(|| Error::parameter_not_found(name))?;

        match value {
            Value::Str(text) if is_parameter_or_type_reference(text) => {
                seen.push(name.to_string());
                self.resolve_with(value, expected, seen)
            }
            literal => check_literal(literal, expected),
        }
    }

    /// Retrieve the referenced instance, or the bound member it names
    ///
    /// An optional reference to an undefined type yields [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownMember`] if the instance does not expose
    /// the member, and with any error of the retrieval itself.
    pub fn retrieve(&self, reference: &TypeReference) -> Result<Value> {
        if reference.is_optional() && !self.container.contains(reference.id()) {
            return Ok(Value::Null);
        }

        let value = self.container.retrieve(reference.id(), &self.chain)?;
        let Some(member) = reference.member() else {
            return Ok(value);
        };

        value
            .as_instance()
            .and_then(|instance| instance.member(member))
            .map(Value::Callable)
            .ok_or_else(|| Error::UnknownMember {
                type_id: reference.id().to_string(),
                member: member.to_string(),
                instance_type: value.type_name(),
            })
    }
}

fn check_literal(value: &Value, expected: &Shape) -> Result<Value> {
    if expected.accepts(value) {
        Ok(value.clone())
    } else {
        Err(Error::shape_mismatch(expected, value.type_name()))
    }
}
