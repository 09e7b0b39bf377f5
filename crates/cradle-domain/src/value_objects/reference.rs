//! Raw argument syntax
//!
//! Raw constructor arguments are plain values. String literals may carry one
//! of two special forms which the resolver substitutes at generation time:
//!
//! ```text
//! %name%          configuration placeholder
//! @id             type reference
//! @?id            optional type reference (null when `id` is undefined)
//! @id::Member     type reference extracting an exposed member
//! ```

use std::fmt;

use crate::constants::{
    MEMBER_SEPARATOR, OPTIONAL_REFERENCE_MARKER, PARAMETER_DELIMITER, TYPE_REFERENCE_PREFIX,
};
use crate::value_objects::Value;

/// Whether `raw` is a `%name%` configuration placeholder
pub fn is_parameter(raw: &str) -> bool {
    raw.len() >= 3 && raw.starts_with(PARAMETER_DELIMITER) && raw.ends_with(PARAMETER_DELIMITER)
}

/// Whether `raw` is an `@id` type reference (with or without a member)
pub fn is_type_reference(raw: &str) -> bool {
    raw.len() >= 2 && raw.starts_with(TYPE_REFERENCE_PREFIX)
}

/// Whether `raw` needs substitution by the resolver
pub fn is_parameter_or_type_reference(raw: &str) -> bool {
    is_parameter(raw) || is_type_reference(raw)
}

/// Name of a `%name%` placeholder, if `raw` is one
pub fn parameter_name(raw: &str) -> Option<&str> {
    if is_parameter(raw) {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// A parsed type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeReference {
    id: String,
    member: Option<String>,
    optional: bool,
}

impl TypeReference {
    /// Parse `@id`, `@?id` or `@id::Member`
    ///
    /// Returns `None` if `raw` is not a type reference.
    pub fn parse(raw: &str) -> Option<Self> {
        if !is_type_reference(raw) {
            return None;
        }
        Some(Self::from_id(&raw[TYPE_REFERENCE_PREFIX.len_utf8()..]))
    }

    /// Parse a reference given without its leading `@` (`id`, `?id`, `id::Member`)
    ///
    /// A leading `@` is tolerated and stripped.
    pub fn from_id(raw: &str) -> Self {
        let raw = raw.strip_prefix(TYPE_REFERENCE_PREFIX).unwrap_or(raw);
        let (optional, rest) = match raw.strip_prefix(OPTIONAL_REFERENCE_MARKER) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        match rest.split_once(MEMBER_SEPARATOR) {
            Some((id, member)) => Self {
                id: id.to_string(),
                member: Some(member.to_string()),
                optional,
            },
            None => Self {
                id: rest.to_string(),
                member: None,
                optional,
            },
        }
    }

    /// Create a reference to `id` extracting `member`
    pub fn with_member(id: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            member: Some(member.into()),
            optional: false,
        }
    }

    /// The referenced type ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The exposed member to extract, if any
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// Whether an undefined target resolves to null instead of failing
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TYPE_REFERENCE_PREFIX}")?;
        if self.optional {
            write!(f, "{OPTIONAL_REFERENCE_MARKER}")?;
        }
        write!(f, "{}", self.id)?;
        if let Some(member) = &self.member {
            write!(f, "{MEMBER_SEPARATOR}{member}")?;
        }
        Ok(())
    }
}

/// Classification of one raw argument
#[derive(Debug, Clone, PartialEq)]
pub enum RawArgument<'a> {
    /// `%name%` configuration placeholder
    Parameter(&'a str),
    /// `@id` type reference
    Reference(TypeReference),
    /// Anything else, used as-is
    Literal(&'a Value),
}

impl<'a> RawArgument<'a> {
    /// Classify a raw argument value
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Str(raw) => {
                if let Some(name) = parameter_name(raw) {
                    Self::Parameter(name)
                } else if let Some(reference) = TypeReference::parse(raw) {
                    Self::Reference(reference)
                } else {
                    Self::Literal(value)
                }
            }
            other => Self::Literal(other),
        }
    }
}
