//! Error handling types
//!
//! Every failure of the container surfaces as one [`Error`] value. Errors are
//! `Clone` so that an invalid factory can return its recorded construction
//! error on every generation attempt.

use std::sync::Arc;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Cradle container
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A malformed type descriptor, recorded when the factory was constructed
    #[error("{message}")]
    Construction {
        /// Description of what is wrong with the descriptor
        message: String,
    },

    /// A registered type is invalid (reported by validation)
    #[error("type {type_id:?} is invalid: {source}")]
    InvalidType {
        /// The offending type ID
        type_id: String,
        /// The recorded construction error
        #[source]
        source: Arc<Error>,
    },

    /// Retrieval of a type ID that was never registered
    #[error("the type {type_id:?} has not been defined")]
    UnknownType {
        /// The requested type ID
        type_id: String,
    },

    /// A referenced type produced a value that does not fit the expected shape
    #[error("the referenced type \"@{type_id}\" (type {instance_type}) can not be used here")]
    InvalidReference {
        /// The referenced type ID
        type_id: String,
        /// Runtime type of whatever the reference produced
        instance_type: String,
    },

    /// [`Error::InvalidReference`] enriched by the factory that consumed it
    #[error(
        "the referenced type \"@{type_id}\" (type {instance_type}) can not be passed as argument {position} to the function signature {constructor}{signature}"
    )]
    TypeReference {
        /// The referenced type ID
        type_id: String,
        /// Runtime type of whatever the reference produced
        instance_type: String,
        /// 1-based argument position
        position: usize,
        /// Name of the constructor that rejected the value
        constructor: String,
        /// Rendered constructor signature
        signature: String,
    },

    /// A member reference names a member the instance does not expose
    #[error("the type {type_id:?} (type {instance_type}) has no exposed member {member:?}")]
    UnknownMember {
        /// The referenced type ID
        type_id: String,
        /// The requested member name
        member: String,
        /// Runtime type of the referenced instance
        instance_type: String,
    },

    /// A `%name%` placeholder refers to a missing configuration key
    #[error("the parameter \"%{name}%\" has not been defined")]
    ParameterNotFound {
        /// The configuration key
        name: String,
    },

    /// A literal does not have the shape its parameter expects
    #[error("{}is of type {actual} but needs to be a {expected}", position_prefix(.position))]
    ShapeMismatch {
        /// 1-based argument position, once known
        position: Option<usize>,
        /// Expected shape
        expected: String,
        /// Actual runtime kind
        actual: String,
    },

    /// A reference chain re-entered a type that is still being constructed
    #[error("circular reference detected: {}", .chain.join(" -> "))]
    Cycle {
        /// Type IDs in resolution order, ending with the repeated one
        chain: Vec<String>,
    },

    /// A type references another type that is not registered
    #[error("the type {type_id:?} references the undefined type \"@{reference}\"")]
    UndefinedReference {
        /// The referencing type ID
        type_id: String,
        /// The missing type ID
        reference: String,
    },

    /// A type uses a configuration parameter that is not defined
    #[error("the type {type_id:?} uses the undefined parameter \"%{parameter}%\"")]
    UndefinedParameter {
        /// The referencing type ID
        type_id: String,
        /// The missing configuration key
        parameter: String,
    },

    /// A constructor reported a failure of its own
    #[error("{callable} failed: {message}")]
    Invocation {
        /// Name of the failing callable
        callable: String,
        /// The constructor's error message
        message: String,
    },

    /// Context added around a failed generation of a registered type
    #[error("could not generate type {type_id:?}: {source}")]
    Generation {
        /// The type that failed to generate
        type_id: String,
        /// What went wrong
        #[source]
        source: Arc<Error>,
    },

    /// Several constraint violations collected in one validation run
    #[error("container validation failed with {} violation(s): {}", .violations.len(), join_violations(.violations))]
    Validation {
        /// Every violation in constraint order
        violations: Vec<Error>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },
}

fn position_prefix(position: &Option<usize>) -> String {
    position.map_or_else(|| "value ".to_string(), |p| format!("input argument {p} "))
}

fn join_violations(violations: &[Error]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Basic error creation methods
impl Error {
    /// Create a construction error
    pub fn construction<S: Into<String>>(message: S) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }

    /// Create an unknown type error
    pub fn unknown_type<S: Into<String>>(type_id: S) -> Self {
        Self::UnknownType {
            type_id: type_id.into(),
        }
    }

    /// Create a parameter-not-found error
    pub fn parameter_not_found<S: Into<String>>(name: S) -> Self {
        Self::ParameterNotFound { name: name.into() }
    }

    /// Create a shape mismatch error without a position
    pub fn shape_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::ShapeMismatch {
            position: None,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an invocation error
    pub fn invocation<S: Into<String>, M: ToString>(callable: S, message: M) -> Self {
        Self::Invocation {
            callable: callable.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Context and inspection methods
impl Error {
    /// Wrap an error with the type ID whose generation failed
    pub fn generation<S: Into<String>>(type_id: S, source: Error) -> Self {
        Self::Generation {
            type_id: type_id.into(),
            source: Arc::new(source),
        }
    }

    /// Wrap a recorded construction error with the type ID it belongs to
    pub fn invalid_type<S: Into<String>>(type_id: S, source: Error) -> Self {
        Self::InvalidType {
            type_id: type_id.into(),
            source: Arc::new(source),
        }
    }

    /// Attach a 1-based argument position to a shape mismatch
    ///
    /// Any other error (or a mismatch that already has a position) is
    /// returned unchanged.
    #[must_use]
    pub fn at_position(self, position: usize) -> Self {
        match self {
            Self::ShapeMismatch {
                position: None,
                expected,
                actual,
            } => Self::ShapeMismatch {
                position: Some(position),
                expected,
                actual,
            },
            other => other,
        }
    }

    /// The innermost error behind any [`Error::Generation`] wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Generation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this error (after unwrapping context) is a cycle
    pub fn is_cycle(&self) -> bool {
        matches!(self.root_cause(), Self::Cycle { .. })
    }
}
