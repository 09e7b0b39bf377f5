//! Error extension utilities
//!
//! Converts foreign errors (I/O, figment, toml) into the domain error while
//! keeping what went wrong readable.

use std::fmt;

use cradle_domain::{Error, Result};

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```
/// use cradle_infrastructure::error_ext::ErrorContext;
///
/// let missing = std::fs::read_to_string("/definitely/not/here.toml")
///     .context("Failed to read config file");
/// assert!(missing.unwrap_err().to_string().contains("Failed to read config file"));
/// ```
pub trait ErrorContext<T> {
    /// Add context to a Result, converting the error to [`Error::Configuration`]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Add context with lazy evaluation for expensive context creation
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::configuration(format!("{context}: {err}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|err| Error::configuration(format!("{}: {err}", f())))
    }
}
