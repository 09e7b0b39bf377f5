//! # Cradle Domain
//!
//! Core types shared by every layer of the Cradle container:
//!
//! - [`error`] - the error taxonomy and the crate-wide `Result`
//! - [`value_objects`] - dynamic values, shapes, signatures, callables and
//!   instances, plus the typed conversion traits that turn ordinary Rust
//!   closures into registrable constructors
//! - [`constants`] - raw argument syntax markers
//!
//! Nothing in this crate performs I/O or knows about the registry.

pub mod constants;
pub mod error;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
