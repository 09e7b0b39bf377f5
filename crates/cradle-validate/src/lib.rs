//! # Cradle Validate
//!
//! Sanity checks that run once after all registrations and before the first
//! retrieval.
//!
//! ```text
//! ConstraintEntry ──#[distributed_slice(CONSTRAINTS)]──▶ CONSTRAINTS
//!                                                          │
//! ContainerValidator::with_defaults() ◀── ordered by entry.order
//!        │
//!        ▼  fail-fast or aggregate
//! Constraint::validate(&Container)
//! ```
//!
//! Built-in constraints:
//!
//! | Name | Checks |
//! |------|--------|
//! | `no_invalid_types` | every factory was built without errors |
//! | `no_undefined_type_references` | every non-optional `@id` is registered |
//! | `no_undefined_parameters` | every `%name%` is configured |
//! | `no_circular_references` | the reference graph has no cycle |
//!
//! Every constraint walks the registry in TypeID order, so the result is
//! deterministic for a fixed registry.

pub mod constraint;
pub mod constraints;
pub mod validator;

pub use constraint::{
    CONSTRAINTS, Constraint, ConstraintEntry, default_constraints, list_constraints,
    resolve_constraint,
};
pub use constraints::{
    NoCircularReferences, NoInvalidTypes, NoUndefinedParameters, NoUndefinedTypeReferences,
};
pub use validator::{ContainerValidator, ValidationMode};
