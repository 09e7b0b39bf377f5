//! Constraint contract and registry
//!
//! Constraints register themselves by adding a [`ConstraintEntry`] to the
//! [`CONSTRAINTS`] distributed slice. The slice is assembled at link time.

use cradle_domain::{Error, Result};
use cradle_engine::Container;

/// A post-registration check over a container
pub trait Constraint: Send + Sync {
    /// Unique constraint name (e.g. `"no_invalid_types"`)
    fn name(&self) -> &'static str;

    /// Every violation found, in TypeID order
    fn check(&self, container: &Container) -> Vec<Error>;

    /// The first violation, if any
    fn validate(&self, container: &Container) -> Result<()> {
        match self.check(container).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

/// Registry entry for a constraint
pub struct ConstraintEntry {
    /// Unique constraint name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Position in the default run (ascending)
    pub order: u16,
    /// Creates the constraint
    pub factory: fn() -> Box<dyn Constraint>,
}

/// All registered constraints
#[linkme::distributed_slice]
pub static CONSTRAINTS: [ConstraintEntry] = [..];

fn sorted_entries() -> Vec<&'static ConstraintEntry> {
    let mut entries: Vec<&'static ConstraintEntry> = CONSTRAINTS.iter().collect();
    entries.sort_by_key(|entry| (entry.order, entry.name));
    entries
}

/// Create the constraint registered under `name`
///
/// # Errors
///
/// Returns [`Error::Configuration`] listing the available names if `name`
/// is not registered.
pub fn resolve_constraint(name: &str) -> Result<Box<dyn Constraint>> {
    if let Some(entry) = CONSTRAINTS.iter().find(|entry| entry.name == name) {
        return Ok((entry.factory)());
    }

    let available: Vec<&str> = sorted_entries().iter().map(|entry| entry.name).collect();
    Err(Error::configuration(format!(
        "Unknown constraint '{name}'. Available constraints: {available:?}"
    )))
}

/// Every registered constraint as `(name, description)`, in run order
pub fn list_constraints() -> Vec<(&'static str, &'static str)> {
    sorted_entries()
        .into_iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}

/// One instance of every registered constraint, in run order
pub fn default_constraints() -> Vec<Box<dyn Constraint>> {
    sorted_entries()
        .into_iter()
        .map(|entry| (entry.factory)())
        .collect()
}
