//! Baseline constraint: every registered factory is valid

use cradle_domain::Error;
use cradle_engine::Container;

use crate::constraint::{CONSTRAINTS, Constraint, ConstraintEntry};

/// Rejects factories that recorded a construction error
///
/// Each violation names the TypeID and embeds the recorded error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInvalidTypes;

impl Constraint for NoInvalidTypes {
    fn name(&self) -> &'static str {
        "no_invalid_types"
    }

    fn check(&self, container: &Container) -> Vec<Error> {
        container
            .registry()
            .iter()
            .filter_map(|(id, factory)| {
                factory
                    .construction_error()
                    .map(|err| Error::invalid_type(id, err.clone()))
            })
            .collect()
    }
}

#[linkme::distributed_slice(CONSTRAINTS)]
static NO_INVALID_TYPES: ConstraintEntry = ConstraintEntry {
    name: "no_invalid_types",
    description: "Every registered factory was constructed without errors",
    order: 10,
    factory: || Box::new(NoInvalidTypes),
};
