//! Every configuration placeholder is defined

use cradle_domain::Error;
use cradle_engine::Container;

use super::parameters_of;
use crate::constraint::{CONSTRAINTS, Constraint, ConstraintEntry};

/// Rejects `%name%` arguments without a configured value
#[derive(Debug, Default, Clone, Copy)]
pub struct NoUndefinedParameters;

impl Constraint for NoUndefinedParameters {
    fn name(&self) -> &'static str {
        "no_undefined_parameters"
    }

    fn check(&self, container: &Container) -> Vec<Error> {
        let mut violations = Vec::new();

        for (id, factory) in container.registry().iter() {
            for parameter in parameters_of(container, factory) {
                if container.parameter(&parameter).is_none() {
                    violations.push(Error::UndefinedParameter {
                        type_id: id.to_string(),
                        parameter,
                    });
                }
            }
        }

        violations
    }
}

#[linkme::distributed_slice(CONSTRAINTS)]
static NO_UNDEFINED_PARAMETERS: ConstraintEntry = ConstraintEntry {
    name: "no_undefined_parameters",
    description: "Every configuration placeholder has a configured value",
    order: 30,
    factory: || Box::new(NoUndefinedParameters),
};
