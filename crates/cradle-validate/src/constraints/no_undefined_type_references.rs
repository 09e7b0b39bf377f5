//! Every mandatory type reference points at a registered type

use cradle_domain::Error;
use cradle_engine::Container;

use super::references_of;
use crate::constraint::{CONSTRAINTS, Constraint, ConstraintEntry};

/// Rejects `@id` arguments naming unregistered types
///
/// Optional references (`@?id`) are allowed to dangle.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoUndefinedTypeReferences;

impl Constraint for NoUndefinedTypeReferences {
    fn name(&self) -> &'static str {
        "no_undefined_type_references"
    }

    fn check(&self, container: &Container) -> Vec<Error> {
        let registry = container.registry();
        let mut violations = Vec::new();

        for (id, factory) in registry.iter().filter(|(_, factory)| factory.is_valid()) {
            for reference in references_of(container, factory) {
                if !reference.is_optional() && !registry.contains(reference.id()) {
                    violations.push(Error::UndefinedReference {
                        type_id: id.to_string(),
                        reference: reference.id().to_string(),
                    });
                }
            }
        }

        violations
    }
}

#[linkme::distributed_slice(CONSTRAINTS)]
static NO_UNDEFINED_TYPE_REFERENCES: ConstraintEntry = ConstraintEntry {
    name: "no_undefined_type_references",
    description: "Every non-optional type reference names a registered type",
    order: 20,
    factory: || Box::new(NoUndefinedTypeReferences),
};
