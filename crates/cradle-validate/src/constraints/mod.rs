//! Built-in constraints

mod no_circular_references;
mod no_invalid_types;
mod no_undefined_parameters;
mod no_undefined_type_references;

pub use no_circular_references::NoCircularReferences;
pub use no_invalid_types::NoInvalidTypes;
pub use no_undefined_parameters::NoUndefinedParameters;
pub use no_undefined_type_references::NoUndefinedTypeReferences;

use cradle_domain::{RawArgument, TypeReference, Value};
use cradle_engine::{Container, Factory, TypeFactory};

/// Where one raw argument leads once `%name%` indirection is followed
#[derive(Debug, Default)]
struct Trail {
    parameters: Vec<String>,
    reference: Option<TypeReference>,
}

/// Follow `raw` through parameters whose values are placeholder or reference
/// text, the way the resolver does, until a literal or a reference is reached
///
/// A missing parameter or a placeholder seen twice ends the trail.
fn follow(container: &Container, raw: &Value) -> Trail {
    let mut trail = Trail::default();
    let mut current = raw.clone();

    loop {
        let next = match RawArgument::classify(&current) {
            RawArgument::Reference(reference) => {
                trail.reference = Some(reference);
                return trail;
            }
            RawArgument::Literal(_) => return trail,
            RawArgument::Parameter(name) => {
                if trail.parameters.iter().any(|seen| seen == name) {
                    return trail;
                }
                trail.parameters.push(name.to_string());
                container.parameter(name).cloned()
            }
        };

        match next {
            Some(value) => current = value,
            None => return trail,
        }
    }
}

fn trails(container: &Container, factory: &TypeFactory) -> Vec<Trail> {
    factory
        .arguments()
        .iter()
        .map(|raw| follow(container, raw))
        .collect()
}

/// Type references a factory will follow when it generates
///
/// Includes references reached through any chain of `%name%` parameters.
pub(crate) fn references_of(container: &Container, factory: &TypeFactory) -> Vec<TypeReference> {
    trails(container, factory)
        .into_iter()
        .filter_map(|trail| trail.reference)
        .collect()
}

/// `%name%` placeholders a factory will look up, direct or chained
pub(crate) fn parameters_of(container: &Container, factory: &TypeFactory) -> Vec<String> {
    trails(container, factory)
        .into_iter()
        .flat_map(|trail| trail.parameters)
        .collect()
}
