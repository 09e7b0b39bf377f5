//! Static cycle detection over the reference graph
//!
//! Retrieval also detects cycles, but only once it walks into one. Finding
//! them up front keeps concurrent first access from ever waiting on a type
//! that is part of a cycle.

use std::collections::{BTreeMap, BTreeSet};

use cradle_domain::Error;
use cradle_engine::Container;

use super::references_of;
use crate::constraint::{CONSTRAINTS, Constraint, ConstraintEntry};

/// Rejects reference chains that lead back to their start
///
/// Each cycle is reported once as [`Error::Cycle`], starting at the TypeID
/// the depth-first walk entered it through.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCircularReferences;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Done,
}

type Graph<'a> = BTreeMap<&'a str, BTreeSet<String>>;

impl Constraint for NoCircularReferences {
    fn name(&self) -> &'static str {
        "no_circular_references"
    }

    fn check(&self, container: &Container) -> Vec<Error> {
        let registry = container.registry();
        let graph: Graph<'_> = registry
            .iter()
            .map(|(id, factory)| {
                let edges = references_of(container, factory)
                    .into_iter()
                    .map(|reference| reference.id().to_string())
                    .filter(|target| registry.contains(target))
                    .collect();
                (id, edges)
            })
            .collect();

        let mut marks = BTreeMap::new();
        let mut stack = Vec::new();
        let mut violations = Vec::new();
        for id in graph.keys().copied() {
            visit(id, &graph, &mut marks, &mut stack, &mut violations);
        }
        violations
    }
}

fn visit<'a>(
    id: &'a str,
    graph: &'a Graph<'a>,
    marks: &mut BTreeMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    violations: &mut Vec<Error>,
) {
    match marks.get(id) {
        Some(Mark::Done) => return,
        Some(Mark::Active) => {
            let start = stack.iter().position(|active| *active == id).unwrap_or(0);
            let mut chain: Vec<String> = stack[start..].iter().map(ToString::to_string).collect();
            chain.push(id.to_string());
            violations.push(Error::Cycle { chain });
            return;
        }
        None => {}
    }

    marks.insert(id, Mark::Active);
    stack.push(id);
    if let Some(edges) = graph.get(id) {
        for next in edges {
            visit(next, graph, marks, stack, violations);
        }
    }
    stack.pop();
    marks.insert(id, Mark::Done);
}

#[linkme::distributed_slice(CONSTRAINTS)]
static NO_CIRCULAR_REFERENCES: ConstraintEntry = ConstraintEntry {
    name: "no_circular_references",
    description: "No chain of type references leads back to its start",
    order: 40,
    factory: || Box::new(NoCircularReferences),
};
