//! Type registry
//!
//! Maps TypeIDs to their factories. Registration overwrites; uniqueness is
//! never enforced by rejection. Iteration is ordered by TypeID so that
//! validation results are deterministic.

use std::collections::BTreeMap;

use cradle_domain::Value;
use tracing::debug;

use crate::factory::TypeFactory;

/// Registered factories by TypeID
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeFactory>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `id`, returning the factory it replaced
    pub fn register(&mut self, id: impl Into<String>, factory: TypeFactory) -> Option<TypeFactory> {
        let id = id.into();
        debug!(
            type_id = %id,
            kind = factory.kind(),
            valid = factory.is_valid(),
            "Registering type"
        );
        self.types.insert(id, factory)
    }

    /// Register every `(id, factory)` pair in iteration order
    pub fn register_all<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = (S, TypeFactory)>,
        S: Into<String>,
    {
        for (id, factory) in types {
            self.register(id, factory);
        }
    }

    /// Register a function factory in one call
    pub fn register_type(
        &mut self,
        id: impl Into<String>,
        constructor: impl Into<Value>,
        arguments: Vec<Value>,
    ) -> Option<TypeFactory> {
        self.register(id, TypeFactory::function(constructor, arguments))
    }

    /// Register an already-built value
    pub fn inject_instance(&mut self, id: impl Into<String>, value: impl Into<Value>) -> Option<TypeFactory> {
        self.register(id, TypeFactory::instance(value))
    }

    /// Factory registered under `id`
    pub fn get(&self, id: &str) -> Option<&TypeFactory> {
        self.types.get(id)
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered TypeIDs in sorted order
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Registered factories in TypeID order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeFactory)> {
        self.types.iter().map(|(id, factory)| (id.as_str(), factory))
    }
}

impl<S: Into<String>> FromIterator<(S, TypeFactory)> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = (S, TypeFactory)>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.register_all(iter);
        registry
    }
}
