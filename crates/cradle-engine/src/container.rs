//! Container
//!
//! Owns a [`TypeRegistry`] and the configuration parameters and hands out
//! instances by TypeID.
//!
//! Every type is a singleton: the first successful generation is cached and
//! returned to all later callers. First access is guarded per TypeID so the
//! factory runs exactly once even when many threads ask at the same time.
//! Failed generations are not cached.
//!
//! ```text
//! get(id) ─► cached? ──yes──► value
//!               │no
//!               ▼
//!         owned by a thread? ──no──► claim, generate, publish, wake waiters
//!               │yes
//!               ▼
//!         owner waits (transitively) on us? ──yes──► Error::Cycle
//!               │no
//!               ▼
//!         wait, then retry
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use cradle_domain::{Error, FromValue, Result, Value};
use dashmap::DashMap;
use tracing::{debug, trace};

use crate::factory::{Factory, TypeFactory};
use crate::registry::TypeRegistry;
use crate::resolver::ParameterResolver;

/// Configuration parameters by name
pub type Parameters = BTreeMap<String, Value>;

/// Registry, configuration and the singleton cache
pub struct Container {
    registry: TypeRegistry,
    parameters: Parameters,
    instances: DashMap<String, Value>,
    construction: Mutex<Construction>,
    finished: Condvar,
}

/// Types being generated right now and the threads blocked on them
#[derive(Debug, Default)]
struct Construction {
    owners: HashMap<String, ThreadId>,
    waiting: HashMap<ThreadId, String>,
}

impl Construction {
    /// The wait-for chain from `id` back to `me`, if `me` is part of one
    ///
    /// Follows owner → the type that owner waits on → its owner, and so on.
    fn cycle_through(&self, id: &str, me: ThreadId) -> Option<Vec<String>> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(&owner) = self.owners.get(current) {
            if owner == me {
                return Some(path);
            }
            let next = self.waiting.get(&owner)?;
            if path.len() > self.waiting.len() {
                return None;
            }
            path.push(next.clone());
            current = next.as_str();
        }
        None
    }
}

/// Releases ownership of a type under construction, also on unwind
struct Claim<'c> {
    container: &'c Container,
    id: &'c str,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.container.lock().owners.remove(self.id);
        self.container.finished.notify_all();
    }
}

impl Container {
    /// Create a container over `registry` with the given parameters
    pub fn new<I>(registry: TypeRegistry, parameters: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            registry,
            parameters: parameters.into_iter().collect(),
            instances: DashMap::new(),
            construction: Mutex::default(),
            finished: Condvar::new(),
        }
    }

    /// Register (or replace) a type, discarding any cached instance of it
    pub fn register(&mut self, id: impl Into<String>, factory: TypeFactory) -> Option<TypeFactory> {
        let id = id.into();
        self.instances.remove(&id);
        self.registry.register(id, factory)
    }

    /// Register an already-built value
    pub fn inject_instance(&mut self, id: impl Into<String>, value: impl Into<Value>) -> Option<TypeFactory> {
        self.register(id, TypeFactory::instance(value))
    }

    /// The registered types
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The configuration parameters
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Configuration value under `name`
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Set a configuration value; already cached instances keep theirs
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.parameters.insert(name.into(), value.into())
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    /// Whether an instance of `id` has been generated and cached
    pub fn is_cached(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    /// Retrieve the instance registered under `id`
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownType`] if `id` is not registered
    /// - [`Error::Generation`] wrapping whatever made the factory fail
    pub fn get(&self, id: &str) -> Result<Value> {
        self.retrieve(id, &[])
    }

    /// Retrieve `id` and convert it, e.g. into `Arc<MyComponent>`
    ///
    /// # Errors
    ///
    /// Fails like [`Container::get`], or with [`Error::ShapeMismatch`] if
    /// the instance is not a `T`.
    pub fn get_as<T: FromValue>(&self, id: &str) -> Result<T> {
        T::from_value(self.get(id)?)
    }

    pub(crate) fn retrieve(&self, id: &str, chain: &[String]) -> Result<Value> {
        let factory = self.registry.get(id).ok_or_else(|| Error::unknown_type(id))?;

        if chain.iter().any(|active| active == id) {
            return Err(cycle(chain, id, &[]));
        }

        if let Some(value) = self.cached(id) {
            trace!(type_id = %id, "Returning cached instance");
            return Ok(value);
        }

        let me = thread::current().id();
        let mut state = self.lock();
        loop {
            if let Some(value) = self.cached(id) {
                return Ok(value);
            }
            if !state.owners.contains_key(id) {
                break;
            }
            if let Some(path) = state.cycle_through(id, me) {
                return Err(cycle(chain, id, &path));
            }

            trace!(type_id = %id, "Waiting for concurrent generation");
            state.waiting.insert(me, id.to_string());
            state = self
                .finished
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
            state.waiting.remove(&me);
        }
        state.owners.insert(id.to_string(), me);
        drop(state);

        let claim = Claim { container: self, id };
        let value = self.generate(id, factory, chain)?;
        self.instances.insert(id.to_string(), value.clone());
        drop(claim);
        Ok(value)
    }

    fn cached(&self, id: &str) -> Option<Value> {
        self.instances.get(id).map(|value| value.value().clone())
    }

    fn lock(&self) -> MutexGuard<'_, Construction> {
        self.construction
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn generate(&self, id: &str, factory: &TypeFactory, chain: &[String]) -> Result<Value> {
        debug!(type_id = %id, kind = factory.kind(), depth = chain.len(), "Generating type");

        let mut active = chain.to_vec();
        active.push(id.to_string());
        let resolver = ParameterResolver::within(self, active);

        factory
            .generate(&resolver)
            .map_err(|err| Error::generation(id, err))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("types", &self.registry.len())
            .field("parameters", &self.parameters.keys().collect::<Vec<_>>())
            .field("cached", &self.instances.len())
            .finish()
    }
}

/// `chain → id → path…`: the path ends with a type already on `chain` or
/// owned by the calling thread
fn cycle(chain: &[String], id: &str, path: &[String]) -> Error {
    let mut cycle = chain.to_vec();
    cycle.push(id.to_string());
    cycle.extend_from_slice(path);
    Error::Cycle { chain: cycle }
}
