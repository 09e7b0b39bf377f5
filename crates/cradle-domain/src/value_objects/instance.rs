//! Component instances
//!
//! Generated components are stored type-erased behind an [`Instance`]
//! handle. Cloning a handle never clones the component: every clone observes
//! the same object, which is what singleton retrieval relies on.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::value_objects::{Callable, TypeKey};

type MemberLookup = dyn Fn(&str) -> Option<Callable> + Send + Sync;

/// A component that can be stored in the container
///
/// Implementors may expose named members (bound methods) which type
/// references of the form `@id::Member` extract. Members are looked up
/// explicitly; there is no reflection.
///
/// ```
/// use std::sync::Arc;
/// use cradle_domain::{Callable, Component};
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// impl Component for Greeter {
///     fn member(self: Arc<Self>, name: &str) -> Option<Callable> {
///         match name {
///             "Greet" => Some(Callable::from_fn("Greeter::Greet", move |who: String| {
///                 format!("{} {who}", self.greeting)
///             })),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// Bound callable for the exposed member `name`
    fn member(self: Arc<Self>, name: &str) -> Option<Callable> {
        let _ = name;
        None
    }
}

/// Type-erased, shared handle to a component
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_key: TypeKey,
    members: Option<Arc<MemberLookup>>,
}

impl Instance {
    /// Wrap a shared component, exposing its members
    ///
    /// The stored value is the `Arc<T>` itself, so [`Instance::downcast`]
    /// with `Arc<T>` hands back a clone of the very same handle.
    pub fn component<T: ?Sized + Component>(component: Arc<T>) -> Self {
        let lookup = Arc::clone(&component);
        Self {
            value: Arc::new(component),
            type_key: TypeKey::of::<Arc<T>>(),
            members: Some(Arc::new(move |name: &str| {
                Component::member(Arc::clone(&lookup), name)
            })),
        }
    }

    /// Wrap an arbitrary value without exposed members
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_key: TypeKey::of::<T>(),
            members: None,
        }
    }

    /// Identity of the stored Rust type
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Name of the stored Rust type
    pub fn type_name(&self) -> &'static str {
        self.type_key.name()
    }

    /// Borrow the stored value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Clone the stored value out as `T` (typically `Arc<Component>`)
    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Bound callable for an exposed member
    pub fn member(&self, name: &str) -> Option<Callable> {
        self.members.as_ref().and_then(|lookup| lookup(name))
    }

    /// Whether both handles point at the same component
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.type_key.name())
            .field("members", &self.members.is_some())
            .finish()
    }
}
