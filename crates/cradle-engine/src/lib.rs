//! # Cradle Engine
//!
//! The dynamic instantiation engine of the Cradle container.
//!
//! ## Architecture
//!
//! ```text
//! TypeRegistry ──owns──▶ TypeFactory (Function | Struct | Alias | FuncReference
//!      │                              | Proxy | Instance | Func | Configured)
//!      ▼
//! Container::get("id")
//!      │  singleton cache (DashMap<id, Value>) + wait-for aware first construction
//!      ▼
//! TypeFactory::generate(&ParameterResolver)
//!      │  literals, %parameters%, @references, @id::Member
//!      ▼
//! ParameterResolver ──@id──▶ Container (recursively, cycle-checked)
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use cradle_domain::{args, Callable, Component};
//! use cradle_engine::{Container, TypeFactory, TypeRegistry};
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! impl Component for Greeter {}
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     "greeter",
//!     TypeFactory::function(
//!         Callable::from_fn("new_greeter", |greeting: String| Arc::new(Greeter { greeting })),
//!         args!["%greeting%"],
//!     ),
//! );
//!
//! let container = Container::new(registry, [("greeting".to_string(), "hello".into())]);
//! let greeter: Arc<Greeter> = container.get_as("greeter").unwrap();
//! assert_eq!(greeter.greeting, "hello");
//! ```

pub mod container;
pub mod factory;
pub mod registry;
pub mod resolver;

pub use container::{Container, Parameters};
pub use factory::{
    AliasType, ConfiguredType, Factory, FuncReferenceType, FuncType, FunctionType, InstanceType,
    InvalidType, ProxyType, StructType, TypeFactory,
};
pub use registry::TypeRegistry;
pub use resolver::ParameterResolver;
