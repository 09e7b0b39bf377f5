//! # Cradle
//!
//! A dependency injection container runtime. Components are described by
//! type factories registered under string TypeIDs, validated once after
//! registration, and handed out as singletons.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cradle::prelude::*;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! impl Component for Database {}
//!
//! struct Repository {
//!     database: Arc<Database>,
//! }
//!
//! impl Component for Repository {}
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_type(
//!     "database",
//!     Callable::from_fn("new_database", |url: String| Arc::new(Database { url })),
//!     args!["%database_url%"],
//! );
//! registry.register_type(
//!     "repository",
//!     Callable::from_fn("new_repository", |database: Arc<Database>| {
//!         Arc::new(Repository { database })
//!     }),
//!     args!["@database"],
//! );
//!
//! let mut config = AppConfig::default();
//! config.parameters.insert("database_url".into(), "postgres://localhost/app".into());
//!
//! let app = init_app(registry, config).unwrap();
//! let repository: Arc<Repository> = app.get_as("repository").unwrap();
//! assert_eq!(repository.database.url, "postgres://localhost/app");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - values, shapes, callables, components and the error type
//! - `engine` - type factories, parameter resolution, registry and container
//! - `validate` - post-registration constraints
//! - `infrastructure` - configuration, logging and bootstrap

/// Domain layer - values, shapes, callables and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cradle_domain::*;
}

/// Engine layer - factories, resolver, registry and container
///
/// Re-exports from the engine crate for convenience
pub mod engine {
    pub use cradle_engine::*;
}

/// Validation layer - constraints and the container validator
///
/// Re-exports from the validation crate for convenience
pub mod validate {
    pub use cradle_validate::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use cradle_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::{Error, Result, Value};

pub use cradle_domain::{args, structure};

/// Everything needed to register components and retrieve them
pub mod prelude {
    pub use cradle_domain::{
        Callable, Component, Error, FromValue, Instance, Result, Shape, Signature, Structure,
        Value, Variadic, args, structure,
    };
    pub use cradle_engine::{Container, TypeFactory, TypeRegistry};
    pub use cradle_infrastructure::config::{AppConfig, ConfigLoader};
    pub use cradle_infrastructure::{AppContext, init_app, init_container};
    pub use cradle_validate::{ContainerValidator, ValidationMode};
}
