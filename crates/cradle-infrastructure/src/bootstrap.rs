//! Container bootstrap
//!
//! The composition root: turns a populated registry and the application
//! configuration into a container that has passed validation.
//!
//! ```text
//! TypeRegistry ─┐
//!               ├─▶ Container ──ContainerValidator──▶ AppContext
//! AppConfig ────┘   (parameters)   (validation mode)
//! ```
//!
//! Retrieval is only possible through the returned container, so a failed
//! validation blocks every retrieval.

use std::sync::Arc;

use cradle_domain::{FromValue, Result, Value};
use cradle_engine::{Container, TypeRegistry};
use tracing::info;

use crate::config::AppConfig;

/// Validated container together with the configuration it was built from
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Arc<AppConfig>,
    container: Arc<Container>,
}

impl AppContext {
    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The validated container, shareable across threads
    pub fn container(&self) -> Arc<Container> {
        Arc::clone(&self.container)
    }

    /// Retrieve an instance by TypeID
    pub fn get(&self, id: &str) -> Result<Value> {
        self.container.get(id)
    }

    /// Retrieve an instance by TypeID and convert it
    pub fn get_as<T: FromValue>(&self, id: &str) -> Result<T> {
        self.container.get_as(id)
    }
}

/// Build a container from `registry` and validate it as configured
///
/// # Errors
///
/// Fails for an unknown constraint name or with the validation result.
pub fn init_container(registry: TypeRegistry, config: &AppConfig) -> Result<Container> {
    let container = Container::new(registry, config.container_parameters()?);

    let validator = config.validation.validator()?;
    validator.validate(&container)?;

    info!(
        types = container.registry().len(),
        parameters = container.parameters().len(),
        constraints = ?validator.constraint_names(),
        "Container ready"
    );
    Ok(container)
}

/// Build the application context
///
/// # Errors
///
/// See [`init_container`].
pub fn init_app(registry: TypeRegistry, config: AppConfig) -> Result<AppContext> {
    let container = init_container(registry, &config)?;
    Ok(AppContext {
        config: Arc::new(config),
        container: Arc::new(container),
    })
}
