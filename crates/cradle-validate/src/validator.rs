//! Container validator
//!
//! Runs an ordered batch of constraints over a container.

use cradle_domain::{Error, Result};
use cradle_engine::Container;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constraint::{Constraint, default_constraints, resolve_constraint};
use crate::constraints::NoInvalidTypes;

/// How violations are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first violation and return it as-is
    #[default]
    FailFast,
    /// Run every constraint and return all violations as [`Error::Validation`]
    Aggregate,
}

/// Ordered batch of constraints
pub struct ContainerValidator {
    constraints: Vec<Box<dyn Constraint>>,
    mode: ValidationMode,
}

impl Default for ContainerValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ContainerValidator {
    /// A validator without constraints
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            mode: ValidationMode::default(),
        }
    }

    /// Every registered constraint, in run order
    pub fn with_defaults() -> Self {
        Self {
            constraints: default_constraints(),
            mode: ValidationMode::default(),
        }
    }

    /// The named constraints, in the given order, after the baseline
    ///
    /// [`NoInvalidTypes`] always runs first whether it is named or not, so a
    /// container with a malformed descriptor never validates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unknown constraint name.
    pub fn with_constraints<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let baseline = NoInvalidTypes;
        let mut constraints: Vec<Box<dyn Constraint>> = vec![Box::new(baseline)];
        for name in names.iter().map(AsRef::as_ref) {
            if name != baseline.name() {
                constraints.push(resolve_constraint(name)?);
            }
        }
        Ok(Self {
            constraints,
            mode: ValidationMode::default(),
        })
    }

    /// Append a constraint
    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Set the reporting mode
    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// The reporting mode
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Names of the configured constraints, in run order
    pub fn constraint_names(&self) -> Vec<&'static str> {
        self.constraints.iter().map(|c| c.name()).collect()
    }

    /// Run every constraint over `container`
    ///
    /// # Errors
    ///
    /// In fail-fast mode the first violation; in aggregate mode
    /// [`Error::Validation`] with every violation in constraint order.
    pub fn validate(&self, container: &Container) -> Result<()> {
        match self.mode {
            ValidationMode::FailFast => {
                for constraint in &self.constraints {
                    debug!(constraint = constraint.name(), "Running constraint");
                    constraint.validate(container)?;
                }
            }
            ValidationMode::Aggregate => {
                let violations: Vec<Error> = self
                    .constraints
                    .iter()
                    .flat_map(|constraint| {
                        debug!(constraint = constraint.name(), "Running constraint");
                        constraint.check(container)
                    })
                    .collect();
                if !violations.is_empty() {
                    return Err(Error::Validation { violations });
                }
            }
        }

        info!(
            constraints = self.constraints.len(),
            types = container.registry().len(),
            mode = ?self.mode,
            "Container validated"
        );
        Ok(())
    }
}

impl std::fmt::Debug for ContainerValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerValidator")
            .field("constraints", &self.constraint_names())
            .field("mode", &self.mode)
            .finish()
    }
}
