//! # World Configuration
//!
//! Capacity limits for a store instance, fixed at construction time.
//!
//! The bitset width and pool size are runtime values loaded from code or from
//! a TOML file at startup, not compile-time parameters baked into types.

use serde::{Deserialize, Serialize};

use crate::error::{EcsError, EcsResult};

/// Default number of distinct component types (bitset width).
pub const DEFAULT_MAX_COMPONENT_TYPES: usize = 64;

/// Default number of slots in each component pool.
pub const DEFAULT_COMPONENT_CAPACITY: usize = 1024;

/// Capacity configuration for a [`World`](crate::World).
///
/// Both limits are fixed for the lifetime of the store they configure:
/// registering more distinct component types than `max_component_types`, or
/// inserting more than `component_capacity` live components of one type,
/// fails with [`EcsError::CapacityExceeded`].
///
/// # Example
///
/// ```rust,ignore
/// let config = WorldConfig::new(32, 10_000)?;
/// let world = World::new(config);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldConfig {
    /// Maximum number of distinct component types; the width of every
    /// component-type mask in the store.
    pub max_component_types: usize,

    /// Number of slots in each per-type component pool.
    pub component_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_component_types: DEFAULT_MAX_COMPONENT_TYPES,
            component_capacity: DEFAULT_COMPONENT_CAPACITY,
        }
    }
}

impl WorldConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if either limit is zero.
    pub fn new(max_component_types: usize, component_capacity: usize) -> EcsResult<Self> {
        let config = Self {
            max_component_types,
            component_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the configured limits.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if either limit is zero.
    pub fn validate(&self) -> EcsResult<()> {
        if self.max_component_types == 0 {
            return Err(EcsError::InvalidConfig(
                "max_component_types must be greater than zero".to_string(),
            ));
        }
        if self.component_capacity == 0 {
            return Err(EcsError::InvalidConfig(
                "component_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] on parse failure or invalid limits.
    pub fn from_toml_str(text: &str) -> EcsResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| EcsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if the file cannot be read or
    /// parsed, or if the limits are invalid.
    pub fn from_toml_path(path: impl AsRef<std::path::Path>) -> EcsResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EcsError::InvalidConfig(e.to_string()))?;
        Self::from_toml_str(&text)
    }
}
