//! # ECS Error Types
//!
//! All recoverable failures surfaced by the store, pools and arena.
//!
//! Every violation is a typed, checked error returned to the caller. The one
//! deliberate exception is removing an unknown entity, which is a no-op so
//! that teardown stays idempotent.

use thiserror::Error;

use crate::ecs::entity::EntityId;

/// Errors that can occur in the ECS store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// A component type was used before being registered.
    #[error("component type not registered: {type_name}")]
    UnregisteredComponentType {
        /// Human-readable name of the offending type.
        type_name: &'static str,
    },

    /// An operation referenced an entity id with no live record.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// The entity does not currently own a component of the requested type.
    #[error("entity {entity} has no {type_name} component")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: EntityId,
        /// Human-readable name of the missing component type.
        type_name: &'static str,
    },

    /// A fixed-capacity container has no free slot left.
    #[error("{what} full: capacity {capacity}")]
    CapacityExceeded {
        /// Which container ran out of space (e.g. `"component pool"`).
        what: &'static str,
        /// The capacity that was exhausted.
        capacity: usize,
    },

    /// A slot handle whose generation no longer matches live storage.
    #[error("stale handle: slot {index}, generation {generation}")]
    StaleHandle {
        /// Slot index the handle named.
        index: usize,
        /// Generation the handle carried.
        generation: u64,
    },

    /// Invalid configuration file or values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
