//! # Component Type Registry
//!
//! Hands out one ascending token per distinct component type at runtime.
//!
//! Tokens index bits in a [`TypeMask`](crate::ecs::mask::TypeMask) and key
//! the per-type pools, so they must stay below the configured mask width.
//! They are stable for the lifetime of the registry but make no cross-run
//! guarantee.

use std::any::TypeId;
use std::collections::HashMap;

use crate::error::{EcsError, EcsResult};

/// Opaque identifier for a registered component type.
///
/// Assigned in first-registration order: the first distinct type gets token 0,
/// the next token 1, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentTypeToken(usize);

impl ComponentTypeToken {
    /// Returns the token's bit index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Runtime registry mapping component types to tokens.
///
/// Replaces static per-type counters: each registry instance starts at token
/// zero, so independent stores (and parallel tests) never share state.
pub struct TypeRegistry {
    tokens: HashMap<TypeId, ComponentTypeToken>,
    max_types: usize,
}

impl TypeRegistry {
    /// Creates a registry that can hold `max_types` distinct types.
    ///
    /// # Panics
    ///
    /// Panics if `max_types` is zero.
    #[must_use]
    pub fn new(max_types: usize) -> Self {
        assert!(max_types > 0, "max_types must be greater than zero");
        Self {
            tokens: HashMap::new(),
            max_types,
        }
    }

    /// Registers `T`, returning its token.
    ///
    /// Registering the same type again returns the same token.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] once `max_types` distinct types
    /// are registered.
    pub fn register<T: 'static>(&mut self) -> EcsResult<ComponentTypeToken> {
        if let Some(token) = self.tokens.get(&TypeId::of::<T>()) {
            return Ok(*token);
        }

        if self.tokens.len() >= self.max_types {
            return Err(EcsError::CapacityExceeded {
                what: "type registry",
                capacity: self.max_types,
            });
        }

        let token = ComponentTypeToken(self.tokens.len());
        self.tokens.insert(TypeId::of::<T>(), token);
        tracing::debug!(
            "registered component type {} as token {}",
            std::any::type_name::<T>(),
            token.index()
        );
        Ok(token)
    }

    /// Looks up the token of an already-registered type.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnregisteredComponentType`] if `T` was never
    /// registered.
    pub fn token_of<T: 'static>(&self) -> EcsResult<ComponentTypeToken> {
        self.tokens.get(&TypeId::of::<T>()).copied().ok_or(
            EcsError::UnregisteredComponentType {
                type_name: std::any::type_name::<T>(),
            },
        )
    }

    /// Returns the number of registered types.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Checks whether no type has been registered yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the maximum number of distinct types.
    #[inline]
    #[must_use]
    pub const fn max_types(&self) -> usize {
        self.max_types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Position;
    struct Velocity;
    struct Health;

    #[test]
    fn test_tokens_ascend_in_registration_order() {
        let mut registry = TypeRegistry::new(8);

        let pos = registry.register::<Position>().unwrap();
        let vel = registry.register::<Velocity>().unwrap();
        assert_eq!(pos.index(), 0);
        assert_eq!(vel.index(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = TypeRegistry::new(8);

        let first = registry.register::<Position>().unwrap();
        let again = registry.register::<Position>().unwrap();
        assert_eq!(first, again);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_full() {
        let mut registry = TypeRegistry::new(2);

        registry.register::<Position>().unwrap();
        registry.register::<Velocity>().unwrap();
        assert!(matches!(
            registry.register::<Health>(),
            Err(EcsError::CapacityExceeded { capacity: 2, .. })
        ));

        // Re-registering a known type still succeeds at capacity.
        assert!(registry.register::<Position>().is_ok());
    }

    #[test]
    fn test_token_of_unregistered() {
        let registry = TypeRegistry::new(2);
        assert!(matches!(
            registry.token_of::<Position>(),
            Err(EcsError::UnregisteredComponentType { .. })
        ));
    }

    #[test]
    fn test_independent_registries_do_not_share_state() {
        let mut a = TypeRegistry::new(4);
        let mut b = TypeRegistry::new(4);

        a.register::<Position>().unwrap();
        let b_vel = b.register::<Velocity>().unwrap();

        // Each registry counts from zero.
        assert_eq!(b_vel.index(), 0);
    }
}
