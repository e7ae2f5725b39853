//! # ECS World
//!
//! The store: component type registry, per-type pools and the entity index
//! behind one owner.
//!
//! All storage is sized from a [`WorldConfig`] at construction. Every
//! externally reachable operation is checked: misuse surfaces as an
//! [`EcsError`], never as silent corruption.

use std::collections::HashMap;

use crate::config::WorldConfig;
use crate::ecs::entity::{EntityId, EntityIndex, EntityRecord};
use crate::ecs::mask::TypeMask;
use crate::ecs::pool::{AnyPool, ComponentPool};
use crate::ecs::registry::{ComponentTypeToken, TypeRegistry};
use crate::error::{EcsError, EcsResult};
use crate::memory::arena::SlotHandle;

/// The ECS store: entities, their capability records, and one pool per
/// registered component type.
///
/// A `World` owns all of its storage exclusively and shares nothing with
/// other instances, so independent worlds (and parallel tests) never
/// interact. It is single-threaded by design; see the crate docs.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new(WorldConfig::default());
/// world.register_component::<Position>()?;
///
/// let entity = world.create_entity();
/// world.add_component(entity, Position { x: 0, y: 0 })?;
/// ```
pub struct World {
    config: WorldConfig,
    registry: TypeRegistry,
    pools: HashMap<ComponentTypeToken, Box<dyn AnyPool>>,
    entities: EntityIndex,
}

impl World {
    /// Creates a store with the given capacity configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (zero limits).
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid world configuration: {e}");
        }

        Self {
            config,
            registry: TypeRegistry::new(config.max_component_types),
            pools: HashMap::new(),
            entities: EntityIndex::new(config.max_component_types),
        }
    }

    /// Returns the configuration this store was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers component type `T` and constructs its backing pool.
    ///
    /// Must be called before any `add_component::<T>` /
    /// `remove_component::<T>`. Registering the same type again returns the
    /// same token and keeps the existing pool.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] once
    /// [`WorldConfig::max_component_types`] distinct types are registered.
    pub fn register_component<T: 'static>(&mut self) -> EcsResult<ComponentTypeToken> {
        let token = self.registry.register::<T>()?;
        let capacity = self.config.component_capacity;
        self.pools
            .entry(token)
            .or_insert_with(|| Box::new(ComponentPool::<T>::new(capacity)));
        Ok(token)
    }

    /// Looks up the token of an already-registered component type.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnregisteredComponentType`] if `T` was never
    /// registered.
    pub fn token_of<T: 'static>(&self) -> EcsResult<ComponentTypeToken> {
        self.registry.token_of::<T>()
    }

    /// Builds a mask of this store's width with the listed token bits set.
    ///
    /// # Panics
    ///
    /// Panics if any token did not come from this store's registry.
    #[must_use]
    pub fn mask_of(&self, tokens: &[ComponentTypeToken]) -> TypeMask {
        TypeMask::from_tokens(self.config.max_component_types, tokens)
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Creates a new entity with no components.
    ///
    /// Ids increase monotonically and are never reused within this store.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.entities.create();
        tracing::trace!("created entity {}", id);
        id
    }

    /// Removes an entity, freeing every component slot it owns.
    ///
    /// Removing an unknown id is a **no-op**, not an error, so teardown code
    /// racing over the same entities stays idempotent.
    pub fn remove_entity(&mut self, id: EntityId) {
        let Some(record) = self.entities.remove(id) else {
            return;
        };

        for (token, handle) in record.owned_slots() {
            if let Some(pool) = self.pools.get_mut(&token) {
                let freed = pool.free_slot(handle);
                debug_assert!(freed, "entity record named a dead slot");
            }
        }
        tracing::trace!("removed entity {}", id);
    }

    /// Checks whether an entity is live.
    #[inline]
    #[must_use]
    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entities.contains(id)
    }

    /// Returns an entity's capability record.
    #[inline]
    #[must_use]
    pub fn entity_record(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.record(id)
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attaches a component to an entity.
    ///
    /// Allocates a pool slot, sets the entity's bit for `T`'s token and
    /// records the slot handle. If the entity already owns a `T`, the payload
    /// is replaced in place without allocating a new slot.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponentType`] if `T` was never registered,
    /// [`EcsError::EntityNotFound`] for a dead id, and
    /// [`EcsError::CapacityExceeded`] if `T`'s pool is full.
    pub fn add_component<T: 'static>(&mut self, id: EntityId, value: T) -> EcsResult<()> {
        let token = self.registry.token_of::<T>()?;
        if !self.entities.contains(id) {
            return Err(EcsError::EntityNotFound(id));
        }

        let existing = self.entities.record(id).and_then(|r| r.slot(token));
        if let Some(handle) = existing {
            // Already owned: overwrite the payload, keep the slot.
            *self.typed_pool_mut::<T>(token)?.get_mut(handle)? = value;
            return Ok(());
        }

        let handle = self.typed_pool_mut::<T>(token)?.insert(value)?;
        let record = self.entities.record_mut(id);
        debug_assert!(record.is_some(), "entity vanished during add_component");
        if let Some(record) = record {
            record.attach(token, handle);
        }
        Ok(())
    }

    /// Detaches a component from an entity, returning its payload.
    ///
    /// Frees the pool slot, clears the entity's bit and drops the slot
    /// record.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponentType`] if `T` was never registered,
    /// [`EcsError::EntityNotFound`] for a dead id, and
    /// [`EcsError::ComponentNotFound`] if the entity does not own a `T`.
    pub fn remove_component<T: 'static>(&mut self, id: EntityId) -> EcsResult<T> {
        let token = self.registry.token_of::<T>()?;
        let handle = {
            let record = self
                .entities
                .record_mut(id)
                .ok_or(EcsError::EntityNotFound(id))?;
            record.detach(token).ok_or(EcsError::ComponentNotFound {
                entity: id,
                type_name: std::any::type_name::<T>(),
            })?
        };
        self.typed_pool_mut::<T>(token)?.free(handle)
    }

    /// Reads an entity's component of type `T`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnregisteredComponentType`], [`EcsError::EntityNotFound`]
    /// or [`EcsError::ComponentNotFound`], as for
    /// [`remove_component`](Self::remove_component).
    pub fn get_component<T: 'static>(&self, id: EntityId) -> EcsResult<&T> {
        let token = self.registry.token_of::<T>()?;
        let handle = self.slot_of::<T>(id, token)?;
        self.typed_pool::<T>(token)?.get(handle)
    }

    /// Reads an entity's component of type `T` mutably.
    ///
    /// # Errors
    ///
    /// As for [`get_component`](Self::get_component).
    pub fn get_component_mut<T: 'static>(&mut self, id: EntityId) -> EcsResult<&mut T> {
        let token = self.registry.token_of::<T>()?;
        let handle = self.slot_of::<T>(id, token)?;
        self.typed_pool_mut::<T>(token)?.get_mut(handle)
    }

    /// Returns the pool storing all components of type `T`.
    ///
    /// Systems use this to fetch payloads by the slot handles recorded in
    /// entity records.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnregisteredComponentType`] if `T` was never
    /// registered.
    pub fn pool<T: 'static>(&self) -> EcsResult<&ComponentPool<T>> {
        let token = self.registry.token_of::<T>()?;
        self.typed_pool::<T>(token)
    }

    /// Returns the pool storing all components of type `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnregisteredComponentType`] if `T` was never
    /// registered.
    pub fn pool_mut<T: 'static>(&mut self) -> EcsResult<&mut ComponentPool<T>> {
        let token = self.registry.token_of::<T>()?;
        self.typed_pool_mut::<T>(token)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns every live entity whose owned-type mask is a superset of
    /// `required`.
    ///
    /// Linear scan, recomputed on every call; result order is unspecified.
    #[must_use]
    pub fn matching_entities(&self, required: &TypeMask) -> Vec<EntityId> {
        self.entities.matching(required)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn slot_of<T: 'static>(
        &self,
        id: EntityId,
        token: ComponentTypeToken,
    ) -> EcsResult<SlotHandle> {
        let record = self.entities.record(id).ok_or(EcsError::EntityNotFound(id))?;
        record.slot(token).ok_or(EcsError::ComponentNotFound {
            entity: id,
            type_name: std::any::type_name::<T>(),
        })
    }

    fn typed_pool<T: 'static>(&self, token: ComponentTypeToken) -> EcsResult<&ComponentPool<T>> {
        self.pools
            .get(&token)
            .and_then(|pool| pool.as_any().downcast_ref::<ComponentPool<T>>())
            .ok_or(EcsError::UnregisteredComponentType {
                type_name: std::any::type_name::<T>(),
            })
    }

    fn typed_pool_mut<T: 'static>(
        &mut self,
        token: ComponentTypeToken,
    ) -> EcsResult<&mut ComponentPool<T>> {
        self.pools
            .get_mut(&token)
            .and_then(|pool| pool.as_any_mut().downcast_mut::<ComponentPool<T>>())
            .ok_or(EcsError::UnregisteredComponentType {
                type_name: std::any::type_name::<T>(),
            })
    }
}
