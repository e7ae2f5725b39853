//! # ECS Facade
//!
//! One object composing the store and the scheduler: the full library
//! boundary a host embeds.
//!
//! A host registers component types and systems during setup, then calls
//! [`Ecs::run_tick`] once per frame. Everything the facade owns is released
//! when it drops.

use crate::config::WorldConfig;
use crate::ecs::entity::EntityId;
use crate::ecs::mask::TypeMask;
use crate::ecs::pool::ComponentPool;
use crate::ecs::registry::ComponentTypeToken;
use crate::ecs::scheduler::Scheduler;
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::error::EcsResult;

/// An ECS instance: store plus scheduler.
///
/// # Example
///
/// ```rust,ignore
/// let mut ecs = Ecs::new(WorldConfig::default());
///
/// let pos = ecs.register_component::<Position>()?;
/// let vel = ecs.register_component::<Velocity>()?;
/// ecs.register_system(Physics::new(ecs.world().mask_of(&[pos, vel])));
///
/// let entity = ecs.create_entity();
/// ecs.add_component(entity, Position { x: 0, y: 0 })?;
///
/// loop {
///     ecs.run_tick(); // once per host frame
/// }
/// ```
pub struct Ecs {
    world: World,
    scheduler: Scheduler,
    ticks: u64,
}

impl Ecs {
    /// Creates an instance with the given capacity configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (zero limits).
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            world: World::new(config),
            scheduler: Scheduler::new(),
            ticks: 0,
        }
    }

    /// Returns the store.
    #[inline]
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Returns the store mutably.
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Returns the number of completed ticks.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Registers component type `T`; see
    /// [`World::register_component`](crate::ecs::world::World::register_component).
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`](crate::error::EcsError) once
    /// the configured number of distinct types is registered.
    pub fn register_component<T: 'static>(&mut self) -> EcsResult<ComponentTypeToken> {
        self.world.register_component::<T>()
    }

    /// Appends a system to the tick order, permanently.
    pub fn register_system<S: System + 'static>(&mut self, system: S) {
        self.scheduler.register(system);
    }

    /// Returns the number of registered systems.
    #[inline]
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Creates a new entity with no components.
    pub fn create_entity(&mut self) -> EntityId {
        self.world.create_entity()
    }

    /// Removes an entity and frees its component slots; a no-op for unknown
    /// ids.
    pub fn remove_entity(&mut self, id: EntityId) {
        self.world.remove_entity(id);
    }

    /// Attaches a component to an entity; see
    /// [`World::add_component`](crate::ecs::world::World::add_component).
    ///
    /// # Errors
    ///
    /// As for [`World::add_component`](crate::ecs::world::World::add_component).
    pub fn add_component<T: 'static>(&mut self, id: EntityId, value: T) -> EcsResult<()> {
        self.world.add_component(id, value)
    }

    /// Detaches a component from an entity, returning its payload.
    ///
    /// # Errors
    ///
    /// As for
    /// [`World::remove_component`](crate::ecs::world::World::remove_component).
    pub fn remove_component<T: 'static>(&mut self, id: EntityId) -> EcsResult<T> {
        self.world.remove_component::<T>(id)
    }

    /// Reads an entity's component of type `T`.
    ///
    /// # Errors
    ///
    /// As for [`World::get_component`](crate::ecs::world::World::get_component).
    pub fn get_component<T: 'static>(&self, id: EntityId) -> EcsResult<&T> {
        self.world.get_component::<T>(id)
    }

    /// Reads an entity's component of type `T` mutably.
    ///
    /// # Errors
    ///
    /// As for [`World::get_component`](crate::ecs::world::World::get_component).
    pub fn get_component_mut<T: 'static>(&mut self, id: EntityId) -> EcsResult<&mut T> {
        self.world.get_component_mut::<T>(id)
    }

    /// Returns the pool for component type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnregisteredComponentType`](crate::error::EcsError)
    /// if `T` was never registered.
    pub fn pool<T: 'static>(&self) -> EcsResult<&ComponentPool<T>> {
        self.world.pool::<T>()
    }

    /// Returns the pool for component type `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnregisteredComponentType`](crate::error::EcsError)
    /// if `T` was never registered.
    pub fn pool_mut<T: 'static>(&mut self) -> EcsResult<&mut ComponentPool<T>> {
        self.world.pool_mut::<T>()
    }

    /// Returns every live entity whose mask is a superset of `required`.
    #[must_use]
    pub fn matching_entities(&self, required: &TypeMask) -> Vec<EntityId> {
        self.world.matching_entities(required)
    }

    /// Runs every registered system once, in registration order.
    ///
    /// Called by the host once per frame/logical step. Fully synchronous:
    /// every system has completed when this returns.
    pub fn run_tick(&mut self) {
        self.scheduler.run_tick(&mut self.world);
        self.ticks += 1;
        tracing::trace!(
            "tick {} complete: {} systems over {} entities",
            self.ticks,
            self.scheduler.len(),
            self.world.entity_count()
        );
    }
}
