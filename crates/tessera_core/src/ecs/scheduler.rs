//! # System Scheduler
//!
//! Ordered system list and the per-tick dispatch loop.
//!
//! Systems run strictly sequentially, in registration order, exactly once per
//! tick. The matching-entity query is recomputed fresh for every system, so a
//! mutation made by an earlier system is visible to every later system within
//! the same tick.

use crate::ecs::system::System;
use crate::ecs::world::World;

/// Ordered registry of systems with the tick dispatch loop.
///
/// Registration order is permanent: it is the execution order of every tick
/// for the scheduler's lifetime.
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a system; it will run after every previously registered
    /// system, on every subsequent tick.
    pub fn register<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
        tracing::debug!("registered system #{}", self.systems.len());
    }

    /// Returns the number of registered systems.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Checks whether no system is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Runs every system once, in registration order.
    ///
    /// Each system receives the entities matching its required mask *at that
    /// point in the tick* plus mutable access to the whole store.
    pub fn run_tick(&mut self, world: &mut World) {
        for system in &mut self.systems {
            let matched = world.matching_entities(system.required_mask());
            system.update(&matched, world);
        }
    }
}
