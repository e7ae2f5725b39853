//! # Component Pools
//!
//! Fixed-capacity storage for one component type, built on the generational
//! arena so freed slot ids can never be confused with their successors.
//!
//! Pools are created by the store when a component type is registered and are
//! reachable by systems through
//! [`World::pool`](crate::ecs::world::World::pool).

use std::any::Any;

use crate::error::{EcsError, EcsResult};
use crate::memory::arena::{GenerationalArena, SlotHandle};

/// Fixed-capacity pool for components of type `T`.
///
/// Allocation and free are O(1) through the arena's free list. All accessors
/// are checked: a handle that was freed (even if its slot has since been
/// reused) fails with [`EcsError::StaleHandle`] instead of returning another
/// component's data.
pub struct ComponentPool<T> {
    arena: GenerationalArena<T>,
}

impl<T: 'static> ComponentPool<T> {
    /// Creates a pool with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            arena: GenerationalArena::new(capacity),
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Returns the number of live components.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Checks whether the pool holds no components.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Inserts a component, returning its slot handle.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] if the pool is full; existing
    /// slots are never overwritten.
    pub fn insert(&mut self, value: T) -> EcsResult<SlotHandle> {
        self.arena.insert(value).map_err(|_| EcsError::CapacityExceeded {
            what: "component pool",
            capacity: self.capacity(),
        })
    }

    /// Gets the component a handle names.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::StaleHandle`] if the handle is no longer valid.
    #[inline]
    pub fn get(&self, handle: SlotHandle) -> EcsResult<&T> {
        self.arena.get(handle).ok_or(EcsError::StaleHandle {
            index: handle.index(),
            generation: handle.generation(),
        })
    }

    /// Gets the component a handle names mutably.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::StaleHandle`] if the handle is no longer valid.
    #[inline]
    pub fn get_mut(&mut self, handle: SlotHandle) -> EcsResult<&mut T> {
        self.arena.get_mut(handle).ok_or(EcsError::StaleHandle {
            index: handle.index(),
            generation: handle.generation(),
        })
    }

    /// Frees a slot, returning its component.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::StaleHandle`] if the handle is no longer valid.
    pub fn free(&mut self, handle: SlotHandle) -> EcsResult<T> {
        self.arena.remove(handle).ok_or(EcsError::StaleHandle {
            index: handle.index(),
            generation: handle.generation(),
        })
    }

    /// Checks whether a handle still names a live component.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.arena.contains(handle)
    }

    /// Iterates over live components as `(handle, component)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> {
        self.arena.iter()
    }
}

/// Type-erased pool surface for the store's heterogeneous pool map.
///
/// Lets entity teardown free slots without knowing the component type, and
/// lets typed accessors downcast back to [`ComponentPool<T>`].
pub(crate) trait AnyPool {
    /// Frees the slot a handle names; returns whether it was live.
    fn free_slot(&mut self, handle: SlotHandle) -> bool;

    /// Upcast for typed read access.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed write access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AnyPool for ComponentPool<T> {
    fn free_slot(&mut self, handle: SlotHandle) -> bool {
        self.arena.remove(handle).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_free() {
        let mut pool: ComponentPool<u32> = ComponentPool::new(4);

        let handle = pool.insert(7).unwrap();
        assert_eq!(pool.get(handle), Ok(&7));

        *pool.get_mut(handle).unwrap() = 8;
        assert_eq!(pool.free(handle), Ok(8));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_exact_capacity_then_overflow() {
        let capacity = 3;
        let mut pool: ComponentPool<usize> = ComponentPool::new(capacity);

        let handles: Vec<_> = (0..capacity)
            .map(|i| pool.insert(i * 10).unwrap())
            .collect();
        assert_eq!(pool.len(), capacity);

        assert_eq!(
            pool.insert(999),
            Err(EcsError::CapacityExceeded {
                what: "component pool",
                capacity,
            })
        );

        // Nothing was corrupted by the failed insert.
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(pool.get(*handle), Ok(&(i * 10)));
        }
    }

    #[test]
    fn test_stale_handle_is_checked() {
        let mut pool: ComponentPool<u32> = ComponentPool::new(1);

        let old = pool.insert(1).unwrap();
        pool.free(old).unwrap();
        let new = pool.insert(2).unwrap();

        assert_eq!(old.index(), new.index());
        assert!(matches!(pool.get(old), Err(EcsError::StaleHandle { .. })));
        assert!(matches!(pool.free(old), Err(EcsError::StaleHandle { .. })));
        assert_eq!(pool.get(new), Ok(&2));
    }

    #[test]
    fn test_any_pool_free_slot() {
        let mut pool: ComponentPool<u32> = ComponentPool::new(2);
        let handle = pool.insert(5).unwrap();

        let erased: &mut dyn AnyPool = &mut pool;
        assert!(erased.free_slot(handle));
        assert!(!erased.free_slot(handle));

        let typed = erased
            .as_any()
            .downcast_ref::<ComponentPool<u32>>()
            .unwrap();
        assert!(typed.is_empty());
    }
}
