//! # Generational Arena
//!
//! A fixed-capacity slot store whose handles carry a generation counter.
//!
//! Freeing a slot bumps the arena-wide generation, so a handle issued before
//! the free can never alias the slot's next occupant: lookups with the old
//! handle simply return `None`. The free list threads through the free slots
//! themselves, so allocate and free are O(1) with no side storage.

use crate::error::{EcsError, EcsResult};

/// Handle to an occupied slot in a [`GenerationalArena`].
///
/// Valid iff the slot it names is still occupied and its stored generation
/// matches the handle's. Handles are cheap to copy and remain safe to hold
/// across frees: a stale handle fails lookup instead of aliasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    index: usize,
    generation: u64,
}

impl SlotHandle {
    /// Creates a handle from a slot index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: usize, generation: u64) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index this handle names.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Returns the generation this handle was issued under.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// One storage slot: either free (linking to the next free slot) or occupied.
enum Slot<T> {
    Free { next_free: Option<usize> },
    Occupied { generation: u64, value: T },
}

/// A fixed-capacity generational slot store.
///
/// All slots are allocated at construction; `insert` and `remove` are O(1)
/// via an intrusive free list. The capacity cannot change afterwards:
/// inserting into a full arena fails with [`EcsError::CapacityExceeded`]
/// rather than overwriting anything.
///
/// # Example
///
/// ```rust,ignore
/// let mut arena: GenerationalArena<&str> = GenerationalArena::new(10);
///
/// let handle = arena.insert("hello")?;
/// assert_eq!(arena.get(handle), Some(&"hello"));
///
/// arena.remove(handle);
/// assert!(!arena.contains(handle)); // permanently stale
/// ```
pub struct GenerationalArena<T> {
    /// The slot array, allocated once.
    slots: Box<[Slot<T>]>,
    /// Head of the free list threaded through `Slot::Free.next_free`.
    free_head: Option<usize>,
    /// Arena-wide generation; bumped on every remove.
    generation: u64,
    /// Number of occupied slots.
    len: usize,
    /// Total capacity.
    capacity: usize,
}

impl<T> GenerationalArena<T> {
    /// Creates a new arena with the specified capacity.
    ///
    /// All slots start free, linked in index order.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let slots = (0..capacity)
            .map(|i| Slot::Free {
                next_free: if i + 1 < capacity { Some(i + 1) } else { None },
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            slots,
            free_head: Some(0),
            generation: 0,
            len: 0,
            capacity,
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied slots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the arena holds no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a value, returning a handle tagged with the current generation.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExceeded`] if no free slot exists. Existing
    /// slots are never overwritten.
    pub fn insert(&mut self, value: T) -> EcsResult<SlotHandle> {
        let Some(index) = self.free_head else {
            return Err(EcsError::CapacityExceeded {
                what: "generational arena",
                capacity: self.capacity,
            });
        };

        // The free list only ever links free slots.
        let next_free = match &self.slots[index] {
            Slot::Free { next_free } => *next_free,
            Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
        };

        self.free_head = next_free;
        self.slots[index] = Slot::Occupied {
            generation: self.generation,
            value,
        };
        self.len += 1;

        Ok(SlotHandle::new(index, self.generation))
    }

    /// Gets the value a handle names, if the handle is still valid.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        match self.slots.get(handle.index())? {
            Slot::Occupied { generation, value } if *generation == handle.generation() => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Gets the value a handle names mutably, if the handle is still valid.
    #[inline]
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index())? {
            Slot::Occupied { generation, value } if *generation == handle.generation() => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Removes the value a handle names, if the handle is still valid.
    ///
    /// Frees the slot onto the free list and bumps the arena generation, so
    /// every handle previously issued for this slot becomes permanently
    /// invalid.
    pub fn remove(&mut self, handle: SlotHandle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }

        let index = handle.index();
        let old = std::mem::replace(
            &mut self.slots[index],
            Slot::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(index);
        self.generation += 1;
        self.len -= 1;

        match old {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Free { .. } => None,
        }
    }

    /// Checks whether a handle still names a live value.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Frees every slot, rebuilding the free list in index order.
    ///
    /// The generation counter advances (and is never reset), so handles
    /// issued before the clear stay invalid against anything inserted after
    /// it.
    pub fn clear(&mut self) {
        let capacity = self.capacity;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = Slot::Free {
                next_free: if i + 1 < capacity { Some(i + 1) } else { None },
            };
        }
        self.free_head = Some(0);
        self.generation += 1;
        self.len = 0;
    }

    /// Iterates over occupied slots as `(handle, value)` pairs.
    ///
    /// Free slots are skipped; every yielded handle is valid at yield time.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied { generation, value } => {
                    Some((SlotHandle::new(index, *generation), value))
                }
                Slot::Free { .. } => None,
            })
    }
}
