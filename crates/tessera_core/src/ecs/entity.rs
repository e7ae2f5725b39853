//! # Entity Management
//!
//! Entities are opaque identifiers: all of their state lives in the index as
//! a capability mask plus a map from component type token to pool slot.
//!
//! The per-record invariant: bit *i* is set in the mask iff the slot map has
//! an entry for token *i*. Both sides change together through
//! [`EntityRecord::attach`] / [`EntityRecord::detach`].

use std::collections::HashMap;
use std::fmt;

use crate::ecs::mask::TypeMask;
use crate::ecs::registry::ComponentTypeToken;
use crate::memory::arena::SlotHandle;

/// Unique identifier for an entity.
///
/// Ids increase monotonically and are never reused within one store, so they
/// carry no generation tag (unlike [`SlotHandle`], whose slots *are* reused).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    #[inline]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What one entity owns: its type mask and per-type slot handles.
pub struct EntityRecord {
    mask: TypeMask,
    slots: HashMap<ComponentTypeToken, SlotHandle>,
}

impl EntityRecord {
    fn new(mask_width: usize) -> Self {
        Self {
            mask: TypeMask::new(mask_width),
            slots: HashMap::new(),
        }
    }

    /// Returns the entity's owned-type mask.
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> &TypeMask {
        &self.mask
    }

    /// Checks whether the entity owns a component with this token.
    #[inline]
    #[must_use]
    pub fn owns(&self, token: ComponentTypeToken) -> bool {
        self.mask.is_set(token)
    }

    /// Returns the slot handle recorded for a token, if the entity owns one.
    #[inline]
    #[must_use]
    pub fn slot(&self, token: ComponentTypeToken) -> Option<SlotHandle> {
        self.slots.get(&token).copied()
    }

    /// Records ownership: sets the token's bit and stores the slot handle.
    pub(crate) fn attach(&mut self, token: ComponentTypeToken, handle: SlotHandle) {
        self.mask.set(token);
        self.slots.insert(token, handle);
    }

    /// Drops ownership: clears the token's bit and removes the slot entry.
    pub(crate) fn detach(&mut self, token: ComponentTypeToken) -> Option<SlotHandle> {
        self.mask.clear(token);
        self.slots.remove(&token)
    }

    /// Iterates over every `(token, slot handle)` the entity owns.
    pub(crate) fn owned_slots(
        &self,
    ) -> impl Iterator<Item = (ComponentTypeToken, SlotHandle)> + '_ {
        self.slots.iter().map(|(token, handle)| (*token, *handle))
    }
}

/// The index of all live entities in a store.
pub struct EntityIndex {
    records: HashMap<EntityId, EntityRecord>,
    next_id: u64,
    mask_width: usize,
}

impl EntityIndex {
    /// Creates an empty index whose records use masks of `mask_width` bits.
    ///
    /// # Panics
    ///
    /// Panics if `mask_width` is zero.
    #[must_use]
    pub fn new(mask_width: usize) -> Self {
        assert!(mask_width > 0, "mask_width must be greater than zero");
        Self {
            records: HashMap::new(),
            next_id: 0,
            mask_width,
        }
    }

    /// Creates a new entity with an empty record, returning its id.
    pub fn create(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.records.insert(id, EntityRecord::new(self.mask_width));
        id
    }

    /// Removes an entity's record, returning it so the caller can free the
    /// slots it names. Returns `None` for unknown ids.
    pub fn remove(&mut self, id: EntityId) -> Option<EntityRecord> {
        self.records.remove(&id)
    }

    /// Checks whether an entity is live.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.records.contains_key(&id)
    }

    /// Returns an entity's record.
    #[inline]
    #[must_use]
    pub fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        self.records.get(&id)
    }

    /// Returns an entity's record mutably.
    #[inline]
    pub(crate) fn record_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.records.get_mut(&id)
    }

    /// Returns every entity whose mask is a superset of `required`.
    ///
    /// Linear scan over all records, recomputed on every call; the result
    /// order is unspecified (entity storage is unordered).
    #[must_use]
    pub fn matching(&self, required: &TypeMask) -> Vec<EntityId> {
        self.records
            .iter()
            .filter(|(_, record)| record.mask.contains_all(required))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks whether no entity is live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
