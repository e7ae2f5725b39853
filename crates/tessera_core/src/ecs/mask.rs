//! # Component Type Masks
//!
//! Runtime-width bitsets tracking which component types an entity owns, and
//! which types a system requires.
//!
//! The width is a per-store configuration value, so masks from different
//! stores (or different configs) must not be mixed; width equality is checked
//! in debug builds.

use bit_vec::BitVec;

use crate::ecs::registry::ComponentTypeToken;

/// A fixed-width bitset over component type tokens.
///
/// Bit *i* set means "owns (or requires) the component type with token *i*".
/// An entity qualifies for a system when its mask is a **superset** of the
/// system's required mask; owning extra, unrelated components never
/// disqualifies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMask {
    bits: BitVec,
}

impl TypeMask {
    /// Creates an empty mask of the given width.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            bits: BitVec::from_elem(width, false),
        }
    }

    /// Creates a mask of the given width with the listed token bits set.
    ///
    /// # Panics
    ///
    /// Panics if any token's index is not below `width`.
    #[must_use]
    pub fn from_tokens(width: usize, tokens: &[ComponentTypeToken]) -> Self {
        let mut mask = Self::new(width);
        for token in tokens {
            mask.set(*token);
        }
        mask
    }

    /// Returns the mask width in bits.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Sets the bit for a token.
    ///
    /// # Panics
    ///
    /// Panics if the token's index is not below the mask width.
    #[inline]
    pub fn set(&mut self, token: ComponentTypeToken) {
        self.bits.set(token.index(), true);
    }

    /// Clears the bit for a token.
    ///
    /// # Panics
    ///
    /// Panics if the token's index is not below the mask width.
    #[inline]
    pub fn clear(&mut self, token: ComponentTypeToken) {
        self.bits.set(token.index(), false);
    }

    /// Checks whether the bit for a token is set.
    ///
    /// Out-of-width tokens read as unset.
    #[inline]
    #[must_use]
    pub fn is_set(&self, token: ComponentTypeToken) -> bool {
        self.bits.get(token.index()).unwrap_or(false)
    }

    /// Checks whether every bit set in `required` is also set in `self`.
    ///
    /// This is the superset match used by the per-tick query: an empty
    /// `required` mask is contained in every mask.
    #[must_use]
    pub fn contains_all(&self, required: &Self) -> bool {
        debug_assert_eq!(
            self.width(),
            required.width(),
            "masks from different store configurations"
        );
        required
            .bits
            .blocks()
            .zip(self.bits.blocks())
            .all(|(req, have)| (req & have) == req)
    }

    /// Checks whether no bit is set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.none()
    }
}
