//! # Signatures
//!
//! A signature is a fixed-width bitset over component-type ids. One
//! signature describes which components an entity carries; another describes
//! which components a system requires. An entity matches a system iff the
//! system's signature is a subset of the entity's.

/// Maximum number of distinct component types the runtime supports.
///
/// This is the signature width. Registering more component types than this
/// is a fatal configuration error, surfaced at the point of first use.
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Bitset over component-type ids. 64 component types per signature.
///
/// The default signature is all-clear (no components).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Signature(u64);

impl Signature {
    /// Sets the bit for a component-type id.
    ///
    /// # Arguments
    ///
    /// * `component_id` - The component type id (0 to 63)
    #[inline]
    pub fn set(&mut self, component_id: usize) {
        debug_assert!(component_id < MAX_COMPONENT_TYPES, "component id out of range");
        self.0 |= 1 << component_id;
    }

    /// Clears the bit for a component-type id.
    #[inline]
    pub fn clear(&mut self, component_id: usize) {
        debug_assert!(component_id < MAX_COMPONENT_TYPES, "component id out of range");
        self.0 &= !(1 << component_id);
    }

    /// Tests the bit for a component-type id.
    #[inline]
    #[must_use]
    pub const fn test(self, component_id: usize) -> bool {
        (self.0 >> component_id) & 1 == 1
    }

    /// Clears every bit. A reused entity id starts from this state.
    #[inline]
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Checks whether every bit of `required` is also set in `self`.
    ///
    /// This is the sole membership predicate between entities and systems:
    /// extra bits on the entity are ignored, a single missing required bit
    /// fails the match.
    #[inline]
    #[must_use]
    pub const fn contains_all(self, required: Self) -> bool {
        (self.0 & required.0) == required.0
    }

    /// Checks whether no bit is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}
