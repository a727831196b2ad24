//! # Entity Handles
//!
//! Entities are lightweight identifiers. They carry no data of their own:
//! every payload lives in a component pool indexed by the entity's id.
//!
//! Ids are unique among currently-live entities but are recycled across the
//! process lifetime - a killed entity's id goes back on the registry's free
//! list once its kill has been flushed.

use std::fmt;

/// Opaque handle identifying a bundle of components.
///
/// Copyable and cheap to pass by value. All operations on an entity go
/// through the [`Registry`](crate::Registry) that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// Creates a handle for a raw id. Only the registry mints these.
    #[inline]
    #[must_use]
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric id of this entity.
    ///
    /// Ids are reused after a kill-flush, so an id alone does not identify
    /// an entity across ticks that killed and recreated it.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ordering_by_id() {
        let a = Entity::new(1);
        let b = Entity::new(2);
        assert!(a < b);
        assert_ne!(a, b);
        assert_eq!(a, Entity::new(1));
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::new(7).to_string(), "entity 7");
    }
}
