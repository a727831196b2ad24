//! # System Base
//!
//! A system is a logic unit that runs once per tick over every entity
//! matching its required signature. The runtime imposes no shape on the
//! per-tick entry point - authors give each system whatever update method
//! its concern needs and the host calls it directly.
//!
//! What the runtime does own is the bookkeeping every system shares: the
//! required signature, built with [`SystemBase::require`] during
//! construction, and the matched-entity list, maintained exclusively by the
//! registry during the flush.

use std::any::Any;
use std::cmp::Ordering;

use super::component::{Component, ComponentTypes};
use super::entity::Entity;
use super::signature::Signature;

/// Upcast helper so boxed systems can be recovered as their concrete type.
///
/// Blanket-implemented for every `'static` type; authors never implement
/// this by hand.
pub trait AsAny {
    /// Returns `self` as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as mutable [`Any`] for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Trait every system implements to expose its shared bookkeeping.
///
/// Concrete systems hold a [`SystemBase`] field and return it from both
/// accessors; everything else about a system is author-defined.
pub trait System: AsAny {
    /// Returns the system's shared state.
    fn base(&self) -> &SystemBase;

    /// Returns the system's shared state mutably.
    fn base_mut(&mut self) -> &mut SystemBase;
}

/// Shared state of every system: required signature + matched entities.
///
/// The matched-entity list is a derived view. The registry is the source of
/// truth for which entities exist and what they carry; this list is rebuilt
/// from it during every [`Registry::update`](crate::Registry::update) flush.
#[derive(Default)]
pub struct SystemBase {
    /// Which component types an entity must carry to be matched.
    signature: Signature,
    /// Entities currently matched, in the order the flush appended them.
    entities: Vec<Entity>,
}

impl SystemBase {
    /// Creates a base with an empty requirement and no matched entities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires component type `T` for membership in this system.
    ///
    /// Call once per required type while constructing the system, before it
    /// is registered with any registry. Requirements are fixed afterwards.
    pub fn require<T: Component>(&mut self, types: &mut ComponentTypes) {
        self.signature.set(types.id_of::<T>());
    }

    /// Returns the required signature.
    #[inline]
    #[must_use]
    pub const fn signature(&self) -> Signature {
        self.signature
    }

    /// Returns the currently-matched entities.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Appends an entity to the matched list.
    ///
    /// Called by the registry during the add-flush; authors have no reason
    /// to call this directly.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Removes an entity from the matched list by id equality.
    ///
    /// Linear scan over the whole list. Removing an entity that is not in
    /// the list is a silent no-op. Called by the registry during the
    /// kill-flush.
    pub fn remove_entity(&mut self, entity: Entity) {
        self.entities.retain(|other| *other != entity);
    }

    /// Reorders the matched list in place by a caller-supplied total order.
    ///
    /// Uses `slice::sort_by`, which is stable: entities that compare equal
    /// keep their relative flush order. Useful for establishing draw order
    /// before iterating.
    pub fn sort_entities_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Entity, &Entity) -> Ordering,
    {
        self.entities.sort_by(compare);
    }
}
