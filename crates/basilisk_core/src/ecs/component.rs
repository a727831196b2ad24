//! # Component Types
//!
//! Components are plain data payloads attached to entities. The runtime is
//! generic over them: any `Default + 'static` type qualifies.
//!
//! Each distinct component type gets a small integer id the first time it is
//! used, assigned from an explicit registration table rather than per-type
//! static state. The mapping is injective and stable for the process
//! lifetime.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::signature::MAX_COMPONENT_TYPES;

/// Marker trait for component payloads.
///
/// Pools grow by default-filling fresh slots, so components must be
/// [`Default`]. Occupancy is tracked by the owning entity's signature bit,
/// not by the pool, so a default-valued slot is simply "logically absent".
pub trait Component: Default + 'static {}

impl<T: Default + 'static> Component for T {}

/// Registration table mapping component types to their numeric ids.
///
/// Ids are assigned monotonically starting at 0, on first use, and are
/// never reassigned. The table is owned by the
/// [`Registry`](crate::Registry).
#[derive(Default)]
pub struct ComponentTypes {
    ids: HashMap<TypeId, usize>,
    /// Type names indexed by component id, for diagnostics.
    names: Vec<&'static str>,
}

impl ComponentTypes {
    /// Creates an empty registration table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `T`, registering it on first use.
    ///
    /// Every call with the same `T` returns the same id; the first call for
    /// a never-seen `T` returns a fresh one.
    ///
    /// # Panics
    ///
    /// Panics if registering `T` would exceed [`MAX_COMPONENT_TYPES`]. That
    /// is a fatal configuration error: the signature width cannot represent
    /// the new type, so it must be refused at the point of first use.
    pub fn id_of<T: Component>(&mut self) -> usize {
        let next = self.names.len();
        let id = *self.ids.entry(TypeId::of::<T>()).or_insert_with(|| {
            assert!(
                next < MAX_COMPONENT_TYPES,
                "component type limit exceeded: {} would be type #{} but the \
                 signature width is {MAX_COMPONENT_TYPES}",
                type_name::<T>(),
                next + 1,
            );
            next
        });
        if id == next {
            self.names.push(type_name::<T>());
            tracing::debug!(component = type_name::<T>(), id, "component type registered");
        }
        id
    }

    /// Returns the id for `T` without registering it.
    #[inline]
    #[must_use]
    pub fn lookup<T: Component>(&self) -> Option<usize> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the diagnostic name recorded for a component id.
    #[inline]
    #[must_use]
    pub fn name_of(&self, component_id: usize) -> Option<&'static str> {
        self.names.get(component_id).copied()
    }

    /// Returns the number of component types registered so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks whether no component type has been registered yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
