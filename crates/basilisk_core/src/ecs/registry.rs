//! # Registry
//!
//! The orchestrator. Owns entity id allocation and reuse, the per-entity
//! signature table, the erased pool array, the system table, and the two
//! deferred-mutation buffers.
//!
//! ## Deferred mutation
//!
//! [`Registry::create_entity`] and [`Registry::kill_entity`] only record
//! intent. System membership changes happen in [`Registry::update`], which
//! the host calls exactly once per tick: the add buffer is fully flushed
//! first, then the kill buffer. An entity created and killed in the same
//! tick therefore joins its systems and leaves them again inside one
//! `update` call.

use std::any::{type_name, TypeId};
use std::collections::VecDeque;

use crate::error::{EcsError, EcsResult};

use super::component::{Component, ComponentTypes};
use super::entity::Entity;
use super::pool::{ErasedPool, Pool};
use super::signature::Signature;
use super::system::System;

/// The central ECS container and orchestrator.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = Registry::new();
/// let entity = registry.create_entity();
/// registry.add_component(entity, Transform::default());
/// registry.update(); // entity joins every system whose requirement it meets
/// ```
#[derive(Default)]
pub struct Registry {
    /// High-water mark of fresh ids handed out. Pool growth targets this,
    /// not the id being written, so pools stay sized to the population even
    /// when ids are non-contiguous from reuse.
    entity_count: usize,
    /// Freed ids awaiting reuse, FIFO.
    free_ids: VecDeque<u32>,
    /// Per-entity signatures, indexed by entity id.
    signatures: Vec<Signature>,
    /// Erased component pools, indexed by component-type id.
    pools: Vec<Option<Box<dyn ErasedPool>>>,
    /// The component-type registration table.
    types: ComponentTypes,
    /// Registered systems, in registration order.
    systems: Vec<(TypeId, Box<dyn System>)>,
    /// Entities created since the last flush.
    pending_add: Vec<Entity>,
    /// Entities killed since the last flush.
    pending_kill: Vec<Entity>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of fresh ids ever allocated.
    ///
    /// This counts id slots, not live entities: killed ids stay counted
    /// until reused.
    #[inline]
    #[must_use]
    pub const fn entity_count(&self) -> usize {
        self.entity_count
    }

    /// Returns the component-type registration table.
    #[inline]
    #[must_use]
    pub const fn component_types(&self) -> &ComponentTypes {
        &self.types
    }

    /// Returns the component-type registration table mutably.
    ///
    /// Systems call [`SystemBase::require`](super::SystemBase::require)
    /// against this during construction, before being registered.
    #[inline]
    pub fn component_types_mut(&mut self) -> &mut ComponentTypes {
        &mut self.types
    }

    /// Returns the current signature of an entity, if its id slot exists.
    #[inline]
    #[must_use]
    pub fn signature_of(&self, entity: Entity) -> Option<Signature> {
        self.signatures.get(entity.id() as usize).copied()
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Allocates an entity handle and marks it pending-add.
    ///
    /// Reuses the oldest freed id if any is waiting (FIFO), otherwise hands
    /// out a fresh one and grows the signature table to cover it. The
    /// entity joins no system until the next [`Registry::update`] flush.
    pub fn create_entity(&mut self) -> Entity {
        let id = if let Some(id) = self.free_ids.pop_front() {
            // The kill-flush already cleared this slot's signature.
            id
        } else {
            let id = u32::try_from(self.entity_count).expect("entity id space exhausted");
            self.entity_count += 1;
            if id as usize >= self.signatures.len() {
                self.signatures.resize(id as usize + 1, Signature::default());
            }
            id
        };

        let entity = Entity::new(id);
        self.pending_add.push(entity);
        tracing::debug!(entity = id, "entity created");
        entity
    }

    /// Marks an entity pending-kill.
    ///
    /// Idempotent within a tick: killing an already-pending entity has no
    /// additional effect. The entity stays visible to systems until the
    /// next [`Registry::update`] flush removes it, clears its signature,
    /// and releases its id for reuse.
    pub fn kill_entity(&mut self, entity: Entity) {
        if self.pending_kill.contains(&entity) {
            return;
        }
        if self.free_ids.contains(&entity.id()) {
            tracing::warn!(entity = entity.id(), "kill on an already-dead entity ignored");
            return;
        }
        self.pending_kill.push(entity);
        tracing::debug!(entity = entity.id(), "entity marked for kill");
    }

    /// Flushes the deferred buffers into system membership lists.
    ///
    /// Must be called exactly once per tick by the host. Order contract:
    ///
    /// 1. Every pending-add entity is tested against every system's
    ///    required signature and appended to the systems it matches.
    /// 2. Every pending-kill entity is removed from every system, its
    ///    signature is cleared, and its id joins the free list.
    ///
    /// Adds always flush fully before kills.
    pub fn update(&mut self) {
        let pending_add = std::mem::take(&mut self.pending_add);
        let added = pending_add.len();
        for entity in pending_add {
            let signature = self.signatures[entity.id() as usize];
            for (_, system) in &mut self.systems {
                if signature.contains_all(system.base().signature()) {
                    system.base_mut().add_entity(entity);
                }
            }
        }

        let pending_kill = std::mem::take(&mut self.pending_kill);
        let killed = pending_kill.len();
        for entity in pending_kill {
            for (_, system) in &mut self.systems {
                system.base_mut().remove_entity(entity);
            }
            self.signatures[entity.id() as usize].reset();
            self.free_ids.push_back(entity.id());
        }

        if added > 0 || killed > 0 {
            tracing::trace!(added, killed, "registry flushed");
        }
    }

    // =========================================================================
    // Component management
    // =========================================================================

    /// Attaches a component to an entity, overwriting any previous value.
    ///
    /// Lazily creates the pool for `T` on first use and grows it to cover
    /// the current entity count. Sets the entity's signature bit for `T`.
    ///
    /// Membership is **not** re-evaluated here: an already-active entity
    /// that gains a qualifying component does not join newly-matching
    /// systems (only the add-flush of pending entities tests signatures).
    ///
    /// # Panics
    ///
    /// Panics if `T` is the first use of a component type beyond the
    /// signature width ([`MAX_COMPONENT_TYPES`](super::MAX_COMPONENT_TYPES)).
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        let component_id = self.types.id_of::<T>();
        let entity_id = entity.id() as usize;

        if component_id >= self.pools.len() {
            self.pools.resize_with(component_id + 1, || None);
        }
        let slot = self.pools[component_id].get_or_insert_with(|| Box::new(Pool::<T>::new()));

        // Growth targets the population high-water mark, not entity_id + 1.
        // Every live id is below entity_count, so the write below is covered.
        if entity_id >= slot.len() {
            slot.grow(self.entity_count);
        }

        let Some(pool) = slot.as_mut().as_any_mut().downcast_mut::<Pool<T>>() else {
            unreachable!("component id {component_id} maps to a pool of another type");
        };
        pool.set(entity_id, component);
        self.signatures[entity_id].set(component_id);

        tracing::debug!(
            entity = entity.id(),
            component = type_name::<T>(),
            "component attached"
        );
    }

    /// Clears the entity's signature bit for `T`.
    ///
    /// The stored pool value is left untouched; it is considered logically
    /// absent. Removing a component that is not present is a silent no-op.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) {
        let component_id = self.types.id_of::<T>();
        if let Some(signature) = self.signatures.get_mut(entity.id() as usize) {
            signature.clear(component_id);
            tracing::debug!(
                entity = entity.id(),
                component = type_name::<T>(),
                "component detached"
            );
        }
    }

    /// Checks whether the entity currently carries a `T`.
    ///
    /// `false` if the id is out of table bounds or `T` was never seen.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        let Some(component_id) = self.types.lookup::<T>() else {
            return false;
        };
        self.signatures
            .get(entity.id() as usize)
            .is_some_and(|signature| signature.test(component_id))
    }

    /// Returns a reference to the entity's `T` component.
    ///
    /// # Errors
    ///
    /// [`EcsError::MissingPool`] if no `T` was ever attached to any entity;
    /// [`EcsError::MissingComponent`] if this entity does not carry `T`.
    pub fn component<T: Component>(&self, entity: Entity) -> EcsResult<&T> {
        let component_id = self.component_id_checked::<T>(entity)?;
        let pool = self.pool::<T>(component_id)?;
        pool.get(entity.id() as usize).ok_or(EcsError::MissingComponent {
            entity: entity.id(),
            component: type_name::<T>(),
        })
    }

    /// Returns a mutable reference to the entity's `T` component.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Registry::component`].
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> EcsResult<&mut T> {
        let component_id = self.component_id_checked::<T>(entity)?;
        let entity_id = entity.id() as usize;
        let slot = self
            .pools
            .get_mut(component_id)
            .and_then(Option::as_mut)
            .ok_or(EcsError::MissingPool(type_name::<T>()))?;
        let Some(pool) = slot.as_mut().as_any_mut().downcast_mut::<Pool<T>>() else {
            unreachable!("component id {component_id} maps to a pool of another type");
        };
        pool.get_mut(entity_id).ok_or(EcsError::MissingComponent {
            entity: entity.id(),
            component: type_name::<T>(),
        })
    }

    /// Resolves the component id for `T` and verifies the signature bit.
    fn component_id_checked<T: Component>(&self, entity: Entity) -> EcsResult<usize> {
        let component_id = self
            .types
            .lookup::<T>()
            .ok_or(EcsError::MissingPool(type_name::<T>()))?;
        let carried = self
            .signatures
            .get(entity.id() as usize)
            .is_some_and(|signature| signature.test(component_id));
        if carried {
            Ok(component_id)
        } else {
            Err(EcsError::MissingComponent {
                entity: entity.id(),
                component: type_name::<T>(),
            })
        }
    }

    /// Fetches the concrete pool for a component id.
    fn pool<T: Component>(&self, component_id: usize) -> EcsResult<&Pool<T>> {
        let slot = self
            .pools
            .get(component_id)
            .and_then(Option::as_ref)
            .ok_or(EcsError::MissingPool(type_name::<T>()))?;
        let Some(pool) = slot.as_ref().as_any().downcast_ref::<Pool<T>>() else {
            unreachable!("component id {component_id} maps to a pool of another type");
        };
        Ok(pool)
    }

    // =========================================================================
    // System management
    // =========================================================================

    /// Registers a system. One instance per distinct system type.
    ///
    /// Systems are flushed (and should be run by the host) in registration
    /// order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        debug_assert!(
            !self.has_system::<S>(),
            "system {} registered twice",
            type_name::<S>()
        );
        tracing::debug!(system = type_name::<S>(), "system registered");
        self.systems.push((TypeId::of::<S>(), Box::new(system)));
    }

    /// Checks whether a system of type `S` is registered.
    #[must_use]
    pub fn has_system<S: System + 'static>(&self) -> bool {
        let key = TypeId::of::<S>();
        self.systems.iter().any(|(type_id, _)| *type_id == key)
    }

    /// Unregisters the system of type `S`, dropping its matched list.
    ///
    /// No-op if `S` was never registered.
    pub fn remove_system<S: System + 'static>(&mut self) {
        let key = TypeId::of::<S>();
        self.systems.retain(|(type_id, _)| *type_id != key);
    }

    /// Returns the registered system of type `S`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownSystem`] if `S` was never registered.
    pub fn system<S: System + 'static>(&self) -> EcsResult<&S> {
        let key = TypeId::of::<S>();
        self.systems
            .iter()
            .find(|(type_id, _)| *type_id == key)
            .and_then(|(_, system)| system.as_ref().as_any().downcast_ref::<S>())
            .ok_or(EcsError::UnknownSystem(type_name::<S>()))
    }

    /// Returns the registered system of type `S` mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownSystem`] if `S` was never registered.
    pub fn system_mut<S: System + 'static>(&mut self) -> EcsResult<&mut S> {
        let key = TypeId::of::<S>();
        self.systems
            .iter_mut()
            .find(|(type_id, _)| *type_id == key)
            .and_then(|(_, system)| system.as_mut().as_any_mut().downcast_mut::<S>())
            .ok_or(EcsError::UnknownSystem(type_name::<S>()))
    }

    /// Runs a closure over a system while keeping the registry accessible.
    ///
    /// The system is detached from the table for the duration of the call
    /// and re-inserted at its original position afterwards, so the closure
    /// gets `&mut S` and `&mut Registry` simultaneously. This is how hosts
    /// drive per-tick system updates that read and write components.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownSystem`] if `S` was never registered.
    pub fn with_system<S, R, F>(&mut self, run: F) -> EcsResult<R>
    where
        S: System + 'static,
        F: FnOnce(&mut S, &mut Self) -> R,
    {
        let key = TypeId::of::<S>();
        let index = self
            .systems
            .iter()
            .position(|(type_id, _)| *type_id == key)
            .ok_or(EcsError::UnknownSystem(type_name::<S>()))?;
        let (type_id, mut boxed) = self.systems.remove(index);

        let Some(system) = boxed.as_mut().as_any_mut().downcast_mut::<S>() else {
            unreachable!("system table entry for {} has another type", type_name::<S>());
        };
        let result = run(system, self);

        // Re-insert at the original slot to preserve registration order,
        // clamped in case the closure unregistered systems before it.
        let index = index.min(self.systems.len());
        self.systems.insert(index, (type_id, boxed));
        Ok(result)
    }
}
