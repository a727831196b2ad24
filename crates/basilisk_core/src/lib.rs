//! # BASILISK Core Runtime
//!
//! A single-threaded Entity-Component-System (ECS) designed for:
//! - Deterministic per-tick simulation
//! - Deferred entity mutation (nothing joins or leaves a system mid-tick)
//! - Dense, cache-friendly component storage
//!
//! ## Architecture Rules
//!
//! 1. **The registry is the source of truth** - System entity lists are
//!    derived views, rebuilt only during the per-tick flush
//! 2. **Data-oriented design** - Components are stored in contiguous pools
//!    indexed by entity id
//! 3. **Deferred mutation** - Creates and kills are buffered and drained
//!    exactly once per [`Registry::update`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use basilisk_core::Registry;
//!
//! let mut registry = Registry::new();
//! let entity = registry.create_entity();
//! registry.add_component(entity, Transform::default());
//! registry.update(); // flush: entity joins every matching system
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;
pub mod error;

pub use ecs::{
    AsAny, Component, ComponentTypes, Entity, Pool, Registry, Signature, System, SystemBase,
    MAX_COMPONENT_TYPES,
};
pub use error::{EcsError, EcsResult};
