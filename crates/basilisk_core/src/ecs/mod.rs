//! # Entity Component System
//!
//! The runtime substrate: reusable entity handles, signature matching,
//! dense component pools, and the registry that orchestrates them.
//!
//! ## Design Philosophy
//!
//! - Entity ids are plain indices, recycled FIFO through a free list
//! - Components live in dense pools, one pool per registered type
//! - System membership is recomputed only during the per-tick flush
//! - No dynamic dispatch beyond the erased pool array and system table

mod component;
mod entity;
mod pool;
mod registry;
mod signature;
mod system;

pub use component::{Component, ComponentTypes};
pub use entity::Entity;
pub use pool::Pool;
pub use registry::Registry;
pub use signature::{Signature, MAX_COMPONENT_TYPES};
pub use system::{AsAny, System, SystemBase};
