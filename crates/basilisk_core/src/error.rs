//! # ECS Error Types
//!
//! All recoverable errors the runtime can report. Precondition violations
//! (asking for a component an entity does not carry) surface here as typed
//! errors rather than silently handing back stale pool data.

use thiserror::Error;

/// Errors that can occur in the ECS runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// Asked for a component the entity does not currently carry.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        /// The entity that was queried.
        entity: u32,
        /// The component type that was requested.
        component: &'static str,
    },

    /// Asked for a component type that was never attached to any entity,
    /// so no pool exists for it.
    #[error("no pool exists for component type {0}")]
    MissingPool(&'static str),

    /// Asked for a system type that was never registered.
    #[error("system not registered: {0}")]
    UnknownSystem(&'static str),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
