//! # Gameplay Event Payloads
//!
//! Transient values describing notable occurrences within a tick. Events
//! are moved into [`EventBus::emit`](crate::EventBus::emit) and exist only
//! for the duration of the dispatch.

use basilisk_core::Entity;

/// Two collider-bearing entities overlapped this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionEvent {
    /// First entity of the pair.
    pub a: Entity,
    /// Second entity of the pair.
    pub b: Entity,
}

/// Directional keys the keyboard control system understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Steer up.
    Up,
    /// Steer right.
    Right,
    /// Steer down.
    Down,
    /// Steer left.
    Left,
}

/// A key went down this tick, as reported by the host's input polling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPressedEvent {
    /// The key that was pressed.
    pub key: Key,
}
