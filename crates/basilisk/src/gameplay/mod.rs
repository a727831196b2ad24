//! # Stock Gameplay Roster
//!
//! Plain-data components, event payloads, and the systems that operate on
//! them. The core runtime is generic over all of this - nothing here is
//! special-cased by the registry. It doubles as the reference consumer of
//! the core API: every registry operation and the full event round trip is
//! exercised by at least one system in this module.
//!
//! Rendering itself is out of scope; the draw-order system only sorts, and
//! sprites reference textures by opaque asset id.

pub mod components;
pub mod events;
pub mod systems;

pub use components::{
    Animation, BoxCollider, KeyboardControlled, RigidBody, Sprite, Transform, Vec2,
};
pub use events::{CollisionEvent, Key, KeyPressedEvent};
pub use systems::{
    AnimationSystem, CollisionSystem, DamageSystem, DrawOrderSystem, KeyboardControlSystem,
    MovementSystem,
};
