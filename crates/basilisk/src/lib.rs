//! # BASILISK Host Crate
//!
//! Everything the core runtime needs a host for: the synchronous typed
//! event bus that decouples systems within a tick, the game loop that
//! drives the fixed per-tick sequence, and a roster of stock 2D gameplay
//! components and systems.
//!
//! ## The fixed tick sequence
//!
//! ```text
//! Frame N:
//! ┌────────────────────────────────────────────────────────────┐
//! │ 1. RESET EVENT BUS                                         │
//! │    └─ Subscriptions live exactly one tick                  │
//! │                                                            │
//! │ 2. FLUSH REGISTRY                                          │
//! │    ├─ Pending adds join matching systems                   │
//! │    └─ Pending kills leave every system, ids freed          │
//! │                                                            │
//! │ 3. RUN SYSTEMS (registration order)                        │
//! │    ├─ Systems resubscribe to the events they care about    │
//! │    ├─ Systems read/write components via the registry       │
//! │    └─ Emitted events run their handlers before returning   │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod events;
pub mod game_loop;
pub mod gameplay;

pub use events::EventBus;
pub use game_loop::{FrameContext, FrameStats, GameLoop, GameLoopConfig, HostError};
