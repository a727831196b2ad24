//! # BASILISK Game Loop
//!
//! Owns the registry and the event bus and enforces the fixed per-tick
//! sequence: reset the bus, flush the registry, then hand control to the
//! host's frame logic, which resubscribes handlers and runs each system in
//! registration order.
//!
//! The loop never blocks and does no I/O; pacing against real time is the
//! embedding host's concern. Configuration is loaded once at startup from
//! TOML.

use std::time::Instant;

use serde::Deserialize;
use thiserror::Error;

use basilisk_core::{EcsError, Registry};

use crate::events::EventBus;

/// Errors from the host integration layer.
#[derive(Error, Debug)]
pub enum HostError {
    /// The TOML configuration failed to parse.
    #[error("invalid game loop configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// An ECS operation inside the frame failed.
    #[error(transparent)]
    Ecs(#[from] EcsError),
}

/// Configuration for the game loop.
///
/// Every field has a default, so a partial (or empty) TOML document is
/// valid.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameLoopConfig {
    /// Target ticks per second; fixes the simulation delta time.
    pub target_fps: u32,
    /// Emit per-frame timing logs at `trace` level.
    pub enable_timing_logs: bool,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            enable_timing_logs: false,
        }
    }
}

impl GameLoopConfig {
    /// Parses a configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// [`HostError::InvalidConfig`] if the document is not valid TOML or
    /// has fields of the wrong type.
    pub fn from_toml_str(document: &str) -> Result<Self, HostError> {
        Ok(toml::from_str(document)?)
    }
}

/// Timing statistics for one completed frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Time spent flushing the registry, in microseconds.
    pub flush_us: u64,
    /// Time spent in the host's frame logic, in microseconds.
    pub logic_us: u64,
    /// Total frame time, in microseconds.
    pub total_us: u64,
}

/// Everything the host's per-frame logic gets to work with.
///
/// Borrowed from the loop for exactly one frame.
pub struct FrameContext<'a> {
    /// The registry, already flushed for this frame.
    pub registry: &'a mut Registry,
    /// The event bus, already reset for this frame.
    pub events: &'a mut EventBus,
    /// Fixed delta time for this frame, in seconds.
    pub delta_time: f32,
    /// Current frame number.
    pub frame: u64,
}

/// The per-tick orchestrator.
///
/// Owns the ECS registry and the event bus and guarantees the tick
/// sequence the core's ordering contracts assume: the bus is reset and the
/// registry flushed exactly once per frame, before any system runs.
pub struct GameLoop {
    /// The ECS registry.
    registry: Registry,
    /// The event bus.
    events: EventBus,
    /// Configuration, fixed at construction.
    config: GameLoopConfig,
    /// Frames completed so far.
    frame_count: u64,
    /// Stats of the most recently completed frame.
    last_stats: FrameStats,
}

impl GameLoop {
    /// Creates a loop with an empty registry and bus.
    #[must_use]
    pub fn new(config: GameLoopConfig) -> Self {
        Self {
            registry: Registry::new(),
            events: EventBus::new(),
            config,
            frame_count: 0,
            last_stats: FrameStats::default(),
        }
    }

    /// Returns the registry for setup between frames (spawning the initial
    /// scene, registering systems).
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Returns the registry read-only.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the number of completed frames.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the stats of the most recently completed frame.
    #[must_use]
    pub const fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Returns the fixed simulation delta time, in seconds.
    #[must_use]
    pub fn fixed_delta_time(&self) -> f32 {
        1.0 / self.config.target_fps.max(1) as f32
    }

    /// Advances the simulation by one frame.
    ///
    /// Resets the event bus, flushes the registry, then runs `frame` with
    /// a [`FrameContext`]. The frame logic is expected to resubscribe
    /// event handlers and run each system in registration order; the loop
    /// itself imposes no shape on system entry points.
    ///
    /// # Errors
    ///
    /// Whatever the frame logic returns; the loop adds no failure modes of
    /// its own.
    pub fn advance<F>(&mut self, frame: F) -> Result<FrameStats, HostError>
    where
        F: FnOnce(FrameContext<'_>) -> Result<(), HostError>,
    {
        let frame_start = Instant::now();
        let delta_time = self.fixed_delta_time();

        // Subscriptions live exactly one tick.
        self.events.reset();

        // Drain the deferred buffers: adds fully, then kills.
        self.registry.update();
        let flush_us = instant_us(frame_start);

        let logic_start = Instant::now();
        frame(FrameContext {
            registry: &mut self.registry,
            events: &mut self.events,
            delta_time,
            frame: self.frame_count,
        })?;
        let logic_us = instant_us(logic_start);

        let stats = FrameStats {
            frame: self.frame_count,
            flush_us,
            logic_us,
            total_us: instant_us(frame_start),
        };
        self.frame_count += 1;
        self.last_stats = stats;

        if self.config.enable_timing_logs {
            tracing::trace!(
                frame = stats.frame,
                flush_us = stats.flush_us,
                logic_us = stats.logic_us,
                total_us = stats.total_us,
                "frame completed"
            );
        }

        Ok(stats)
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(GameLoopConfig::default())
    }
}

/// Microseconds elapsed since `start`, saturated into a u64.
fn instant_us(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}
