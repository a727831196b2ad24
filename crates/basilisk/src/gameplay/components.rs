//! # Gameplay Components
//!
//! Pure data payloads. Pools default-fill fresh slots, so every component
//! is [`Default`]; a default-valued slot whose signature bit is clear is
//! simply absent.

/// 2D vector used for positions, scales, and velocities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2 {
    /// Creates a vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// The unit scale vector.
    pub const ONE: Self = Self::new(1.0, 1.0);
}

/// Where an entity sits in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World position.
    pub position: Vec2,
    /// Per-axis scale factor.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl Transform {
    /// Creates a transform at `position` with unit scale and no rotation.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

/// Linear velocity, in world units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    /// Current velocity.
    pub velocity: Vec2,
}

impl RigidBody {
    /// Creates a body with the given velocity.
    #[must_use]
    pub const fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

/// A drawable sprite. The texture is referenced by opaque asset id; the
/// core never interprets it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    /// Opaque texture id, resolved by the rendering collaborator.
    pub asset_id: String,
    /// Source frame width in pixels.
    pub width: u32,
    /// Source frame height in pixels.
    pub height: u32,
    /// X offset of the source rectangle, advanced by animation.
    pub src_x: u32,
    /// Y offset of the source rectangle.
    pub src_y: u32,
    /// Draw layer; higher layers draw later (on top).
    pub layer: i32,
}

impl Sprite {
    /// Creates a sprite showing the first frame of `asset_id`.
    #[must_use]
    pub fn new(asset_id: impl Into<String>, width: u32, height: u32, layer: i32) -> Self {
        Self {
            asset_id: asset_id.into(),
            width,
            height,
            src_x: 0,
            src_y: 0,
            layer,
        }
    }
}

/// Axis-aligned bounding box for collision tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxCollider {
    /// Box width before entity scale is applied.
    pub width: f32,
    /// Box height before entity scale is applied.
    pub height: f32,
    /// Offset of the box from the entity's position.
    pub offset: Vec2,
}

impl BoxCollider {
    /// Creates a collider anchored at the entity's position.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
        }
    }
}

/// Frame-flipping state for an animated sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    /// Total frames in the strip.
    pub num_frames: u32,
    /// Frame currently shown.
    pub current_frame: u32,
    /// Frames per second.
    pub frame_rate: u32,
    /// Whether to wrap around after the last frame.
    pub looping: bool,
    /// Seconds accumulated since the animation started.
    pub elapsed: f32,
}

impl Animation {
    /// Creates a looping animation starting at frame 0.
    #[must_use]
    pub const fn new(num_frames: u32, frame_rate: u32, looping: bool) -> Self {
        Self {
            num_frames,
            current_frame: 0,
            frame_rate,
            looping,
            elapsed: 0.0,
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(1, 1, true)
    }
}

/// Marks an entity as steered by keyboard input and sets its speed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyboardControlled {
    /// Movement speed in world units per second.
    pub speed: f32,
}
