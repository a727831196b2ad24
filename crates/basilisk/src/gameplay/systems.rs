//! # Gameplay Systems
//!
//! One system per gameplay concern. Each declares its component
//! requirements at construction via [`SystemBase::require`] and is then
//! registered with the registry; the registry keeps the matched-entity
//! lists current at every flush.
//!
//! Per-tick entry points take whatever context the concern needs - the
//! runtime imposes no shape on them. The host drives each system through
//! [`Registry::with_system`] so the system and the registry are mutably
//! available at the same time.
//!
//! Systems that react to events resubscribe every tick; the bus is reset
//! at the top of each frame, so their handlers capture per-tick snapshots.

use basilisk_core::{ComponentTypes, EcsResult, Entity, Registry, System, SystemBase};

use crate::events::EventBus;

use super::components::{
    Animation, BoxCollider, KeyboardControlled, RigidBody, Sprite, Transform, Vec2,
};
use super::events::{CollisionEvent, Key, KeyPressedEvent};

/// Integrates entity positions by their rigid-body velocities.
pub struct MovementSystem {
    base: SystemBase,
}

impl MovementSystem {
    /// Creates the system, requiring `Transform` and `RigidBody`.
    #[must_use]
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut base = SystemBase::new();
        base.require::<Transform>(types);
        base.require::<RigidBody>(types);
        Self { base }
    }

    /// Advances every matched entity by its velocity.
    ///
    /// # Errors
    ///
    /// Propagates component lookups that fail; a member can lose a
    /// required component between flushes, since removal does not
    /// re-evaluate membership.
    pub fn update(&self, registry: &mut Registry, delta_time: f32) -> EcsResult<()> {
        for &entity in self.base.entities() {
            let velocity = registry.component::<RigidBody>(entity)?.velocity;
            let transform = registry.component_mut::<Transform>(entity)?;
            transform.position.x += velocity.x * delta_time;
            transform.position.y += velocity.y * delta_time;
        }
        Ok(())
    }
}

impl System for MovementSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }
}

/// Detects overlapping colliders and announces each pair once per tick.
pub struct CollisionSystem {
    base: SystemBase,
}

/// World-space extent of one collider, after scale and offset.
#[derive(Clone, Copy)]
struct Aabb {
    x_min: f32,
    y_min: f32,
    x_max: f32,
    y_max: f32,
}

impl Aabb {
    fn of(registry: &Registry, entity: Entity) -> EcsResult<Self> {
        let transform = registry.component::<Transform>(entity)?;
        let collider = registry.component::<BoxCollider>(entity)?;
        let x_min = transform.position.x + collider.offset.x;
        let y_min = transform.position.y + collider.offset.y;
        Ok(Self {
            x_min,
            y_min,
            x_max: x_min + collider.width * transform.scale.x,
            y_max: y_min + collider.height * transform.scale.y,
        })
    }

    fn overlaps(self, other: Self) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }
}

impl CollisionSystem {
    /// Creates the system, requiring `Transform` and `BoxCollider`.
    #[must_use]
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut base = SystemBase::new();
        base.require::<Transform>(types);
        base.require::<BoxCollider>(types);
        Self { base }
    }

    /// Runs the O(n²) pairwise AABB test and emits a [`CollisionEvent`]
    /// for every overlapping pair.
    ///
    /// Handlers run synchronously during each emit. They may mutate
    /// components or mark kills; boxes are re-read per pair, and kills
    /// only take effect at the next flush.
    ///
    /// # Errors
    ///
    /// Propagates component lookups that fail for stale members.
    pub fn update(&self, registry: &mut Registry, events: &mut EventBus) -> EcsResult<()> {
        let entities = self.base.entities();
        for (index, &a) in entities.iter().enumerate() {
            for &b in &entities[index + 1..] {
                let box_a = Aabb::of(registry, a)?;
                let box_b = Aabb::of(registry, b)?;
                if box_a.overlaps(box_b) {
                    tracing::debug!(a = a.id(), b = b.id(), "collision detected");
                    events.emit(registry, CollisionEvent { a, b });
                }
            }
        }
        Ok(())
    }
}

impl System for CollisionSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }
}

/// Kills both entities of every collision it hears about.
pub struct DamageSystem {
    base: SystemBase,
}

impl DamageSystem {
    /// Creates the system, requiring `BoxCollider`.
    #[must_use]
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut base = SystemBase::new();
        base.require::<BoxCollider>(types);
        Self { base }
    }

    /// Resubscribes the collision handler for this tick.
    ///
    /// The kills are deferred by design: the colliding entities stay in
    /// every system's list until the next flush.
    pub fn subscribe(&self, events: &mut EventBus) {
        events.subscribe::<CollisionEvent, _>(|registry, event| {
            tracing::debug!(a = event.a.id(), b = event.b.id(), "damage kills both");
            registry.kill_entity(event.a);
            registry.kill_entity(event.b);
        });
    }
}

impl System for DamageSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }
}

/// Steers controlled entities from key-press events.
pub struct KeyboardControlSystem {
    base: SystemBase,
}

impl KeyboardControlSystem {
    /// Creates the system, requiring `KeyboardControlled` and `RigidBody`.
    #[must_use]
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut base = SystemBase::new();
        base.require::<KeyboardControlled>(types);
        base.require::<RigidBody>(types);
        Self { base }
    }

    /// Resubscribes the key handler for this tick.
    ///
    /// The handler captures a snapshot of the currently-matched entities;
    /// the bus reset at the next frame discards it, so the snapshot can
    /// never outlive its flush.
    pub fn subscribe(&self, events: &mut EventBus) {
        let controlled = self.base.entities().to_vec();
        events.subscribe::<KeyPressedEvent, _>(move |registry, event| {
            for &entity in &controlled {
                let Ok(control) = registry.component::<KeyboardControlled>(entity) else {
                    continue;
                };
                let speed = control.speed;
                let direction = match event.key {
                    Key::Up => Vec2::new(0.0, -speed),
                    Key::Right => Vec2::new(speed, 0.0),
                    Key::Down => Vec2::new(0.0, speed),
                    Key::Left => Vec2::new(-speed, 0.0),
                };
                if let Ok(body) = registry.component_mut::<RigidBody>(entity) {
                    body.velocity = direction;
                }
            }
        });
    }
}

impl System for KeyboardControlSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }
}

/// Advances animated sprites to the frame their elapsed time selects.
pub struct AnimationSystem {
    base: SystemBase,
}

impl AnimationSystem {
    /// Creates the system, requiring `Sprite` and `Animation`.
    #[must_use]
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut base = SystemBase::new();
        base.require::<Sprite>(types);
        base.require::<Animation>(types);
        Self { base }
    }

    /// Accumulates elapsed time and flips each sprite's source rectangle
    /// to the current frame.
    ///
    /// # Errors
    ///
    /// Propagates component lookups that fail for stale members.
    pub fn update(&self, registry: &mut Registry, delta_time: f32) -> EcsResult<()> {
        for &entity in self.base.entities() {
            let animation = registry.component_mut::<Animation>(entity)?;
            animation.elapsed += delta_time;

            let frames = animation.num_frames.max(1);
            let raw = (animation.elapsed * animation.frame_rate as f32) as u32;
            let frame = if animation.looping {
                raw % frames
            } else {
                raw.min(frames - 1)
            };
            animation.current_frame = frame;

            let sprite = registry.component_mut::<Sprite>(entity)?;
            sprite.src_x = frame * sprite.width;
        }
        Ok(())
    }
}

impl System for AnimationSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }
}

/// Keeps its matched list sorted into draw order for the renderer.
///
/// The rendering collaborator iterates [`DrawOrderSystem::ordered`] after
/// the sort; drawing itself happens outside the core.
pub struct DrawOrderSystem {
    base: SystemBase,
}

impl DrawOrderSystem {
    /// Creates the system, requiring `Transform` and `Sprite`.
    #[must_use]
    pub fn new(types: &mut ComponentTypes) -> Self {
        let mut base = SystemBase::new();
        base.require::<Transform>(types);
        base.require::<Sprite>(types);
        Self { base }
    }

    /// Sorts the matched list by sprite layer, lowest first.
    ///
    /// The underlying sort is stable, so entities on the same layer keep
    /// their flush order.
    pub fn update(&mut self, registry: &Registry) {
        self.base.sort_entities_by(|a, b| {
            let layer_of = |entity: &Entity| {
                registry
                    .component::<Sprite>(*entity)
                    .map_or(i32::MIN, |sprite| sprite.layer)
            };
            layer_of(a).cmp(&layer_of(b))
        });
    }

    /// Returns the matched entities in draw order.
    #[must_use]
    pub fn ordered(&self) -> &[Entity] {
        self.base.entities()
    }
}

impl System for DrawOrderSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_moving(registry: &mut Registry, position: Vec2, velocity: Vec2) -> Entity {
        let entity = registry.create_entity();
        registry.add_component(entity, Transform::at(position));
        registry.add_component(entity, RigidBody::new(velocity));
        entity
    }

    #[test]
    fn test_movement_integrates_velocity() {
        let mut registry = Registry::new();
        let system = MovementSystem::new(registry.component_types_mut());
        registry.add_system(system);

        let entity = spawn_moving(&mut registry, Vec2::ZERO, Vec2::new(10.0, -4.0));
        registry.update();

        registry
            .with_system::<MovementSystem, _, _>(|system, registry| system.update(registry, 0.5))
            .expect("system registered")
            .expect("members carry both components");

        let transform = registry.component::<Transform>(entity).expect("present");
        assert_eq!(transform.position, Vec2::new(5.0, -2.0));
    }

    #[test]
    fn test_collision_emits_for_overlapping_pair_only() {
        let mut registry = Registry::new();
        let system = CollisionSystem::new(registry.component_types_mut());
        registry.add_system(system);
        let mut events = EventBus::new();

        let spawn_box = |registry: &mut Registry, x: f32| {
            let entity = registry.create_entity();
            registry.add_component(entity, Transform::at(Vec2::new(x, 0.0)));
            registry.add_component(entity, BoxCollider::new(10.0, 10.0));
            entity
        };
        let a = spawn_box(&mut registry, 0.0);
        let b = spawn_box(&mut registry, 5.0);
        let far = spawn_box(&mut registry, 100.0);
        registry.update();

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = std::rc::Rc::clone(&seen);
        events.subscribe::<CollisionEvent, _>(move |_, event| {
            log.borrow_mut().push((event.a, event.b));
        });

        registry
            .with_system::<CollisionSystem, _, _>(|system, registry| {
                system.update(registry, &mut events)
            })
            .expect("system registered")
            .expect("members carry both components");

        assert_eq!(*seen.borrow(), [(a, b)]);
        assert!(!seen.borrow().iter().any(|pair| pair.0 == far || pair.1 == far));
    }

    #[test]
    fn test_animation_advances_and_wraps() {
        let mut registry = Registry::new();
        let system = AnimationSystem::new(registry.component_types_mut());
        registry.add_system(system);

        let entity = registry.create_entity();
        registry.add_component(entity, Sprite::new("walker", 32, 32, 0));
        registry.add_component(entity, Animation::new(4, 10, true));
        registry.update();

        // 0.35s at 10 fps = frame 3.
        registry
            .with_system::<AnimationSystem, _, _>(|system, registry| system.update(registry, 0.35))
            .expect("system registered")
            .expect("members carry both components");
        assert_eq!(
            registry.component::<Animation>(entity).expect("present").current_frame,
            3
        );
        assert_eq!(registry.component::<Sprite>(entity).expect("present").src_x, 96);

        // Another 0.1s wraps back to frame 0.
        registry
            .with_system::<AnimationSystem, _, _>(|system, registry| system.update(registry, 0.1))
            .expect("system registered")
            .expect("members carry both components");
        assert_eq!(
            registry.component::<Animation>(entity).expect("present").current_frame,
            0
        );
    }

    #[test]
    fn test_draw_order_sorts_by_layer_stably() {
        let mut registry = Registry::new();
        let system = DrawOrderSystem::new(registry.component_types_mut());
        registry.add_system(system);

        let spawn_sprite = |registry: &mut Registry, layer: i32| {
            let entity = registry.create_entity();
            registry.add_component(entity, Transform::default());
            registry.add_component(entity, Sprite::new("tile", 16, 16, layer));
            entity
        };
        let back = spawn_sprite(&mut registry, 0);
        let front = spawn_sprite(&mut registry, 5);
        let mid_a = spawn_sprite(&mut registry, 2);
        let mid_b = spawn_sprite(&mut registry, 2);
        registry.update();

        registry
            .with_system::<DrawOrderSystem, _, _>(|system, registry| system.update(registry))
            .expect("system registered");

        let system = registry.system::<DrawOrderSystem>().expect("registered");
        // Same-layer entities keep their flush order.
        assert_eq!(system.ordered(), [back, mid_a, mid_b, front]);
    }

    #[test]
    fn test_keyboard_control_sets_velocity() {
        let mut registry = Registry::new();
        let system = KeyboardControlSystem::new(registry.component_types_mut());
        registry.add_system(system);
        let mut events = EventBus::new();

        let entity = registry.create_entity();
        registry.add_component(entity, RigidBody::default());
        registry.add_component(entity, KeyboardControlled { speed: 80.0 });
        registry.update();

        registry
            .system::<KeyboardControlSystem>()
            .expect("registered")
            .subscribe(&mut events);
        events.emit(&mut registry, KeyPressedEvent { key: Key::Left });

        let body = registry.component::<RigidBody>(entity).expect("present");
        assert_eq!(body.velocity, Vec2::new(-80.0, 0.0));
    }
}
