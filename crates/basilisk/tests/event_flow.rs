//! Event round-trip coverage: collision detection feeding damage kills,
//! keyboard steering, and the per-tick subscription reset, all driven
//! through the host tick sequence.

use basilisk::gameplay::{
    BoxCollider, CollisionEvent, CollisionSystem, DamageSystem, Key, KeyPressedEvent,
    KeyboardControlSystem, KeyboardControlled, MovementSystem, RigidBody, Transform, Vec2,
};
use basilisk::{EventBus, GameLoop, GameLoopConfig, HostError};
use basilisk_core::{Entity, Registry, System};

fn spawn_collider(registry: &mut Registry, x: f32, size: f32) -> Entity {
    let entity = registry.create_entity();
    registry.add_component(entity, Transform::at(Vec2::new(x, 0.0)));
    registry.add_component(entity, BoxCollider::new(size, size));
    entity
}

#[test]
fn collision_reaches_damage_and_kills_both_at_the_next_flush() {
    let mut registry = Registry::new();
    let collision = CollisionSystem::new(registry.component_types_mut());
    let damage = DamageSystem::new(registry.component_types_mut());
    registry.add_system(collision);
    registry.add_system(damage);
    let mut events = EventBus::new();

    let a = spawn_collider(&mut registry, 0.0, 10.0);
    let b = spawn_collider(&mut registry, 5.0, 10.0);
    let bystander = spawn_collider(&mut registry, 100.0, 10.0);
    registry.update();

    registry
        .system::<DamageSystem>()
        .expect("registered")
        .subscribe(&mut events);
    registry
        .with_system::<CollisionSystem, _, _>(|system, registry| {
            system.update(registry, &mut events)
        })
        .expect("registered")
        .expect("members carry both components");

    // The kills are deferred: both entities are still matched right now.
    assert_eq!(
        registry
            .system::<CollisionSystem>()
            .expect("registered")
            .base()
            .entities()
            .len(),
        3
    );

    registry.update();
    assert_eq!(
        registry
            .system::<CollisionSystem>()
            .expect("registered")
            .base()
            .entities(),
        [bystander]
    );

    // Both freed ids recycle FIFO.
    assert_eq!(registry.create_entity().id(), a.id());
    assert_eq!(registry.create_entity().id(), b.id());
}

#[test]
fn key_press_steers_then_movement_applies_velocity() {
    let mut registry = Registry::new();
    let keyboard = KeyboardControlSystem::new(registry.component_types_mut());
    let movement = MovementSystem::new(registry.component_types_mut());
    registry.add_system(keyboard);
    registry.add_system(movement);
    let mut events = EventBus::new();

    let player = registry.create_entity();
    registry.add_component(player, Transform::at(Vec2::new(10.0, 10.0)));
    registry.add_component(player, RigidBody::default());
    registry.add_component(player, KeyboardControlled { speed: 50.0 });
    registry.update();

    registry
        .system::<KeyboardControlSystem>()
        .expect("registered")
        .subscribe(&mut events);
    events.emit(&mut registry, KeyPressedEvent { key: Key::Down });

    registry
        .with_system::<MovementSystem, _, _>(|system, registry| system.update(registry, 0.2))
        .expect("registered")
        .expect("members carry both components");

    let transform = registry.component::<Transform>(player).expect("present");
    assert_eq!(transform.position, Vec2::new(10.0, 20.0));
}

#[test]
fn subscriptions_do_not_survive_the_tick_boundary() -> Result<(), HostError> {
    let mut game = GameLoop::new(GameLoopConfig::default());
    let registry = game.registry_mut();
    let damage = DamageSystem::new(registry.component_types_mut());
    registry.add_system(damage);

    // Tick 0 subscribes; tick 1 does not. The reset at the top of tick 1
    // must have discarded the old handler.
    game.advance(|ctx| {
        ctx.registry
            .system::<DamageSystem>()?
            .subscribe(ctx.events);
        assert_eq!(ctx.events.subscriber_count::<CollisionEvent>(), 1);
        Ok(())
    })?;

    game.advance(|ctx| {
        assert_eq!(ctx.events.subscriber_count::<CollisionEvent>(), 0);
        Ok(())
    })?;
    Ok(())
}

#[test]
fn full_tick_collision_pipeline_through_the_game_loop() -> Result<(), HostError> {
    let mut game = GameLoop::new(GameLoopConfig::default());
    let registry = game.registry_mut();
    let collision = CollisionSystem::new(registry.component_types_mut());
    let damage = DamageSystem::new(registry.component_types_mut());
    registry.add_system(collision);
    registry.add_system(damage);

    let a = spawn_collider(registry, 0.0, 8.0);
    let b = spawn_collider(registry, 4.0, 8.0);

    // Tick 0: both activate, collide, and get marked for kill.
    game.advance(|ctx| {
        ctx.registry
            .system::<DamageSystem>()?
            .subscribe(ctx.events);
        ctx.registry
            .with_system::<CollisionSystem, _, _>(|system, registry| {
                system.update(registry, ctx.events)
            })??;
        Ok(())
    })?;

    // Tick 1: the flush at the top removes both before any logic runs.
    game.advance(|ctx| {
        let system = ctx.registry.system::<CollisionSystem>()?;
        assert!(system.base().entities().is_empty());
        assert!(!ctx.registry.has_component::<Transform>(a));
        assert!(!ctx.registry.has_component::<Transform>(b));
        Ok(())
    })?;
    Ok(())
}
