//! # ECS Registry Benchmark
//!
//! Measures the three hot paths of the runtime: entity churn through the
//! deferred buffers, component attachment with lazy pool growth, and a
//! full matched-entity tick.
//!
//! Run with: `cargo bench --package basilisk_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use basilisk_core::{ComponentTypes, Registry, System, SystemBase};

#[derive(Clone, Copy, Debug, Default)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Debug, Default)]
struct Velocity {
    x: f32,
    y: f32,
}

struct MotionSystem {
    base: SystemBase,
}

impl MotionSystem {
    fn new(types: &mut ComponentTypes) -> Self {
        let mut base = SystemBase::new();
        base.require::<Position>(types);
        base.require::<Velocity>(types);
        Self { base }
    }
}

impl System for MotionSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }
}

/// Builds a registry with `count` flushed entities carrying both components.
fn populated_registry(count: usize) -> Registry {
    let mut registry = Registry::new();
    let system = MotionSystem::new(registry.component_types_mut());
    registry.add_system(system);

    for i in 0..count {
        let entity = registry.create_entity();
        let f = i as f32;
        registry.add_component(entity, Position { x: f, y: f });
        registry.add_component(entity, Velocity { x: 0.1, y: 0.2 });
    }
    registry.update();
    registry
}

/// Benchmark: create entities and flush them into a system.
fn bench_create_and_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_and_flush");

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let registry = populated_registry(count);
                black_box(registry.entity_count())
            });
        });
    }

    group.finish();
}

/// Benchmark: one tick over every matched entity.
fn bench_motion_tick(c: &mut Criterion) {
    let mut registry = populated_registry(100_000);

    c.bench_function("motion_tick_100K", |b| {
        b.iter(|| {
            registry
                .with_system::<MotionSystem, _, _>(|system, registry| {
                    for &entity in system.base().entities() {
                        let velocity = registry
                            .component::<Velocity>(entity)
                            .copied()
                            .unwrap_or_default();
                        if let Ok(position) = registry.component_mut::<Position>(entity) {
                            position.x += velocity.x * 0.016;
                            position.y += velocity.y * 0.016;
                        }
                    }
                })
                .expect("system registered");
            black_box(registry.entity_count())
        });
    });
}

/// Benchmark: kill-and-recreate churn through the free list.
fn bench_kill_recreate_cycle(c: &mut Criterion) {
    let mut registry = populated_registry(10_000);
    let mut entities: Vec<_> = registry
        .system::<MotionSystem>()
        .expect("system registered")
        .base()
        .entities()
        .to_vec();

    c.bench_function("kill_recreate_cycle_1K", |b| {
        b.iter(|| {
            for entity in entities.iter().take(1_000) {
                registry.kill_entity(*entity);
            }
            registry.update();
            for entity in entities.iter_mut().take(1_000) {
                let recycled = registry.create_entity();
                registry.add_component(recycled, Position::default());
                registry.add_component(recycled, Velocity::default());
                *entity = recycled;
            }
            registry.update();
            black_box(registry.entity_count())
        });
    });
}

criterion_group!(
    benches,
    bench_create_and_flush,
    bench_motion_tick,
    bench_kill_recreate_cycle,
);

criterion_main!(benches);
