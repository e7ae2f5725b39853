//! # Tick Benchmark
//!
//! Per-tick costs of the query/dispatch loop:
//! - store creation and entity spawn + component attach
//! - the superset match over all live entities
//! - a full tick with a physics system
//!
//! Run with: `cargo bench --package tessera_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{Ecs, EntityId, System, TypeMask, World, WorldConfig};

/// The entity count for the tick benchmarks.
const ENTITY_COUNT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    x: f32,
    y: f32,
}

struct Physics {
    required: TypeMask,
}

impl System for Physics {
    fn required_mask(&self) -> &TypeMask {
        &self.required
    }

    fn update(&mut self, entities: &[EntityId], world: &mut World) {
        for &entity in entities {
            let vel = *world.get_component::<Velocity>(entity).unwrap();
            let pos = world.get_component_mut::<Position>(entity).unwrap();
            pos.x += vel.x;
            pos.y += vel.y;
        }
    }
}

fn populated_ecs(count: usize) -> Ecs {
    let mut ecs = Ecs::new(WorldConfig::new(64, count).unwrap());
    let pos = ecs.register_component::<Position>().unwrap();
    let vel = ecs.register_component::<Velocity>().unwrap();

    for i in 0..count {
        let f = i as f32;
        let entity = ecs.create_entity();
        ecs.add_component(entity, Position { x: f, y: f }).unwrap();
        // Half the entities move, half only occupy a position.
        if i % 2 == 0 {
            ecs.add_component(entity, Velocity { x: 0.1, y: 0.2 }).unwrap();
        }
    }

    let required = ecs.world().mask_of(&[pos, vel]);
    ecs.register_system(Physics { required });
    ecs
}

/// Benchmark: create an empty store.
fn bench_world_creation(c: &mut Criterion) {
    c.bench_function("world_creation", |b| {
        b.iter(|| black_box(World::new(WorldConfig::new(64, ENTITY_COUNT).unwrap())));
    });
}

/// Benchmark: spawn entities and attach two components each.
fn bench_spawn_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_entities");

    for count in [100, 1_000, ENTITY_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let ecs = populated_ecs(count);
                ecs.world().entity_count()
            });
        });
    }

    group.finish();
}

/// Benchmark: the superset match over all live entities.
fn bench_matching(c: &mut Criterion) {
    let ecs = populated_ecs(ENTITY_COUNT);
    let pos = ecs.world().token_of::<Position>().unwrap();
    let vel = ecs.world().token_of::<Velocity>().unwrap();
    let required = ecs.world().mask_of(&[pos, vel]);

    c.bench_function("matching_entities_10k", |b| {
        b.iter(|| black_box(ecs.matching_entities(&required)).len());
    });
}

/// Benchmark: one full tick of the physics system.
fn bench_run_tick(c: &mut Criterion) {
    let mut ecs = populated_ecs(ENTITY_COUNT);

    c.bench_function("run_tick_10k", |b| {
        b.iter(|| {
            ecs.run_tick();
            ecs.ticks()
        });
    });
}

criterion_group!(
    benches,
    bench_world_creation,
    bench_spawn_entities,
    bench_matching,
    bench_run_tick
);
criterion_main!(benches);
