//! # Tick Pipeline Verification
//!
//! End-to-end checks of the store + scheduler working together:
//!
//! 1. **Physics then collect**: a mover and a collector system over one tick
//! 2. **Superset matching**: entities with extra components still qualify
//! 3. **Teardown across ticks**: removing components/entities mid-run
//!
//! Run with: cargo test --test tick_pipeline

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tessera_core::{Ecs, EntityId, System, TypeMask, World, WorldConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Velocity {
    x: i32,
    y: i32,
}

/// Adds each entity's velocity into its position.
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

/// Records every (entity, position) pair it sees.
struct Collector {
    required: TypeMask,
    seen: Rc<RefCell<Vec<(EntityId, Position)>>>,
}

impl System for Collector {
    fn required_mask(&self) -> &TypeMask {
        &self.required
    }

    fn update(&mut self, entities: &[EntityId], world: &mut World) {
        for &entity in entities {
            let pos = *world.get_component::<Position>(entity).unwrap();
            self.seen.borrow_mut().push((entity, pos));
        }
    }
}

fn pipeline() -> (Ecs, EntityId, EntityId, Rc<RefCell<Vec<(EntityId, Position)>>>) {
    let mut ecs = Ecs::new(WorldConfig::new(8, 64).unwrap());
    let pos = ecs.register_component::<Position>().unwrap();
    let vel = ecs.register_component::<Velocity>().unwrap();

    // A moves; B only sits at a position.
    let a = ecs.create_entity();
    ecs.add_component(a, Position { x: 0, y: 0 }).unwrap();
    ecs.add_component(a, Velocity { x: 1, y: 1 }).unwrap();

    let b = ecs.create_entity();
    ecs.add_component(b, Position { x: 5, y: 5 }).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let physics_mask = ecs.world().mask_of(&[pos, vel]);
    let collector_mask = ecs.world().mask_of(&[pos]);

    ecs.register_system(Physics {
        required: physics_mask,
    });
    ecs.register_system(Collector {
        required: collector_mask,
        seen: Rc::clone(&seen),
    });

    (ecs, a, b, seen)
}

#[test]
fn verify_physics_then_collect_after_one_tick() {
    let (mut ecs, a, b, seen) = pipeline();

    ecs.run_tick();

    // The mover advanced by its velocity; the sitter did not move.
    assert_eq!(
        ecs.get_component::<Position>(a),
        Ok(&Position { x: 1, y: 1 })
    );
    assert_eq!(
        ecs.get_component::<Position>(b),
        Ok(&Position { x: 5, y: 5 })
    );

    // The collector saw both position owners, already post-physics; entity
    // storage is unordered, so compare as sets.
    let recorded: HashSet<(EntityId, Position)> = seen.borrow().iter().copied().collect();
    let expected: HashSet<(EntityId, Position)> = [
        (a, Position { x: 1, y: 1 }),
        (b, Position { x: 5, y: 5 }),
    ]
    .into_iter()
    .collect();
    assert_eq!(recorded, expected);
}

#[test]
fn verify_movement_accumulates_over_ticks() {
    let (mut ecs, a, b, _seen) = pipeline();

    for _ in 0..3 {
        ecs.run_tick();
    }

    assert_eq!(ecs.ticks(), 3);
    assert_eq!(
        ecs.get_component::<Position>(a),
        Ok(&Position { x: 3, y: 3 })
    );
    assert_eq!(
        ecs.get_component::<Position>(b),
        Ok(&Position { x: 5, y: 5 })
    );
}

#[test]
fn verify_removing_velocity_stops_the_mover() {
    let (mut ecs, a, _b, _seen) = pipeline();

    ecs.run_tick();
    ecs.remove_component::<Velocity>(a).unwrap();
    ecs.run_tick();

    // Position survives; only the physics match is gone.
    assert_eq!(
        ecs.get_component::<Position>(a),
        Ok(&Position { x: 1, y: 1 })
    );
}

#[test]
fn verify_entity_removal_mid_run() {
    let (mut ecs, a, b, seen) = pipeline();

    ecs.run_tick();
    ecs.remove_entity(a);
    seen.borrow_mut().clear();

    ecs.run_tick();

    // Only the survivor is visible to any system now.
    let recorded: Vec<(EntityId, Position)> = seen.borrow().clone();
    assert_eq!(recorded, vec![(b, Position { x: 5, y: 5 })]);

    // The freed slots are reusable by a newcomer.
    let c = ecs.create_entity();
    ecs.add_component(c, Position { x: 2, y: 2 }).unwrap();
    ecs.add_component(c, Velocity { x: -1, y: 0 }).unwrap();
    ecs.run_tick();
    assert_eq!(
        ecs.get_component::<Position>(c),
        Ok(&Position { x: 1, y: 2 })
    );
}
