//! # Systems
//!
//! A system is per-tick update logic over the entities owning a required set
//! of component types. Systems carry no entity state of their own; the store
//! is handed to them mutably on every update.

use crate::ecs::entity::EntityId;
use crate::ecs::mask::TypeMask;
use crate::ecs::world::World;

/// Update routine run once per tick over its matching entities.
///
/// Implementors build their required mask from the store's registered tokens
/// (see [`World::mask_of`](crate::ecs::world::World::mask_of)) when they are
/// constructed; the scheduler queries it fresh on every tick.
///
/// # Example
///
/// ```rust,ignore
/// struct Physics {
///     required: TypeMask,
/// }
///
/// impl System for Physics {
///     fn required_mask(&self) -> &TypeMask {
///         &self.required
///     }
///
///     fn update(&mut self, entities: &[EntityId], world: &mut World) {
///         for &entity in entities {
///             let vel = *world.get_component::<Velocity>(entity).unwrap();
///             let pos = world.get_component_mut::<Position>(entity).unwrap();
///             pos.x += vel.x;
///             pos.y += vel.y;
///         }
///     }
/// }
/// ```
pub trait System {
    /// The component types an entity must own (as a superset) to be included
    /// in this system's update.
    fn required_mask(&self) -> &TypeMask;

    /// Runs one step over `entities`, with full read/mutate access to the
    /// store.
    ///
    /// Every entity in `entities` owned the required components when the
    /// tick's query ran; a system that removes entities or components should
    /// re-check before touching them if it also mutated earlier entries.
    fn update(&mut self, entities: &[EntityId], world: &mut World);
}
