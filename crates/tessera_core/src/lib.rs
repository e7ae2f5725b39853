//! # Tessera Core
//!
//! In-process Entity-Component-System store with a per-tick scheduler,
//! designed to be embedded by a host loop (game, simulation, or similar)
//! that calls [`Ecs::run_tick`] once per frame.
//!
//! ## Architecture Rules
//!
//! 1. **Capacity is fixed at construction** - limits come from
//!    [`WorldConfig`], and running out is a typed error, never a silent
//!    overwrite
//! 2. **Stale handles are detected** - slot reuse is guarded by generation
//!    counters; a freed handle fails lookup instead of aliasing
//! 3. **No hidden global state** - every store is an explicit instance;
//!    independent instances (and parallel tests) share nothing
//! 4. **One caller thread** - ticks are fully synchronous and systems run
//!    sequentially in registration order
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_core::{Ecs, WorldConfig};
//!
//! let mut ecs = Ecs::new(WorldConfig::default());
//! // register component types and systems, spawn entities...
//! ecs.run_tick(); // once per host frame
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod memory;

pub use config::WorldConfig;
pub use ecs::{
    ComponentPool, ComponentTypeToken, Ecs, EntityId, EntityIndex, EntityRecord, Scheduler,
    System, TypeMask, TypeRegistry, World,
};
pub use error::{EcsError, EcsResult};
pub use memory::{GenerationalArena, SlotHandle};
