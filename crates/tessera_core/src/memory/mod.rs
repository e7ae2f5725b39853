//! # Memory Management
//!
//! Fixed-capacity slot storage with stale-handle detection.
//!
//! The arena is independent of the ECS and usable on its own; the component
//! pools in [`crate::ecs`] are built on top of it.

pub mod arena;

pub use arena::{GenerationalArena, SlotHandle};
