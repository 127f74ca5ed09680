//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only work). They do not own state; all state lives in components
//! and in the engine.

pub mod cleanup;
pub mod controls;
pub mod health;
pub mod load;
pub mod movement;
pub mod pilot;
pub mod power;
pub mod projectiles;
pub mod snapshot;
pub mod weapons;
