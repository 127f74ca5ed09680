//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces `CombatSnapshot`s for the host.

pub mod collision;
pub mod damage;
pub mod engine;
pub mod load;
pub mod movement;
pub mod projectile;
pub mod systems;
pub mod weapon;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use skirmish_core as core;
