//! Enemy AI for SKIRMISH.
//!
//! Implements the enemy pilot state machine (idle / approach / orbit with
//! gated auto-fire) and turret aiming.

pub mod pilot;
pub mod turret;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
