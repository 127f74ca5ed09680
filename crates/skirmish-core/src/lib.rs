//! Core types and definitions for the SKIRMISH combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! math types, equipment specs, tuning config, commands, events,
//! snapshots and constants. It has no dependency on the ECS.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod layers;
pub mod specs;
pub mod state;
pub mod types;
