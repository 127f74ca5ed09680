//! Combat snapshot: the complete visible state handed to the host each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{CraftId, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Sorted by craft id.
    pub crafts: Vec<CraftView>,
    pub projectiles: Vec<ProjectileView>,
    /// Events raised during this tick.
    pub events: Vec<CombatEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftView {
    pub id: CraftId,
    pub faction: Faction,
    pub position: DVec3,
    /// Radians, 0 = North, counter-clockwise positive.
    pub heading: f64,
    pub velocity: DVec3,
    pub gear: u32,
    pub boosting: bool,
    pub hp: f64,
    pub max_hp: f64,
    pub load: LoadView,
    /// Shots per second after power scaling, as of the last shot.
    pub fire_rate: f64,
    /// Present for AI-controlled crafts.
    pub ai_state: Option<AiState>,
}

/// Load telemetry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoadView {
    /// `total / max`, clamped to `[0, 1]`.
    pub percent: f64,
    pub is_overload: bool,
    pub is_warning: bool,
    pub power_scale: f64,
    pub max_load: f64,
    pub engine_base: f64,
    pub engine: f64,
    pub weapon: f64,
    pub system: f64,
    pub overload_remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec3,
    pub direction: DVec3,
    pub owner: CraftId,
}
