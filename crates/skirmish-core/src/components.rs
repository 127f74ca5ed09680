//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in systems; stateful models (load, weapon cooldown,
//! projectile flight) live in `skirmish-sim`.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::commands::ControlInput;
use crate::enums::*;
use crate::specs::Loadout;
use crate::types::CraftId;

/// Identity and allegiance of a combat craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Craft {
    pub id: CraftId,
    pub faction: Faction,
}

/// Linear velocity in world space (m/s).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// Marks a craft as driven by external input.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerControl {
    /// Latest input snapshot. One-shot gear requests are cleared once consumed.
    pub input: ControlInput,
}

/// Enemy decision loop state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AiPilot {
    pub state: AiState,
    /// Seconds since the AI last pulled the trigger.
    pub fire_timer: f64,
    /// Circling direction chosen at spawn.
    pub clockwise: bool,
    /// Fixed target; `None` picks the nearest opposing craft each tick.
    pub target: Option<CraftId>,
}

/// Where projectiles leave the craft, in the craft's local frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Muzzle {
    pub offset: DVec3,
}

/// Aimable gun mount. Angles in radians; yaw about world up, pitch above
/// the horizon.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Turret {
    pub yaw: f64,
    pub pitch: f64,
}

/// Fire request for the current tick. Set by input or AI, consumed by the
/// weapons system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Trigger {
    pub pulled: bool,
}

/// Fitted equipment.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub loadout: Loadout,
}
