//! Events emitted by the simulation for presentation layers
//! (damage popups, HUD warnings, audio).

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::CraftId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A projectile left a muzzle.
    ShotFired {
        shooter: CraftId,
        position: DVec3,
        speed: f64,
    },
    /// A projectile struck something. `target` is `None` for geometry.
    ProjectileHit {
        shooter: CraftId,
        target: Option<CraftId>,
        damage: f64,
        point: DVec3,
    },
    /// A projectile ran out of lifetime without hitting.
    ProjectileExpired { shooter: CraftId },
    OverloadEntered { craft: CraftId },
    OverloadCleared { craft: CraftId },
    /// Hull depleted; the craft was removed.
    CraftDestroyed { craft: CraftId, by: Option<CraftId> },
    /// A practice target refilled its hull.
    CraftRespawned { craft: CraftId },
}
