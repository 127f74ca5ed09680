//! Commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::specs::Loadout;
use crate::types::CraftId;

/// Abstract control signals for one craft.
///
/// `gear_up` / `gear_down` are one-shot requests; everything else is a held
/// state that persists until the next `SetInput`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInput {
    pub gear_up: bool,
    pub gear_down: bool,
    pub boost: bool,
    /// Rotation axes in `[-1, 1]`: +pitch raises the nose, +yaw turns
    /// right, +roll banks right.
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub fire: bool,
}

impl ControlInput {
    /// Rotation axes clamped to `[-1, 1]`.
    pub fn clamped_axes(&self) -> (f64, f64, f64) {
        (
            self.pitch.clamp(-1.0, 1.0),
            self.yaw.clamp(-1.0, 1.0),
            self.roll.clamp(-1.0, 1.0),
        )
    }
}

/// All host actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Replace the control input of a player craft.
    SetInput { craft: CraftId, input: ControlInput },
    /// Swap the equipment of a craft.
    Equip { craft: CraftId, loadout: Loadout },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
