//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Side a craft fights for. Projectiles never hit their own faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub fn opponent(self) -> Faction {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Main weapon category. Only `Kinetic` has distinct behavior; the other
/// kinds fire the same travel-time projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Railgun slug with travel time.
    #[default]
    Kinetic,
    Beam,
    Guided,
}

/// Enemy decision loop state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// No target, or target beyond detection range.
    #[default]
    Idle,
    /// Closing in on the target along a straight line.
    Approach,
    /// Circling the target at the preferred distance.
    Orbit,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
}
