//! Collision layers and faction-derived hit masks.

use serde::{Deserialize, Serialize};

use crate::enums::Faction;

/// Bit set of collision layers.
///
/// A body lives on one layer; a query carries a mask of the layers it may
/// hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);

    /// Static level geometry.
    pub const ENVIRONMENT: Self = Self(1 << 0);

    /// Player-side craft hulls.
    pub const PLAYER: Self = Self(1 << 1);

    /// Enemy-side craft hulls, target dummies included.
    pub const ENEMY: Self = Self(1 << 2);

    pub const ALL: Self = Self(u32::MAX);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl Faction {
    /// Layer that hulls of this faction occupy.
    pub fn body_layer(self) -> LayerMask {
        match self {
            Faction::Player => LayerMask::PLAYER,
            Faction::Enemy => LayerMask::ENEMY,
        }
    }

    /// Layers a projectile fired by this faction may strike: the opposing
    /// faction and the environment.
    pub fn hit_mask(self) -> LayerMask {
        self.opponent().body_layer() | LayerMask::ENVIRONMENT
    }
}
