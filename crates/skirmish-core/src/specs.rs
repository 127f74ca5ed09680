//! Equipment definitions: engine and weapon specs grouped into a loadout.
//!
//! Specs are read-only data owned by the equipment loadout. The simulation
//! never mutates them; swapping equipment replaces the whole record.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;

/// Engine module definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSpec {
    pub max_gear: u32,
    /// Top speed added per gear (m/s).
    pub speed_per_gear: f64,
    /// Speed multiplier while boosting.
    pub boost_multiplier: f64,
    /// Velocity change per second when speeding up (m/s²).
    pub accel: f64,
    /// Velocity change per second when slowing down (m/s²).
    pub brake_accel: f64,
    /// Turn rates in degrees per second.
    pub pitch_speed: f64,
    pub roll_speed: f64,
    pub yaw_speed: f64,
    /// Fixed load per gear while cruising (load units).
    pub cruise_energy_per_sec: f64,
    /// Additional load accumulated per second of boost.
    pub boost_energy_per_sec: f64,
    /// Load capacity this engine provides. Non-positive means "use default".
    pub energy_capacity: f64,
}

impl Default for EngineSpec {
    fn default() -> Self {
        Self {
            max_gear: 5,
            speed_per_gear: 12.0,
            boost_multiplier: 1.6,
            accel: 25.0,
            brake_accel: 40.0,
            pitch_speed: 40.0,
            roll_speed: 60.0,
            yaw_speed: 40.0,
            cruise_energy_per_sec: 2.0,
            boost_energy_per_sec: 6.0,
            energy_capacity: 100.0,
        }
    }
}

/// Main weapon definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponSpec {
    pub kind: WeaponKind,
    /// Damage per projectile.
    pub damage: f64,
    /// Shots per second at full power.
    pub fire_rate: f64,
    /// Muzzle velocity (m/s).
    pub projectile_speed: f64,
    /// Weapon load added per shot.
    pub energy_cost_per_shot: f64,
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            kind: WeaponKind::Kinetic,
            damage: 10.0,
            fire_rate: 6.0,
            projectile_speed: 200.0,
            energy_cost_per_shot: 5.0,
        }
    }
}

/// Equipment fitted to a craft. Either slot may be empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    pub engine: Option<EngineSpec>,
    pub main_weapon: Option<WeaponSpec>,
}

impl Loadout {
    /// Default engine and default kinetic main gun.
    pub fn standard() -> Self {
        Self {
            engine: Some(EngineSpec::default()),
            main_weapon: Some(WeaponSpec::default()),
        }
    }
}
