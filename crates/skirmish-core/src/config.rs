//! Tuning configuration for a simulation run.
//!
//! Every record has a `Default` carrying the stock tuning values and is
//! `#[serde(default)]`, so a JSON document only needs the fields it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::specs::WeaponSpec;

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be >= 0, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be > 0, got {value}")))
    }
}

/// Load/overload model tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Capacity used when the engine provides none.
    pub base_max_load: f64,
    pub engine_cool_rate: f64,
    pub weapon_cool_rate: f64,
    pub system_cool_rate: f64,
    /// Decay multiplier while overloaded.
    pub overload_cool_multiplier: f64,
    /// Output multiplier while overloaded, in `(0, 1]`.
    pub overload_power_scale: f64,
    /// Seconds an overload episode lasts.
    pub overload_cooldown_secs: f64,
    /// Load fraction flagged as a warning for telemetry.
    pub warning_percent: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            base_max_load: BASE_MAX_LOAD,
            engine_cool_rate: ENGINE_LOAD_COOL_RATE,
            weapon_cool_rate: WEAPON_LOAD_COOL_RATE,
            system_cool_rate: SYSTEM_LOAD_COOL_RATE,
            overload_cool_multiplier: OVERLOAD_COOL_MULTIPLIER,
            overload_power_scale: OVERLOAD_POWER_SCALE,
            overload_cooldown_secs: OVERLOAD_COOLDOWN_SECS,
            warning_percent: LOAD_WARNING_PERCENT,
        }
    }
}

impl LoadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("load.base_max_load", self.base_max_load)?;
        non_negative("load.engine_cool_rate", self.engine_cool_rate)?;
        non_negative("load.weapon_cool_rate", self.weapon_cool_rate)?;
        non_negative("load.system_cool_rate", self.system_cool_rate)?;
        non_negative("load.overload_cool_multiplier", self.overload_cool_multiplier)?;
        non_negative("load.overload_cooldown_secs", self.overload_cooldown_secs)?;
        if !(self.overload_power_scale > 0.0 && self.overload_power_scale <= 1.0) {
            return Err(invalid(
                "load.overload_power_scale",
                format!("must be in (0, 1], got {}", self.overload_power_scale),
            ));
        }
        if !(0.0..=1.0).contains(&self.warning_percent) {
            return Err(invalid(
                "load.warning_percent",
                format!("must be in [0, 1], got {}", self.warning_percent),
            ));
        }
        Ok(())
    }
}

/// Weapon fire controller tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponFireConfig {
    /// Stats used when no main weapon is equipped.
    pub fallback: WeaponSpec,
    /// Distance ahead of the muzzle where projectiles spawn.
    pub spawn_forward_offset: f64,
    /// Projectile speed multiplier while overloaded.
    pub overload_speed_factor: f64,
    /// Floor for the power-scaled fire rate.
    pub min_fire_rate: f64,
}

impl Default for WeaponFireConfig {
    fn default() -> Self {
        Self {
            fallback: WeaponSpec::default(),
            spawn_forward_offset: MUZZLE_SPAWN_OFFSET,
            overload_speed_factor: OVERLOAD_PROJECTILE_SPEED_FACTOR,
            min_fire_rate: MIN_FIRE_RATE,
        }
    }
}

impl WeaponFireConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("weapon.fallback.damage", self.fallback.damage)?;
        non_negative("weapon.fallback.fire_rate", self.fallback.fire_rate)?;
        non_negative("weapon.fallback.projectile_speed", self.fallback.projectile_speed)?;
        non_negative("weapon.spawn_forward_offset", self.spawn_forward_offset)?;
        non_negative("weapon.overload_speed_factor", self.overload_speed_factor)?;
        positive("weapon.min_fire_rate", self.min_fire_rate)
    }
}

/// Projectile flight tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub lifetime_secs: f64,
    /// Sweep radius; zero sweeps a thin ray.
    pub radius: f64,
    /// Distance behind the spawn point the first segment starts from.
    pub skin_back: f64,
    pub destroy_on_hit: bool,
    /// Lower bound for the spawn-point overlap radius.
    pub min_overlap_radius: f64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            lifetime_secs: PROJECTILE_LIFETIME_SECS,
            radius: PROJECTILE_RADIUS,
            skin_back: PROJECTILE_SKIN_BACK,
            destroy_on_hit: true,
            min_overlap_radius: PROJECTILE_MIN_OVERLAP_RADIUS,
        }
    }
}

impl ProjectileConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("projectile.lifetime_secs", self.lifetime_secs)?;
        non_negative("projectile.radius", self.radius)?;
        non_negative("projectile.skin_back", self.skin_back)?;
        non_negative("projectile.min_overlap_radius", self.min_overlap_radius)
    }
}

/// Enemy decision loop tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Targets beyond this distance are ignored.
    pub detect_radius: f64,
    /// Preferred circling radius around the target.
    pub orbit_distance: f64,
    /// Half-width of the accepted band around `orbit_distance`.
    pub orbit_tolerance: f64,
    pub move_speed: f64,
    /// Heading change limit in degrees per second.
    pub turn_speed_deg: f64,
    /// Creep forward while idle instead of holding still.
    pub idle_forward_move: bool,
    pub idle_speed: f64,
    /// Default circling direction seen from above.
    pub orbit_clockwise: bool,
    /// Weight of the inward/outward correction outside the band.
    pub radial_adjust_factor: f64,
    /// Minimum seconds between AI trigger pulls; 0 disables the limit.
    pub fire_interval_secs: f64,
    /// Widest heading-to-target angle at which the AI fires (degrees).
    pub max_fire_angle_deg: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            detect_radius: AI_DETECT_RADIUS,
            orbit_distance: AI_ORBIT_DISTANCE,
            orbit_tolerance: AI_ORBIT_TOLERANCE,
            move_speed: AI_MOVE_SPEED,
            turn_speed_deg: AI_TURN_SPEED_DEG,
            idle_forward_move: false,
            idle_speed: AI_IDLE_SPEED,
            orbit_clockwise: true,
            radial_adjust_factor: AI_RADIAL_ADJUST_FACTOR,
            fire_interval_secs: AI_FIRE_INTERVAL_SECS,
            max_fire_angle_deg: AI_MAX_FIRE_ANGLE_DEG,
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("ai.detect_radius", self.detect_radius)?;
        non_negative("ai.orbit_distance", self.orbit_distance)?;
        non_negative("ai.orbit_tolerance", self.orbit_tolerance)?;
        non_negative("ai.move_speed", self.move_speed)?;
        non_negative("ai.turn_speed_deg", self.turn_speed_deg)?;
        non_negative("ai.idle_speed", self.idle_speed)?;
        non_negative("ai.radial_adjust_factor", self.radial_adjust_factor)?;
        non_negative("ai.fire_interval_secs", self.fire_interval_secs)?;
        if self.orbit_distance < self.orbit_tolerance {
            return Err(invalid(
                "ai.orbit_distance",
                format!(
                    "must be >= orbit_tolerance ({} < {})",
                    self.orbit_distance, self.orbit_tolerance
                ),
            ));
        }
        if !(0.0..=180.0).contains(&self.max_fire_angle_deg) {
            return Err(invalid(
                "ai.max_fire_angle_deg",
                format!("must be in [0, 180], got {}", self.max_fire_angle_deg),
            ));
        }
        Ok(())
    }

    /// Inner edge of the orbit band.
    pub fn min_orbit(&self) -> f64 {
        self.orbit_distance - self.orbit_tolerance
    }

    /// Outer edge of the orbit band.
    pub fn max_orbit(&self) -> f64 {
        self.orbit_distance + self.orbit_tolerance
    }
}

/// Turret aiming tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    pub yaw_speed_deg: f64,
    pub pitch_speed_deg: f64,
    pub min_pitch_deg: f64,
    pub max_pitch_deg: f64,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            yaw_speed_deg: TURRET_YAW_SPEED_DEG,
            pitch_speed_deg: TURRET_PITCH_SPEED_DEG,
            min_pitch_deg: TURRET_MIN_PITCH_DEG,
            max_pitch_deg: TURRET_MAX_PITCH_DEG,
        }
    }
}

impl TurretConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("turret.yaw_speed_deg", self.yaw_speed_deg)?;
        non_negative("turret.pitch_speed_deg", self.pitch_speed_deg)?;
        if self.min_pitch_deg > self.max_pitch_deg {
            return Err(invalid(
                "turret.min_pitch_deg",
                format!(
                    "must not exceed max_pitch_deg ({} > {})",
                    self.min_pitch_deg, self.max_pitch_deg
                ),
            ));
        }
        Ok(())
    }
}

/// Hull durability tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub craft_max_hp: f64,
    pub dummy_max_hp: f64,
    /// Seconds before a non-destructible hull refills.
    pub respawn_delay_secs: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            craft_max_hp: CRAFT_MAX_HP,
            dummy_max_hp: DUMMY_MAX_HP,
            respawn_delay_secs: RESPAWN_DELAY_SECS,
        }
    }
}

impl HealthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("health.craft_max_hp", self.craft_max_hp)?;
        positive("health.dummy_max_hp", self.dummy_max_hp)?;
        non_negative("health.respawn_delay_secs", self.respawn_delay_secs)
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Fixed ticks per second.
    pub tick_rate: u32,
    pub load: LoadConfig,
    pub weapon: WeaponFireConfig,
    pub projectile: ProjectileConfig,
    pub ai: AiConfig,
    pub turret: TurretConfig,
    pub health: HealthConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: TICK_RATE,
            load: LoadConfig::default(),
            weapon: WeaponFireConfig::default(),
            projectile: ProjectileConfig::default(),
            ai: AiConfig::default(),
            turret: TurretConfig::default(),
            health: HealthConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be > 0"));
        }
        self.load.validate()?;
        self.weapon.validate()?;
        self.projectile.validate()?;
        self.ai.validate()?;
        self.turret.validate()?;
        self.health.validate()
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }

    /// Convert a duration to a whole number of ticks (rounded up).
    pub fn secs_to_ticks(&self, secs: f64) -> u64 {
        (secs.max(0.0) * self.tick_rate as f64).ceil() as u64
    }
}
