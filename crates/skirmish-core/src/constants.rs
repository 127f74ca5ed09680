//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind the `Default` impls in `config` and
//! `specs`; a loaded `SimConfig` may override any of them.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Load / overload ---

/// Maximum load when no engine provides a capacity.
pub const BASE_MAX_LOAD: f64 = 100.0;

/// Per-second natural decay of the transient engine channel.
pub const ENGINE_LOAD_COOL_RATE: f64 = 5.0;

/// Per-second natural decay of the weapon channel.
pub const WEAPON_LOAD_COOL_RATE: f64 = 4.0;

/// Per-second natural decay of the system channel.
pub const SYSTEM_LOAD_COOL_RATE: f64 = 3.0;

/// Decay multiplier applied while overloaded.
pub const OVERLOAD_COOL_MULTIPLIER: f64 = 1.5;

/// Output multiplier while overloaded (keeps 60% performance).
pub const OVERLOAD_POWER_SCALE: f64 = 0.6;

/// Duration of an overload episode (seconds).
pub const OVERLOAD_COOLDOWN_SECS: f64 = 5.0;

/// Load fraction at which telemetry flags a warning.
pub const LOAD_WARNING_PERCENT: f64 = 0.8;

// --- Weapon fire control ---

/// Distance ahead of the muzzle where projectiles appear (meters).
pub const MUZZLE_SPAWN_OFFSET: f64 = 0.25;

/// Projectile speed multiplier when firing while overloaded.
pub const OVERLOAD_PROJECTILE_SPEED_FACTOR: f64 = 0.7;

/// Fire rate used when the power-scaled rate collapses to zero.
pub const MIN_FIRE_RATE: f64 = 0.1;

// --- Projectiles ---

/// Seconds a projectile lives before expiring.
pub const PROJECTILE_LIFETIME_SECS: f64 = 5.0;

/// Sweep radius of a projectile (meters).
pub const PROJECTILE_RADIUS: f64 = 0.05;

/// How far behind the spawn point the first swept segment starts (meters).
pub const PROJECTILE_SKIN_BACK: f64 = 0.05;

/// Lower bound for the spawn-point overlap radius (meters).
pub const PROJECTILE_MIN_OVERLAP_RADIUS: f64 = 0.02;

// --- Enemy decision loop ---

pub const AI_DETECT_RADIUS: f64 = 1000.0;
pub const AI_ORBIT_DISTANCE: f64 = 600.0;
pub const AI_ORBIT_TOLERANCE: f64 = 100.0;
pub const AI_MOVE_SPEED: f64 = 200.0;
pub const AI_TURN_SPEED_DEG: f64 = 180.0;
pub const AI_IDLE_SPEED: f64 = 50.0;
pub const AI_RADIAL_ADJUST_FACTOR: f64 = 0.5;
/// Extra AI-side spacing between trigger pulls (seconds).
pub const AI_FIRE_INTERVAL_SECS: f64 = 0.5;
/// Widest heading-to-target angle at which the AI fires (degrees).
pub const AI_MAX_FIRE_ANGLE_DEG: f64 = 20.0;

// --- Turrets ---

pub const TURRET_YAW_SPEED_DEG: f64 = 120.0;
pub const TURRET_PITCH_SPEED_DEG: f64 = 90.0;
pub const TURRET_MIN_PITCH_DEG: f64 = -10.0;
pub const TURRET_MAX_PITCH_DEG: f64 = 60.0;

// --- Hull ---

pub const CRAFT_MAX_HP: f64 = 100.0;
pub const DUMMY_MAX_HP: f64 = 200.0;
/// Delay before a non-destructible hull refills (seconds).
pub const RESPAWN_DELAY_SECS: f64 = 2.0;
/// Hull collision radius of a standard craft (meters).
pub const CRAFT_HULL_RADIUS: f64 = 4.0;
