//! Turret aiming: yaw about world up and clamped pitch, both rate-limited.

use glam::DVec3;
use skirmish_core::components::Turret;
use skirmish_core::config::TurretConfig;
use skirmish_core::types::*;

/// Step the turret toward `target`, seen from the turret's `pivot`.
///
/// Yaw holds when the target is straight above or below; nothing moves when
/// the target sits on the pivot.
pub fn aim(
    turret: &Turret,
    pivot: DVec3,
    target: DVec3,
    cfg: &TurretConfig,
    dt: f64,
) -> Turret {
    let to_target = target - pivot;
    if to_target.length_squared() < 1e-3 {
        return *turret;
    }

    let yaw = match yaw_of(to_target) {
        Some(desired) => {
            rotate_angle_towards(turret.yaw, desired, cfg.yaw_speed_deg.to_radians() * dt)
        }
        None => turret.yaw,
    };

    let dir = to_target.normalize();
    let desired_pitch = dir
        .z
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
        .clamp(cfg.min_pitch_deg, cfg.max_pitch_deg);
    let current = wrap_angle(turret.pitch).to_degrees();
    let pitch = move_towards(current, desired_pitch, cfg.pitch_speed_deg * dt).to_radians();

    Turret { yaw, pitch }
}

/// Unit direction the barrel points along.
pub fn muzzle_direction(turret: &Turret) -> DVec3 {
    let (sp, cp) = turret.pitch.sin_cos();
    forward_from_yaw(turret.yaw) * cp + UP * sp
}
