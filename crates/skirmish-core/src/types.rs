//! Fundamental geometric and simulation types.
//!
//! World frame: x = East, y = North, z = Up. A craft's local frame has
//! forward = +Y, right = +X and up = +Z, so an identity rotation faces North.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Squared length below which a direction is treated as degenerate.
pub const DEGENERATE_SQ: f64 = 1e-4;

/// World up axis.
pub const UP: DVec3 = DVec3::Z;

/// Stable identity of a craft, independent of ECS entity handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CraftId(pub u32);

/// Position and orientation of a body in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// Transform facing along a horizontal heading (see [`yaw_rotation`]).
    pub fn from_yaw(position: DVec3, yaw: f64) -> Self {
        Self::new(position, yaw_rotation(yaw))
    }

    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    pub fn right(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    /// Map a point from local space into world space.
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.rotation * local
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of length `dt`.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Rotation about world up. Yaw 0 faces North, positive yaw turns left
/// (counter-clockwise seen from above).
pub fn yaw_rotation(yaw: f64) -> DQuat {
    DQuat::from_rotation_z(yaw)
}

/// Horizontal unit vector for a yaw angle.
pub fn forward_from_yaw(yaw: f64) -> DVec3 {
    DVec3::new(-yaw.sin(), yaw.cos(), 0.0)
}

/// Yaw of the horizontal projection of `dir`, or `None` when `dir` is
/// (nearly) vertical or zero.
pub fn yaw_of(dir: DVec3) -> Option<f64> {
    let flat = flatten(dir);
    if flat.length_squared() < DEGENERATE_SQ {
        return None;
    }
    Some((-flat.x).atan2(flat.y))
}

/// Project a vector onto the horizontal plane.
pub fn flatten(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.y, 0.0)
}

/// Wrap an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + std::f64::consts::PI).rem_euclid(std::f64::consts::TAU);
    wrapped - std::f64::consts::PI
}

/// Move `current` toward `target` by at most `max_step`, taking the short
/// way around the circle.
pub fn rotate_angle_towards(current: f64, target: f64, max_step: f64) -> f64 {
    let delta = wrap_angle(target - current);
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

/// Move a scalar toward a target by at most `max_step`.
pub fn move_towards(current: f64, target: f64, max_step: f64) -> f64 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

/// Angle in degrees between two vectors; 0 if either is degenerate.
pub fn angle_between_deg(a: DVec3, b: DVec3) -> f64 {
    if a.length_squared() < DEGENERATE_SQ || b.length_squared() < DEGENERATE_SQ {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}
