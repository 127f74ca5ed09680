//! Gear/boost movement controller for piloted crafts.
//!
//! The controller never sets velocity directly. It computes a desired
//! velocity along the craft's nose and the movement system steps the real
//! velocity toward it by a bounded amount each tick.

use glam::{DQuat, DVec3};

use skirmish_core::specs::EngineSpec;

/// Handling values pushed from the fitted engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handling {
    pub max_gear: u32,
    pub speed_per_gear: f64,
    pub boost_multiplier: f64,
    pub accel: f64,
    pub brake_accel: f64,
    /// Degrees per second.
    pub pitch_speed: f64,
    pub roll_speed: f64,
    pub yaw_speed: f64,
}

impl Default for Handling {
    /// Stock airframe handling used when no engine is fitted.
    fn default() -> Self {
        Self {
            max_gear: 5,
            speed_per_gear: 12.0,
            boost_multiplier: 1.6,
            accel: 25.0,
            brake_accel: 40.0,
            pitch_speed: 70.0,
            roll_speed: 120.0,
            yaw_speed: 100.0,
        }
    }
}

impl Handling {
    pub fn from_engine(engine: Option<&EngineSpec>) -> Self {
        match engine {
            Some(e) => Self {
                max_gear: e.max_gear,
                speed_per_gear: e.speed_per_gear,
                boost_multiplier: e.boost_multiplier,
                accel: e.accel,
                brake_accel: e.brake_accel,
                pitch_speed: e.pitch_speed,
                roll_speed: e.roll_speed,
                yaw_speed: e.yaw_speed,
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MovementController {
    pub handling: Handling,
    gear: u32,
    boosting: bool,
    target_velocity: DVec3,
}

impl MovementController {
    pub fn new(handling: Handling) -> Self {
        Self {
            handling,
            ..Default::default()
        }
    }

    pub fn gear(&self) -> u32 {
        self.gear
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub fn target_velocity(&self) -> DVec3 {
        self.target_velocity
    }

    pub fn gear_up(&mut self) {
        self.gear = (self.gear + 1).min(self.handling.max_gear);
    }

    pub fn gear_down(&mut self) {
        self.gear = self.gear.saturating_sub(1);
    }

    pub fn set_boost(&mut self, boosting: bool) {
        self.boosting = boosting;
    }

    /// Replace the handling (equipment swap). The gear is re-clamped to the
    /// new gearbox.
    pub fn set_handling(&mut self, handling: Handling) {
        self.handling = handling;
        self.gear = self.gear.min(handling.max_gear);
    }

    /// Rotate in the craft's local frame. Axes are in `[-1, 1]`:
    /// +pitch raises the nose, +yaw turns right, +roll banks right.
    pub fn apply_rotation(
        &self,
        rotation: DQuat,
        pitch: f64,
        yaw: f64,
        roll: f64,
        dt: f64,
    ) -> DQuat {
        let h = &self.handling;
        let delta = DQuat::from_rotation_z(-(yaw * h.yaw_speed * dt).to_radians())
            * DQuat::from_rotation_x((pitch * h.pitch_speed * dt).to_radians())
            * DQuat::from_rotation_y((roll * h.roll_speed * dt).to_radians());
        (rotation * delta).normalize()
    }

    /// Cruise speed for the current gear and boost state, scaled by power.
    pub fn desired_speed(&self, power_scale: f64) -> f64 {
        let mut speed = self.gear as f64 * self.handling.speed_per_gear;
        if self.boosting {
            speed *= self.handling.boost_multiplier;
        }
        speed * power_scale.clamp(0.0, 1.0)
    }

    pub fn update_target(&mut self, forward: DVec3, power_scale: f64) {
        self.target_velocity = forward * self.desired_speed(power_scale);
    }

    /// Step `current` toward the target velocity. Slowing down along the
    /// current direction uses the brake rate.
    pub fn approach_velocity(&self, current: DVec3, dt: f64) -> DVec3 {
        let target = self.target_velocity;
        let braking =
            current.dot(target) > 0.0 && target.length_squared() < current.length_squared();
        let rate = if braking {
            self.handling.brake_accel
        } else {
            self.handling.accel
        };
        current + (target - current).clamp_length_max(rate * dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn controller() -> MovementController {
        MovementController::new(Handling::from_engine(Some(&EngineSpec::default())))
    }

    #[test]
    fn test_gear_limits() {
        let mut m = controller();
        m.gear_down();
        assert_eq!(m.gear(), 0);
        for _ in 0..10 {
            m.gear_up();
        }
        assert_eq!(m.gear(), 5);
    }

    #[test]
    fn test_desired_speed_with_boost_and_power() {
        let mut m = controller();
        m.gear_up();
        m.gear_up();
        assert_relative_eq!(m.desired_speed(1.0), 24.0);
        m.set_boost(true);
        assert_relative_eq!(m.desired_speed(1.0), 38.4, epsilon = 1e-9);
        assert_relative_eq!(m.desired_speed(0.6), 23.04, epsilon = 1e-9);
        // Scale is clamped into [0, 1].
        assert_relative_eq!(m.desired_speed(3.0), 38.4, epsilon = 1e-9);
    }

    #[test]
    fn test_accelerates_by_accel_step() {
        let mut m = controller();
        m.gear_up();
        m.update_target(DVec3::Y, 1.0);
        let v = m.approach_velocity(DVec3::ZERO, 0.1);
        assert_relative_eq!(v.y, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_brakes_faster_than_it_accelerates() {
        let mut m = controller();
        m.update_target(DVec3::Y, 1.0);
        // Gear 0 target is zero: dot is 0, so no braking rate.
        let v = m.approach_velocity(DVec3::Y * 30.0, 0.1);
        assert_relative_eq!(v.y, 27.5, epsilon = 1e-12);

        m.gear_up();
        m.update_target(DVec3::Y, 1.0);
        let v = m.approach_velocity(DVec3::Y * 30.0, 0.1);
        assert_relative_eq!(v.y, 26.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reaches_target_without_overshoot() {
        let mut m = controller();
        m.gear_up();
        m.update_target(DVec3::Y, 1.0);
        let v = m.approach_velocity(DVec3::Y * 11.0, 1.0);
        assert_relative_eq!(v.y, 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_sign_convention() {
        let m = controller();
        let dt = 1.0;

        let pitched = m.apply_rotation(DQuat::IDENTITY, 1.0, 0.0, 0.0, dt);
        assert!((pitched * DVec3::Y).z > 0.0);

        let yawed = m.apply_rotation(DQuat::IDENTITY, 0.0, 1.0, 0.0, dt);
        assert!((yawed * DVec3::Y).x > 0.0);

        let rolled = m.apply_rotation(DQuat::IDENTITY, 0.0, 0.0, 1.0, dt);
        assert!((rolled * DVec3::X).z < 0.0);
    }

    #[test]
    fn test_handling_swap_clamps_gear() {
        let mut m = controller();
        for _ in 0..5 {
            m.gear_up();
        }
        let small = EngineSpec {
            max_gear: 2,
            ..Default::default()
        };
        m.set_handling(Handling::from_engine(Some(&small)));
        assert_eq!(m.gear(), 2);
    }
}
