//! Enemy pilot finite state machine.
//!
//! Pure functions that classify the engagement, steer the craft and decide
//! when to pull the trigger. No ECS dependency; operates on plain data.
//!
//! The pilot flies kinematically: it moves its own position at a fixed speed
//! and turns its heading about world up at a capped rate.

use glam::DVec3;
use skirmish_core::config::AiConfig;
use skirmish_core::enums::AiState;
use skirmish_core::types::*;

/// Input to the pilot FSM for a single craft.
#[derive(Debug, Clone, Copy)]
pub struct PilotContext {
    pub state: AiState,
    pub position: DVec3,
    /// Heading in radians (see [`yaw_rotation`]).
    pub yaw: f64,
    /// Position of the current target, if any.
    pub target: Option<DVec3>,
    /// Seconds since the last trigger pull.
    pub fire_timer: f64,
    pub clockwise: bool,
}

/// Output from the pilot FSM.
#[derive(Debug, Clone, Copy)]
pub struct PilotUpdate {
    pub new_state: AiState,
    pub state_changed: bool,
    pub new_position: DVec3,
    pub new_yaw: f64,
    pub fire_timer: f64,
    /// Pull the trigger this tick.
    pub fire: bool,
    /// Unit direction the craft moved along; zero when holding still.
    pub move_dir: DVec3,
}

/// Pick the state for a target at `dist` (or no target at all).
pub fn classify(dist: Option<f64>, cfg: &AiConfig) -> AiState {
    match dist {
        None => AiState::Idle,
        Some(d) if d > cfg.detect_radius => AiState::Idle,
        Some(d) if d > cfg.max_orbit() => AiState::Approach,
        Some(_) => AiState::Orbit,
    }
}

/// Evaluate the FSM for one craft over a tick of length `dt`.
pub fn evaluate(ctx: &PilotContext, cfg: &AiConfig, dt: f64) -> PilotUpdate {
    let fire_timer = ctx.fire_timer + dt;
    let forward = forward_from_yaw(ctx.yaw);

    let to_target = ctx.target.map(|t| t - ctx.position);
    let dist = to_target.map(|v| v.length());
    let new_state = classify(dist, cfg);

    let desired = match (new_state, to_target, dist) {
        (AiState::Approach, Some(to_target), Some(dist)) => {
            if dist > 0.01 {
                to_target / dist
            } else {
                forward
            }
        }
        (AiState::Orbit, Some(to_target), Some(dist)) => {
            orbit_direction(to_target, dist, ctx.clockwise, cfg).unwrap_or(forward)
        }
        _ => {
            // Idle: hold still, or creep ahead without ever firing.
            let (new_position, move_dir) = if cfg.idle_forward_move {
                (ctx.position + forward * cfg.idle_speed * dt, forward)
            } else {
                (ctx.position, DVec3::ZERO)
            };
            return PilotUpdate {
                new_state,
                state_changed: new_state != ctx.state,
                new_position,
                new_yaw: ctx.yaw,
                fire_timer,
                fire: false,
                move_dir,
            };
        }
    };

    let (new_position, new_yaw, move_dir) = if desired.length_squared() > DEGENERATE_SQ {
        let dir = desired.normalize();
        let max_step = cfg.turn_speed_deg.to_radians() * dt;
        let new_yaw = match yaw_of(dir) {
            Some(target_yaw) => rotate_angle_towards(ctx.yaw, target_yaw, max_step),
            None => ctx.yaw,
        };
        (ctx.position + dir * cfg.move_speed * dt, new_yaw, dir)
    } else {
        (ctx.position, ctx.yaw, DVec3::ZERO)
    };

    let (fire, fire_timer) = match (to_target, dist) {
        (Some(to_target), Some(dist)) => {
            let heading = forward_from_yaw(new_yaw);
            if should_fire(new_state, heading, to_target, dist, fire_timer, cfg) {
                (true, 0.0)
            } else {
                (false, fire_timer)
            }
        }
        _ => (false, fire_timer),
    };

    PilotUpdate {
        new_state,
        state_changed: new_state != ctx.state,
        new_position,
        new_yaw,
        fire_timer,
        fire,
        move_dir,
    }
}

/// Circling direction around the target: the horizontal tangent plus an
/// inward/outward nudge when outside the orbit band.
///
/// Returns `None` when the target is (nearly) straight above or below.
pub fn orbit_direction(
    to_target: DVec3,
    dist: f64,
    clockwise: bool,
    cfg: &AiConfig,
) -> Option<DVec3> {
    let flat = flatten(to_target);
    if flat.length_squared() < 1e-3 {
        return None;
    }
    let radial = flat.normalize();

    // Seen from above with z toward the viewer, up × radial turns clockwise.
    let tangent = if clockwise {
        UP.cross(radial)
    } else {
        radial.cross(UP)
    }
    .normalize();

    let radial_adjust = if dist > cfg.max_orbit() {
        radial * cfg.radial_adjust_factor
    } else if dist < cfg.min_orbit() {
        -radial * cfg.radial_adjust_factor
    } else {
        DVec3::ZERO
    };

    let mut dir = tangent + radial_adjust;
    if dir.length_squared() < DEGENERATE_SQ {
        dir = tangent;
    }
    Some(flatten(dir).normalize())
}

/// Auto-fire gate: state, range, heading cone and the AI's own interval.
pub fn should_fire(
    state: AiState,
    heading: DVec3,
    to_target: DVec3,
    dist: f64,
    fire_timer: f64,
    cfg: &AiConfig,
) -> bool {
    if state == AiState::Idle || dist > cfg.detect_radius {
        return false;
    }
    let dir_to_target = if to_target.length_squared() > DEGENERATE_SQ {
        to_target.normalize()
    } else {
        heading
    };
    if angle_between_deg(heading, dir_to_target) > cfg.max_fire_angle_deg {
        return false;
    }
    !(cfg.fire_interval_secs > 0.0 && fire_timer < cfg.fire_interval_secs)
}
