#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::DVec3;
    use skirmish_core::config::AiConfig;
    use skirmish_core::constants::DT;
    use skirmish_core::enums::AiState;
    use skirmish_core::types::*;

    use crate::pilot::{classify, evaluate, orbit_direction, should_fire, PilotContext};

    /// Craft at the origin facing north; target due north at `range`.
    fn make_context(state: AiState, range: f64, fire_timer: f64) -> PilotContext {
        PilotContext {
            state,
            position: DVec3::ZERO,
            yaw: 0.0,
            target: Some(DVec3::new(0.0, range, 0.0)),
            fire_timer,
            clockwise: true,
        }
    }

    // --- Classification ---

    #[test]
    fn test_classify_band_edges() {
        let cfg = AiConfig::default();
        assert_eq!(classify(Some(750.0), &cfg), AiState::Approach);
        assert_eq!(classify(Some(650.0), &cfg), AiState::Orbit);
        assert_eq!(classify(Some(1200.0), &cfg), AiState::Idle);
        assert_eq!(classify(None, &cfg), AiState::Idle);
        // Boundaries: exactly max orbit is still Orbit; exactly detect is not Idle.
        assert_eq!(classify(Some(700.0), &cfg), AiState::Orbit);
        assert_eq!(classify(Some(1000.0), &cfg), AiState::Approach);
        // Inside the inner edge is still Orbit (pushes outward).
        assert_eq!(classify(Some(100.0), &cfg), AiState::Orbit);
    }

    #[test]
    fn test_evaluate_reports_state_change() {
        let cfg = AiConfig::default();
        let update = evaluate(&make_context(AiState::Idle, 750.0, 0.0), &cfg, DT);
        assert_eq!(update.new_state, AiState::Approach);
        assert!(update.state_changed);

        let again = evaluate(&make_context(AiState::Approach, 750.0, 0.0), &cfg, DT);
        assert!(!again.state_changed);
    }

    // --- Movement ---

    #[test]
    fn test_approach_moves_straight_at_target() {
        let cfg = AiConfig::default();
        let mut ctx = make_context(AiState::Idle, 750.0, 0.0);
        ctx.target = Some(DVec3::new(0.0, 750.0, 100.0));
        let update = evaluate(&ctx, &cfg, DT);

        let expected_dir = DVec3::new(0.0, 750.0, 100.0).normalize();
        let moved = update.new_position - ctx.position;
        assert_relative_eq!(moved.length(), cfg.move_speed * DT, epsilon = 1e-9);
        assert!((moved.normalize() - expected_dir).length() < 1e-9);
        // Target dead ahead in plan view: heading unchanged.
        assert_relative_eq!(update.new_yaw, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_idle_without_forward_move_holds_still() {
        let cfg = AiConfig::default();
        let ctx = make_context(AiState::Orbit, 1200.0, 0.0);
        let update = evaluate(&ctx, &cfg, DT);
        assert_eq!(update.new_state, AiState::Idle);
        assert_eq!(update.new_position, ctx.position);
        assert!(!update.fire);
        assert_relative_eq!(update.fire_timer, DT);
    }

    #[test]
    fn test_idle_forward_creeps_at_idle_speed() {
        let cfg = AiConfig {
            idle_forward_move: true,
            ..Default::default()
        };
        let mut ctx = make_context(AiState::Idle, 0.0, 0.0);
        ctx.target = None;
        let update = evaluate(&ctx, &cfg, 1.0);
        assert_relative_eq!(update.new_position.y, cfg.idle_speed, epsilon = 1e-9);
        assert!(!update.fire);
    }

    #[test]
    fn test_turn_rate_capped() {
        let cfg = AiConfig::default();
        let mut ctx = make_context(AiState::Approach, 0.0, 0.0);
        // Target due east at approach range: 90° right of heading.
        ctx.target = Some(DVec3::new(900.0, 0.0, 0.0));
        let update = evaluate(&ctx, &cfg, DT);
        let turned = wrap_angle(update.new_yaw - ctx.yaw).abs().to_degrees();
        assert_relative_eq!(turned, cfg.turn_speed_deg * DT, epsilon = 1e-9);
        // Turning right means negative yaw.
        assert!(update.new_yaw < 0.0);
    }

    #[test]
    fn test_orbit_tangent_clockwise_from_above() {
        let cfg = AiConfig::default();
        // Craft sits south of the target; clockwise seen from above is west.
        let dir = orbit_direction(DVec3::new(0.0, 600.0, 0.0), 600.0, true, &cfg).unwrap();
        assert_relative_eq!(dir.x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(dir.z, 0.0);

        let ccw = orbit_direction(DVec3::new(0.0, 600.0, 0.0), 600.0, false, &cfg).unwrap();
        assert_relative_eq!(ccw.x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_orbit_radial_correction() {
        let cfg = AiConfig::default();
        let to_target = DVec3::new(0.0, 450.0, 0.0);
        // Too close (< 500): drift away from the target.
        let inside = orbit_direction(to_target, 450.0, true, &cfg).unwrap();
        assert!(inside.y < 0.0);
        assert_relative_eq!(inside.length(), 1.0, epsilon = 1e-9);

        // Too far (> 700, only reachable via direct call): drift inward.
        let outside = orbit_direction(to_target, 750.0, true, &cfg).unwrap();
        assert!(outside.y > 0.0);
    }

    #[test]
    fn test_orbit_ignores_target_altitude() {
        let cfg = AiConfig::default();
        let to_target = DVec3::new(300.0, 300.0, 400.0);
        let dir = orbit_direction(to_target, 600.0, true, &cfg).unwrap();
        assert_relative_eq!(dir.z, 0.0);
    }

    #[test]
    fn test_target_overhead_holds_heading() {
        let cfg = AiConfig::default();
        let mut ctx = make_context(AiState::Orbit, 0.0, 0.0);
        ctx.yaw = 0.4;
        ctx.target = Some(DVec3::new(0.0, 0.0, 600.0));
        assert!(orbit_direction(DVec3::new(0.0, 0.0, 600.0), 600.0, true, &cfg).is_none());

        let update = evaluate(&ctx, &cfg, DT);
        assert_eq!(update.new_state, AiState::Orbit);
        assert_relative_eq!(update.new_yaw, 0.4, epsilon = 1e-12);
        // Keeps flying along the current heading.
        let expected = forward_from_yaw(0.4) * cfg.move_speed * DT;
        assert!((update.new_position - expected).length() < 1e-9);
    }

    // --- Firing ---

    #[test]
    fn test_aligned_heading_fires_after_interval() {
        let cfg = AiConfig::default();
        let update = evaluate(&make_context(AiState::Orbit, 650.0, 1.0), &cfg, DT);
        // Orbit turns at most 3° this tick, so the target stays in the cone.
        assert!(update.fire);
        assert_eq!(update.fire_timer, 0.0);
    }

    #[test]
    fn test_interval_blocks_rapid_fire() {
        let cfg = AiConfig::default();
        let update = evaluate(&make_context(AiState::Approach, 750.0, 0.1), &cfg, DT);
        assert!(!update.fire);
        assert_relative_eq!(update.fire_timer, 0.1 + DT);
    }

    #[test]
    fn test_fire_angle_gate() {
        let cfg = AiConfig::default();
        let heading = DVec3::Y;
        let dist = 650.0;

        let aligned = DVec3::Y * dist;
        assert!(should_fire(AiState::Orbit, heading, aligned, dist, 1.0, &cfg));

        let off = (cfg.max_fire_angle_deg + 1.0).to_radians();
        let outside = DVec3::new(-off.sin(), off.cos(), 0.0) * dist;
        assert!(!should_fire(AiState::Orbit, heading, outside, dist, 1.0, &cfg));

        let inside_angle = (cfg.max_fire_angle_deg - 1.0).to_radians();
        let inside = DVec3::new(inside_angle.sin(), inside_angle.cos(), 0.0) * dist;
        assert!(should_fire(AiState::Approach, heading, inside, dist, 1.0, &cfg));
    }

    #[test]
    fn test_never_fires_idle_or_beyond_detect() {
        let cfg = AiConfig::default();
        assert!(!should_fire(AiState::Idle, DVec3::Y, DVec3::Y * 500.0, 500.0, 9.0, &cfg));
        assert!(!should_fire(AiState::Approach, DVec3::Y, DVec3::Y * 1500.0, 1500.0, 9.0, &cfg));
    }

    #[test]
    fn test_zero_interval_fires_every_tick() {
        let cfg = AiConfig {
            fire_interval_secs: 0.0,
            ..Default::default()
        };
        let mut ctx = make_context(AiState::Approach, 900.0, 0.0);
        let mut shots = 0;
        for _ in 0..5 {
            let update = evaluate(&ctx, &cfg, DT);
            if update.fire {
                shots += 1;
            }
            ctx.position = update.new_position;
            ctx.yaw = update.new_yaw;
            ctx.fire_timer = update.fire_timer;
            ctx.state = update.new_state;
        }
        assert_eq!(shots, 5);
    }

    #[test]
    fn test_pursuit_converges_on_orbit_band() {
        let cfg = AiConfig::default();
        let target = DVec3::ZERO;
        let mut ctx = PilotContext {
            state: AiState::Idle,
            position: DVec3::new(900.0, 0.0, 0.0),
            yaw: 0.0,
            target: Some(target),
            fire_timer: 0.0,
            clockwise: false,
        };
        let mut reached_orbit = false;
        for _ in 0..(10 * 60) {
            let update = evaluate(&ctx, &cfg, DT);
            ctx.position = update.new_position;
            ctx.yaw = update.new_yaw;
            ctx.fire_timer = update.fire_timer;
            ctx.state = update.new_state;
            if ctx.state == AiState::Orbit {
                reached_orbit = true;
            }
        }
        assert!(reached_orbit);
        let dist = ctx.position.distance(target);
        assert!(
            dist > cfg.min_orbit() - 50.0 && dist < cfg.max_orbit() + 50.0,
            "dist = {dist}"
        );
    }
}
