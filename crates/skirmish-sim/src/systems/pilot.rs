//! Enemy pilot system: runs the decision loop for every AI craft.
//!
//! Calls the FSM from skirmish-ai, then writes the new pose, trigger and
//! turret aim back onto the entity. AI crafts fly kinematically; their
//! `Velocity` is derived from the distance moved this tick. Attached bodies
//! are snapped to the moved hulls before returning.

use glam::DVec3;
use hecs::{Entity, World};
use log::debug;

use skirmish_core::components::{AiPilot, Craft, Muzzle, Trigger, Turret, Velocity};
use skirmish_core::config::SimConfig;
use skirmish_core::enums::Faction;
use skirmish_core::types::{yaw_of, CraftId, Transform};

use skirmish_ai::pilot::{evaluate, PilotContext, PilotUpdate};
use skirmish_ai::turret;

pub fn run(world: &mut World, config: &SimConfig, dt: f64) {
    let crafts: Vec<(CraftId, Faction, DVec3)> = world
        .query::<(&Craft, &Transform)>()
        .iter()
        .map(|(_, (craft, transform))| (craft.id, craft.faction, transform.position))
        .collect();

    // Collect updates in a buffer to avoid borrow issues with hecs
    let mut updates: Vec<(Entity, PilotUpdate, Option<DVec3>)> = Vec::new();

    {
        let mut query = world.query::<(&Craft, &Transform, &AiPilot)>();
        for (entity, (craft, transform, pilot)) in query.iter() {
            let target = match pilot.target {
                Some(id) => crafts
                    .iter()
                    .find(|(other, _, _)| *other == id)
                    .map(|(_, _, pos)| *pos),
                None => nearest_opponent(&crafts, craft, transform.position),
            };

            let ctx = PilotContext {
                state: pilot.state,
                position: transform.position,
                yaw: yaw_of(transform.forward()).unwrap_or(0.0),
                target,
                fire_timer: pilot.fire_timer,
                clockwise: pilot.clockwise,
            };
            let update = evaluate(&ctx, &config.ai, dt);
            if update.state_changed {
                debug!(
                    "craft {} {:?} -> {:?}",
                    craft.id.0, pilot.state, update.new_state
                );
            }
            updates.push((entity, update, target));
        }
    }

    // Apply updates
    for (entity, update, target) in updates {
        let previous = match world.get::<&Transform>(entity) {
            Ok(t) => t.position,
            Err(_) => continue,
        };
        if let Ok(mut pilot) = world.get::<&mut AiPilot>(entity) {
            pilot.state = update.new_state;
            pilot.fire_timer = update.fire_timer;
        }
        if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
            *transform = Transform::from_yaw(update.new_position, update.new_yaw);
        }
        if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
            velocity.0 = if dt > 0.0 {
                (update.new_position - previous) / dt
            } else {
                DVec3::ZERO
            };
        }
        if let Ok(mut trigger) = world.get::<&mut Trigger>(entity) {
            trigger.pulled = update.fire;
        }

        let Some(target) = target else {
            continue;
        };
        let pivot = match world.get::<&Muzzle>(entity) {
            Ok(muzzle) => Transform::from_yaw(update.new_position, update.new_yaw)
                .transform_point(muzzle.offset),
            Err(_) => update.new_position,
        };
        if let Ok(mut mount) = world.get::<&mut Turret>(entity) {
            let aimed = turret::aim(&mount, pivot, target, &config.turret, dt);
            *mount = aimed;
        }
    }

    // Housings must sit on their hulls before projectiles sweep this tick.
    super::movement::sync_children(world);
}

/// Position of the closest craft on the opposing side.
fn nearest_opponent(
    crafts: &[(CraftId, Faction, DVec3)],
    craft: &Craft,
    position: DVec3,
) -> Option<DVec3> {
    let enemy = craft.faction.opponent();
    crafts
        .iter()
        .filter(|(id, faction, _)| *faction == enemy && *id != craft.id)
        .map(|(_, _, pos)| *pos)
        .min_by(|a, b| {
            a.distance_squared(position)
                .total_cmp(&b.distance_squared(position))
        })
}
