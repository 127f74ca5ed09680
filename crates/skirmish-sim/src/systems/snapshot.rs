//! Snapshot system: queries the ECS world and builds a `CombatSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skirmish_core::components::{AiPilot, Craft, Velocity};
use skirmish_core::enums::GamePhase;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::*;
use skirmish_core::types::{yaw_of, SimTime, Transform};

use crate::damage::Health;
use crate::load::LoadModel;
use crate::movement::MovementController;
use crate::projectile::Projectile;
use crate::weapon::WeaponController;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    events: Vec<CombatEvent>,
) -> CombatSnapshot {
    CombatSnapshot {
        time: *time,
        phase,
        crafts: build_crafts(world),
        projectiles: build_projectiles(world),
        events,
    }
}

fn build_crafts(world: &World) -> Vec<CraftView> {
    let mut crafts: Vec<CraftView> = world
        .query::<(
            &Craft,
            &Transform,
            Option<&Velocity>,
            Option<&Health>,
            Option<&LoadModel>,
            Option<&WeaponController>,
            Option<&MovementController>,
            Option<&AiPilot>,
        )>()
        .iter()
        .map(
            |(_, (craft, transform, velocity, health, load, weapon, movement, pilot))| CraftView {
                id: craft.id,
                faction: craft.faction,
                position: transform.position,
                heading: yaw_of(transform.forward()).unwrap_or(0.0),
                velocity: velocity.map(|v| v.0).unwrap_or_default(),
                gear: movement.map(|m| m.gear()).unwrap_or(0),
                boosting: movement.map(|m| m.is_boosting()).unwrap_or(false),
                hp: health.map(|h| h.current_hp).unwrap_or(0.0),
                max_hp: health.map(|h| h.max_hp).unwrap_or(0.0),
                load: load.map(|l| l.view()).unwrap_or_default(),
                fire_rate: weapon.map(|w| w.current_fire_rate()).unwrap_or(0.0),
                ai_state: pilot.map(|p| p.state),
            },
        )
        .collect();

    crafts.sort_by_key(|c| c.id);
    crafts
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            position: p.position,
            direction: p.forward,
            owner: p.shooter,
        })
        .collect()
}
