//! Weapons system: cooldowns, trigger handling and projectile launch.

use hecs::{Entity, World};
use log::{debug, warn};

use skirmish_core::components::{Craft, Equipment, Muzzle, Trigger, Turret};
use skirmish_core::config::SimConfig;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::Transform;

use skirmish_ai::turret::muzzle_direction;

use crate::load::LoadModel;
use crate::projectile::{Projectile, ProjectileSpawn};
use crate::weapon::{MuzzlePose, WeaponController};

pub fn run(world: &mut World, config: &SimConfig, dt: f64, events: &mut Vec<CombatEvent>) {
    let mut launches: Vec<(Entity, Craft, ProjectileSpawn)> = Vec::new();

    for (entity, (craft, transform, weapon, trigger, muzzle, load, equipment, turret)) in world
        .query_mut::<(
            &Craft,
            &Transform,
            &mut WeaponController,
            &mut Trigger,
            Option<&Muzzle>,
            Option<&mut LoadModel>,
            Option<&Equipment>,
            Option<&Turret>,
        )>()
    {
        weapon.tick_cooldown(dt);
        if !trigger.pulled {
            continue;
        }
        trigger.pulled = false;

        let pose = match muzzle {
            Some(m) => Some(MuzzlePose {
                position: transform.transform_point(m.offset),
                forward: turret
                    .map(muzzle_direction)
                    .unwrap_or_else(|| transform.forward()),
            }),
            None => {
                warn!("craft {} has no muzzle; shot skipped", craft.id.0);
                None
            }
        };
        let spec = equipment.and_then(|e| e.loadout.main_weapon);

        let fired = weapon.try_fire(pose, spec.as_ref(), load, craft.faction, &config.weapon);
        if let Some(spawn) = fired {
            launches.push((entity, *craft, spawn));
        }
    }

    for (owner, craft, spawn) in launches {
        debug!("craft {} fired at {:.1} m/s", craft.id.0, spawn.speed);
        events.push(CombatEvent::ShotFired {
            shooter: craft.id,
            position: spawn.position,
            speed: spawn.speed,
        });
        world.spawn((Projectile::new(&spawn, owner, craft.id, &config.projectile),));
    }
}
