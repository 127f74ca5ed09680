//! Projectile system: flight, swept hit detection and damage delivery.
//!
//! Colliders are snapshotted once per tick before any projectile moves, so
//! every projectile sees the same world.

use hecs::{Entity, World};
use log::debug;

use skirmish_core::components::Craft;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::CraftId;

use crate::collision::{Hit, SceneColliders};
use crate::damage::{DamageRegistry, Damageable, Health};
use crate::projectile::{Projectile, StepResult};

pub fn run(
    world: &mut World,
    registry: &DamageRegistry,
    dt: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<CombatEvent>,
) {
    let scene = SceneColliders::from_world(world);

    let mut hits: Vec<(CraftId, f64, Hit)> = Vec::new();
    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        match projectile.step(&scene, dt) {
            StepResult::Flying => {}
            StepResult::Hit { hit, destroyed } => {
                hits.push((projectile.shooter, projectile.damage, hit));
                if destroyed {
                    despawn_buffer.push(entity);
                }
            }
            StepResult::Expired => {
                events.push(CombatEvent::ProjectileExpired {
                    shooter: projectile.shooter,
                });
                despawn_buffer.push(entity);
            }
        }
    }

    for (shooter, damage, hit) in hits {
        let receiver = registry.resolve(hit.body);
        let target = receiver.and_then(|r| world.get::<&Craft>(r).ok().map(|c| c.id));

        if let Some(receiver) = receiver {
            if let Ok(mut health) = world.get::<&mut Health>(receiver) {
                health.take_damage(damage, hit.point);
                if damage > 0.0 {
                    health.last_attacker = Some(shooter);
                }
            }
        }

        debug!(
            "craft {} hit {:?} for {:.1} at ({:.1}, {:.1}, {:.1})",
            shooter.0, target, damage, hit.point.x, hit.point.y, hit.point.z
        );
        events.push(CombatEvent::ProjectileHit {
            shooter,
            target,
            damage,
            point: hit.point,
        });
    }
}
