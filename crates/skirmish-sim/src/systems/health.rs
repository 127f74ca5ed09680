//! Health system: destroys depleted crafts and refills practice targets.

use hecs::{Entity, World};
use log::debug;

use skirmish_core::components::Craft;
use skirmish_core::events::CombatEvent;

use crate::damage::Health;

/// `respawn_ticks` is the refill delay for non-destructible hulls.
pub fn run(
    world: &mut World,
    current_tick: u64,
    respawn_ticks: u64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<CombatEvent>,
) {
    for (entity, (craft, health)) in world.query_mut::<(&Craft, &mut Health)>() {
        if let Some(at) = health.respawn_at_tick {
            if current_tick >= at {
                health.refill();
                debug!("craft {} respawned", craft.id.0);
                events.push(CombatEvent::CraftRespawned { craft: craft.id });
            }
            continue;
        }

        if !health.is_depleted() {
            continue;
        }

        if health.destructible {
            debug!("craft {} destroyed by {:?}", craft.id.0, health.last_attacker);
            events.push(CombatEvent::CraftDestroyed {
                craft: craft.id,
                by: health.last_attacker,
            });
            despawn_buffer.push(entity);
        } else {
            health.respawn_at_tick = Some(current_tick + respawn_ticks);
        }
    }
}
