//! Cleanup system: despawns spent projectiles, destroyed crafts and any
//! bodies attached to them.

use hecs::{Entity, World};

use crate::collision::Parent;
use crate::damage::DamageRegistry;

pub fn run(world: &mut World, registry: &mut DamageRegistry, despawn_buffer: &mut Vec<Entity>) {
    // Orphaned attachments follow their parent.
    let orphans: Vec<Entity> = world
        .query::<&Parent>()
        .iter()
        .filter(|(_, parent)| {
            despawn_buffer.contains(&parent.entity) || !world.contains(parent.entity)
        })
        .map(|(entity, _)| entity)
        .collect();
    despawn_buffer.extend(orphans);

    for entity in despawn_buffer.drain(..) {
        registry.remove(entity);
        let _ = world.despawn(entity);
    }
}
