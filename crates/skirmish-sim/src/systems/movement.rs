//! Movement integration system.
//!
//! Steps piloted crafts' velocity toward their desired velocity, integrates
//! position += velocity * dt, then snaps attached bodies to their parents.

use hecs::{Entity, World};

use skirmish_core::components::Velocity;
use skirmish_core::types::Transform;

use crate::collision::Parent;
use crate::load::LoadModel;
use crate::movement::MovementController;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (transform, velocity, movement, load)) in world.query_mut::<(
        &mut Transform,
        &mut Velocity,
        &mut MovementController,
        Option<&LoadModel>,
    )>() {
        let power_scale = load.map(|l| l.power_scale()).unwrap_or(1.0);
        movement.update_target(transform.forward(), power_scale);
        velocity.0 = movement.approach_velocity(velocity.0, dt);
        transform.position += velocity.0 * dt;
    }

    sync_children(world);
}

/// Move every attached body to its parent's pose.
pub fn sync_children(world: &mut World) {
    let mut poses: Vec<(Entity, Transform)> = Vec::new();
    {
        let mut query = world.query::<&Parent>();
        for (entity, parent) in query.iter() {
            if let Ok(p) = world.get::<&Transform>(parent.entity) {
                poses.push((
                    entity,
                    Transform::new(p.transform_point(parent.local_offset), p.rotation),
                ));
            }
        }
    }

    for (entity, pose) in poses {
        if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
            *transform = pose;
        }
    }
}
