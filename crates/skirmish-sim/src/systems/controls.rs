//! Player controls: gear, boost, rotation and trigger from the latest input.

use hecs::World;

use skirmish_core::components::{PlayerControl, Trigger};
use skirmish_core::types::Transform;

use crate::movement::MovementController;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (control, movement, transform, trigger)) in world.query_mut::<(
        &mut PlayerControl,
        &mut MovementController,
        &mut Transform,
        &mut Trigger,
    )>() {
        let input = &mut control.input;
        if input.gear_up {
            movement.gear_up();
        }
        if input.gear_down {
            movement.gear_down();
        }
        // Gear changes are one-shot.
        input.gear_up = false;
        input.gear_down = false;

        movement.set_boost(input.boost);

        let (pitch, yaw, roll) = input.clamped_axes();
        transform.rotation = movement.apply_rotation(transform.rotation, pitch, yaw, roll, dt);

        trigger.pulled = input.fire;
    }
}
