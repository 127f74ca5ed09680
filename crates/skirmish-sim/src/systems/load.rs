//! Load decay and overload countdown, with edge events.

use hecs::World;
use log::debug;

use skirmish_core::components::Craft;
use skirmish_core::events::CombatEvent;

use crate::load::{LoadModel, OverloadTransition};

pub fn run(world: &mut World, dt: f64, events: &mut Vec<CombatEvent>) {
    for (_entity, (craft, load)) in world.query_mut::<(&Craft, &mut LoadModel)>() {
        load.tick(dt);
        match load.poll_transition() {
            Some(OverloadTransition::Entered) => {
                debug!(
                    "craft {} overloaded ({:.1}/{:.1})",
                    craft.id.0,
                    load.total_load(),
                    load.max_load()
                );
                events.push(CombatEvent::OverloadEntered { craft: craft.id });
            }
            Some(OverloadTransition::Cleared) => {
                debug!("craft {} overload cleared", craft.id.0);
                events.push(CombatEvent::OverloadCleared { craft: craft.id });
            }
            None => {}
        }
    }
}
