//! Engine power draw: gear sets the base load, boost adds engine load.

use hecs::World;

use skirmish_core::components::Equipment;

use crate::load::LoadModel;
use crate::movement::MovementController;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (equipment, load, movement)) in
        world.query_mut::<(&Equipment, &mut LoadModel, Option<&MovementController>)>()
    {
        let Some(engine) = equipment.loadout.engine else {
            continue;
        };
        let (gear, boosting) = movement
            .map(|m| (m.gear(), m.is_boosting()))
            .unwrap_or((0, false));

        let base = if gear > 0 {
            engine.cruise_energy_per_sec * gear as f64
        } else {
            0.0
        };
        load.set_engine_base_load(base);

        if boosting && engine.boost_energy_per_sec > 0.0 {
            load.add_engine_load(engine.boost_energy_per_sec * dt);
        }
    }
}
