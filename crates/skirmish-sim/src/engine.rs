//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, applies host commands at tick
//! boundaries, runs all systems and produces `CombatSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::{Entity, World};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::SimCommand;
use skirmish_core::components::{Craft, Equipment, PlayerControl};
use skirmish_core::config::SimConfig;
use skirmish_core::enums::GamePhase;
use skirmish_core::events::CombatEvent;
use skirmish_core::specs::Loadout;
use skirmish_core::state::CombatSnapshot;
use skirmish_core::types::{CraftId, SimTime};

use crate::damage::DamageRegistry;
use crate::load::LoadModel;
use crate::movement::{Handling, MovementController};
use crate::systems;
use crate::world_setup::{self, EnemyOptions};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    next_craft_id: u32,
    registry: DamageRegistry,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<CombatEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        info!(
            "starting simulation: seed {}, {} Hz",
            config.seed, config.tick_rate
        );
        Self {
            world: World::new(),
            config,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_craft_id: 1,
            registry: DamageRegistry::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> CombatSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance(self.config.dt());
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Entity currently carrying the craft `id`.
    pub fn find_craft(&self, id: CraftId) -> Option<Entity> {
        self.world
            .query::<&Craft>()
            .iter()
            .find(|(_, craft)| craft.id == id)
            .map(|(entity, _)| entity)
    }

    pub fn spawn_player(&mut self, position: DVec3, yaw: f64, loadout: Loadout) -> CraftId {
        let id = self.allocate_id();
        check_loadout(id, &loadout);
        world_setup::spawn_player(
            &mut self.world,
            &mut self.registry,
            id,
            position,
            yaw,
            loadout,
            &self.config,
        );
        id
    }

    pub fn spawn_enemy(
        &mut self,
        position: DVec3,
        yaw: f64,
        loadout: Loadout,
        options: EnemyOptions,
    ) -> CraftId {
        let id = self.allocate_id();
        check_loadout(id, &loadout);
        world_setup::spawn_enemy(
            &mut self.world,
            &mut self.registry,
            id,
            position,
            yaw,
            loadout,
            options,
            &self.config,
        );
        id
    }

    /// Spawn `count` standard enemies on a ring of `radius` around `center`.
    pub fn spawn_enemy_ring(&mut self, count: u32, center: DVec3, radius: f64) -> Vec<CraftId> {
        let ids = world_setup::spawn_enemy_ring(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            self.next_craft_id,
            count,
            center,
            radius,
            &self.config,
        );
        self.next_craft_id += count;
        ids
    }

    pub fn spawn_target_dummy(&mut self, position: DVec3) -> CraftId {
        let id = self.allocate_id();
        world_setup::spawn_target_dummy(
            &mut self.world,
            &mut self.registry,
            id,
            position,
            &self.config,
        );
        id
    }

    pub fn spawn_obstacle(&mut self, position: DVec3, half_extents: DVec3) -> Entity {
        world_setup::spawn_obstacle(&mut self.world, position, half_extents)
    }

    fn allocate_id(&mut self) -> CraftId {
        let id = CraftId(self.next_craft_id);
        self.next_craft_id += 1;
        id
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::SetInput { craft, input } => {
                let Some(entity) = self.find_craft(craft) else {
                    warn!("input for unknown craft {}", craft.0);
                    return;
                };
                match self.world.get::<&mut PlayerControl>(entity) {
                    Ok(mut control) => control.input = input,
                    Err(_) => warn!("craft {} is not player controlled", craft.0),
                }
            }
            SimCommand::Equip { craft, loadout } => {
                let Some(entity) = self.find_craft(craft) else {
                    warn!("equip for unknown craft {}", craft.0);
                    return;
                };
                check_loadout(craft, &loadout);
                self.equip(entity, loadout);
                info!(
                    "craft {} equipped: engine {}, main weapon {}",
                    craft.0,
                    loadout.engine.is_some(),
                    loadout.main_weapon.is_some()
                );
            }
            SimCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Swap equipment and push the engine into the load model and handling.
    fn equip(&mut self, entity: Entity, loadout: Loadout) {
        if let Ok(mut equipment) = self.world.get::<&mut Equipment>(entity) {
            equipment.loadout = loadout;
        }
        if let Ok(mut load) = self.world.get::<&mut LoadModel>(entity) {
            load.apply_engine(loadout.engine.as_ref());
        }
        if let Ok(mut movement) = self.world.get::<&mut MovementController>(entity) {
            movement.set_handling(Handling::from_engine(loadout.engine.as_ref()));
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.config.dt();

        // 1. Enemy pilots (kinematic motion, trigger, turret aim)
        systems::pilot::run(&mut self.world, &self.config, dt);
        // 2. Player gear, boost, rotation and trigger
        systems::controls::run(&mut self.world, dt);
        // 3. Engine power draw
        systems::power::run(&mut self.world, dt);
        // 4. Load decay and overload countdown
        systems::load::run(&mut self.world, dt, &mut self.events);
        // 5. Weapon cooldown and fire
        systems::weapons::run(&mut self.world, &self.config, dt, &mut self.events);
        // 6. Projectile flight and hit resolution
        systems::projectiles::run(
            &mut self.world,
            &self.registry,
            dt,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 7. Velocity approach and position integration
        systems::movement::run(&mut self.world, dt);
        // 8. Destruction and respawn
        systems::health::run(
            &mut self.world,
            self.time.tick,
            self.config.secs_to_ticks(self.config.health.respawn_delay_secs),
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 9. Cleanup (spent projectiles, destroyed crafts)
        systems::cleanup::run(&mut self.world, &mut self.registry, &mut self.despawn_buffer);
    }
}

/// Reported once when a loadout is applied, not on every shot.
fn check_loadout(id: CraftId, loadout: &Loadout) {
    if loadout.main_weapon.is_none() {
        warn!("craft {} has no main weapon; fallback stats apply", id.0);
    }
}
