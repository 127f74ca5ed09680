//! Entity spawn factories for setting up the simulation world.
//!
//! Every craft is spawned with the full component bundle its systems need,
//! and every collider body is registered with the damage registry.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::*;
use skirmish_core::config::SimConfig;
use skirmish_core::constants::CRAFT_HULL_RADIUS;
use skirmish_core::enums::Faction;
use skirmish_core::layers::LayerMask;
use skirmish_core::specs::Loadout;
use skirmish_core::types::{yaw_of, CraftId, Transform};

use crate::collision::{Collider, Parent};
use crate::damage::{DamageRegistry, Health};
use crate::load::LoadModel;
use crate::movement::{Handling, MovementController};
use crate::weapon::WeaponController;

/// Nose gun position in the craft frame.
const NOSE_MUZZLE: DVec3 = DVec3::new(0.0, CRAFT_HULL_RADIUS + 0.5, 0.0);

/// Turret housing position above the hull.
const TURRET_MOUNT: DVec3 = DVec3::new(0.0, 0.0, CRAFT_HULL_RADIUS * 0.5);

const TURRET_HOUSING_RADIUS: f64 = 1.5;

const DUMMY_RADIUS: f64 = 6.0;

/// Extra options for an enemy craft.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyOptions {
    /// Mount the main gun on an aimable turret instead of the nose.
    pub turret: bool,
    /// Circling direction; `None` uses the configured default.
    pub clockwise: Option<bool>,
    /// Fixed target; `None` chases the nearest opposing craft.
    pub target: Option<CraftId>,
}

/// Spawn an input-driven craft.
pub fn spawn_player(
    world: &mut World,
    registry: &mut DamageRegistry,
    id: CraftId,
    position: DVec3,
    yaw: f64,
    loadout: Loadout,
    config: &SimConfig,
) -> Entity {
    let entity = world.spawn((
        Craft {
            id,
            faction: Faction::Player,
        },
        Transform::from_yaw(position, yaw),
        Velocity::default(),
        Collider::sphere(CRAFT_HULL_RADIUS, Faction::Player.body_layer()),
        Health::new(config.health.craft_max_hp, true),
        LoadModel::new(config.load, loadout.engine.as_ref()),
        WeaponController::new(),
        Muzzle {
            offset: NOSE_MUZZLE,
        },
        Trigger::default(),
        Equipment { loadout },
        MovementController::new(Handling::from_engine(loadout.engine.as_ref())),
        PlayerControl::default(),
    ));
    registry.register(entity, entity);
    entity
}

/// Spawn an AI-piloted craft.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemy(
    world: &mut World,
    registry: &mut DamageRegistry,
    id: CraftId,
    position: DVec3,
    yaw: f64,
    loadout: Loadout,
    options: EnemyOptions,
    config: &SimConfig,
) -> Entity {
    let pilot = AiPilot {
        clockwise: options.clockwise.unwrap_or(config.ai.orbit_clockwise),
        target: options.target,
        ..Default::default()
    };
    let muzzle = if options.turret {
        Muzzle {
            offset: TURRET_MOUNT,
        }
    } else {
        Muzzle {
            offset: NOSE_MUZZLE,
        }
    };

    let entity = world.spawn((
        Craft {
            id,
            faction: Faction::Enemy,
        },
        Transform::from_yaw(position, yaw),
        Velocity::default(),
        Collider::sphere(CRAFT_HULL_RADIUS, Faction::Enemy.body_layer()),
        Health::new(config.health.craft_max_hp, true),
        LoadModel::new(config.load, loadout.engine.as_ref()),
        WeaponController::new(),
        muzzle,
        Trigger::default(),
        Equipment { loadout },
        pilot,
    ));
    registry.register(entity, entity);

    if options.turret {
        let _ = world.insert_one(entity, Turret { yaw, pitch: 0.0 });
        let housing = world.spawn((
            Transform::from_yaw(position + TURRET_MOUNT, yaw),
            Collider::sphere(TURRET_HOUSING_RADIUS, Faction::Enemy.body_layer()),
            Parent {
                entity,
                local_offset: TURRET_MOUNT,
            },
        ));
        registry.register(housing, entity);
    }
    entity
}

/// Spawn `count` enemies on a ring around `center`, at random bearings and
/// with random circling directions. Returns the ids assigned, starting at
/// `first_id`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemy_ring(
    world: &mut World,
    registry: &mut DamageRegistry,
    rng: &mut ChaCha8Rng,
    first_id: u32,
    count: u32,
    center: DVec3,
    radius: f64,
    config: &SimConfig,
) -> Vec<CraftId> {
    let mut ids = Vec::with_capacity(count as usize);
    for i in 0..count {
        let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let range = radius * rng.gen_range(0.9..1.1);
        let position = center + DVec3::new(range * bearing.sin(), range * bearing.cos(), 0.0);
        // Face the center.
        let yaw = yaw_of(center - position).unwrap_or(0.0);
        let options = EnemyOptions {
            clockwise: Some(rng.gen_bool(0.5)),
            ..Default::default()
        };

        let id = CraftId(first_id + i);
        spawn_enemy(
            world,
            registry,
            id,
            position,
            yaw,
            Loadout::standard(),
            options,
            config,
        );
        ids.push(id);
    }
    ids
}

/// Spawn a stationary practice target. Its hull refills after depletion.
pub fn spawn_target_dummy(
    world: &mut World,
    registry: &mut DamageRegistry,
    id: CraftId,
    position: DVec3,
    config: &SimConfig,
) -> Entity {
    let entity = world.spawn((
        Craft {
            id,
            faction: Faction::Enemy,
        },
        Transform::from_yaw(position, 0.0),
        Velocity::default(),
        Collider::sphere(DUMMY_RADIUS, Faction::Enemy.body_layer()),
        Health::new(config.health.dummy_max_hp, false),
    ));
    registry.register(entity, entity);
    entity
}

/// Spawn an axis-aligned block of level geometry.
pub fn spawn_obstacle(world: &mut World, position: DVec3, half_extents: DVec3) -> Entity {
    world.spawn((
        Transform::from_yaw(position, 0.0),
        Collider::cuboid(half_extents, LayerMask::ENVIRONMENT),
    ))
}
