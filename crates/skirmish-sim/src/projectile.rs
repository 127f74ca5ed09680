//! Projectile flight and hit resolution.
//!
//! A projectile moves in a straight line at constant speed. Every tick it
//! sweeps the whole segment travelled since the previous tick, so thin
//! targets cannot be skipped at high speed. The owner and anything attached
//! to the owner are never hit.

use glam::DVec3;
use hecs::Entity;

use skirmish_core::config::ProjectileConfig;
use skirmish_core::layers::LayerMask;
use skirmish_core::types::CraftId;

use crate::collision::{CollisionQuery, Hierarchy, Hit};

/// Launch parameters produced by a weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub position: DVec3,
    /// Unit direction of travel.
    pub forward: DVec3,
    pub speed: f64,
    pub damage: f64,
    pub hit_mask: LayerMask,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    Flying,
    /// Struck a body. `destroyed` is false when the projectile pierces.
    Hit { hit: Hit, destroyed: bool },
    Expired,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: DVec3,
    pub forward: DVec3,
    pub speed: f64,
    pub damage: f64,
    /// Entity that fired this projectile.
    pub owner: Entity,
    pub shooter: CraftId,
    pub hit_mask: LayerMask,
    /// Position at the end of the previous tick; start of the next sweep.
    pub last_position: DVec3,
    age: f64,
    lifetime: f64,
    radius: f64,
    min_overlap_radius: f64,
    destroy_on_hit: bool,
    spawn_checked: bool,
    /// Bodies already struck by a piercing projectile.
    struck: Vec<Entity>,
}

impl Projectile {
    pub fn new(
        spawn: &ProjectileSpawn,
        owner: Entity,
        shooter: CraftId,
        cfg: &ProjectileConfig,
    ) -> Self {
        let forward = spawn.forward.try_normalize().unwrap_or(DVec3::Y);
        Self {
            position: spawn.position,
            forward,
            speed: spawn.speed.max(0.0),
            damage: spawn.damage.max(0.0),
            owner,
            shooter,
            hit_mask: spawn.hit_mask,
            last_position: spawn.position - forward * cfg.skin_back,
            age: 0.0,
            lifetime: cfg.lifetime_secs,
            radius: cfg.radius.max(0.0),
            min_overlap_radius: cfg.min_overlap_radius,
            destroy_on_hit: cfg.destroy_on_hit,
            spawn_checked: false,
            struck: Vec::new(),
        }
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    /// Advance one tick of length `dt`.
    pub fn step<S: CollisionQuery + Hierarchy>(&mut self, scene: &S, dt: f64) -> StepResult {
        if !self.spawn_checked {
            self.spawn_checked = true;
            if let Some(hit) = self.spawn_overlap(scene) {
                return self.resolve(hit);
            }
        }

        self.age += dt;
        if self.age > self.lifetime {
            return StepResult::Expired;
        }

        let next = self.position + self.forward * self.speed * dt;
        let owner = self.owner;
        let struck = &self.struck;
        let ignore =
            |body: Entity| scene.is_self_or_descendant(body, owner) || struck.contains(&body);
        let swept = scene.sweep(self.last_position, next, self.radius, self.hit_mask, &ignore);

        self.position = next;
        self.last_position = next;

        match swept {
            Some(hit) => self.resolve(hit),
            None => StepResult::Flying,
        }
    }

    /// First body (other than the owner's) overlapping the spawn point.
    fn spawn_overlap<S: CollisionQuery + Hierarchy>(&self, scene: &S) -> Option<Hit> {
        let radius = self.radius.max(self.min_overlap_radius);
        scene
            .overlap_sphere(self.position, radius, self.hit_mask)
            .into_iter()
            .find(|hit| !scene.is_self_or_descendant(hit.body, self.owner))
    }

    fn resolve(&mut self, hit: Hit) -> StepResult {
        if self.destroy_on_hit {
            self.position = hit.point;
        } else {
            self.struck.push(hit.body);
        }
        StepResult::Hit {
            hit,
            destroyed: self.destroy_on_hit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{Collider, Parent, SceneColliders};
    use approx::assert_relative_eq;
    use hecs::World;
    use skirmish_core::constants::DT;
    use skirmish_core::types::Transform;

    fn spawn_at(position: DVec3, forward: DVec3, speed: f64) -> ProjectileSpawn {
        ProjectileSpawn {
            position,
            forward,
            speed,
            damage: 10.0,
            hit_mask: LayerMask::ENEMY | LayerMask::ENVIRONMENT,
        }
    }

    fn body(world: &mut World, position: DVec3, collider: Collider) -> Entity {
        world.spawn((Transform::new(position, Default::default()), collider))
    }

    #[test]
    fn test_first_segment_starts_behind_spawn() {
        let mut world = World::new();
        let owner = world.spawn(());
        let p = Projectile::new(
            &spawn_at(DVec3::ZERO, DVec3::Y, 100.0),
            owner,
            CraftId(1),
            &ProjectileConfig::default(),
        );
        assert_relative_eq!(p.last_position.y, -0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_speed_and_damage_clamp_to_zero() {
        let world = World::new();
        let scene = SceneColliders::from_world(&world);
        let mut spawn = spawn_at(DVec3::ZERO, DVec3::Y, -80.0);
        spawn.damage = -5.0;
        let mut p = Projectile::new(
            &spawn,
            Entity::DANGLING,
            CraftId(1),
            &ProjectileConfig::default(),
        );
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.damage, 0.0);

        assert_eq!(p.step(&scene, DT), StepResult::Flying);
        assert_eq!(p.position, DVec3::ZERO);
    }

    #[test]
    fn test_flies_and_commits_position() {
        let world = World::new();
        let scene = SceneColliders::from_world(&world);
        let mut p = Projectile::new(
            &spawn_at(DVec3::ZERO, DVec3::X, 60.0),
            Entity::DANGLING,
            CraftId(1),
            &ProjectileConfig::default(),
        );
        assert_eq!(p.step(&scene, DT), StepResult::Flying);
        assert_relative_eq!(p.position.x, 1.0, epsilon = 1e-9);
        assert_eq!(p.last_position, p.position);
    }

    #[test]
    fn test_thin_target_is_not_tunnelled() {
        let mut world = World::new();
        // 2 cm plate, 10 m ahead; the projectile covers 5 m per tick.
        let plate = body(
            &mut world,
            DVec3::new(0.0, 10.0, 0.0),
            Collider::cuboid(DVec3::new(2.0, 0.01, 2.0), LayerMask::ENEMY),
        );
        let scene = SceneColliders::from_world(&world);
        let mut p = Projectile::new(
            &spawn_at(DVec3::new(0.0, 2.0, 0.0), DVec3::Y, 300.0),
            Entity::DANGLING,
            CraftId(1),
            &ProjectileConfig::default(),
        );

        let mut result = StepResult::Flying;
        for _ in 0..10 {
            result = p.step(&scene, DT);
            if result != StepResult::Flying {
                break;
            }
        }
        match result {
            StepResult::Hit { hit, destroyed } => {
                assert_eq!(hit.body, plate);
                assert!(destroyed);
            }
            other => panic!("expected a hit, got {other:?}"),
        }
    }

    #[test]
    fn test_never_hits_owner_even_when_overlapping() {
        let mut world = World::new();
        let owner = body(&mut world, DVec3::ZERO, Collider::sphere(4.0, LayerMask::ENEMY));
        world.spawn((
            Transform::new(DVec3::new(0.0, 6.0, 0.0), Default::default()),
            Collider::sphere(1.0, LayerMask::ENEMY),
            Parent {
                entity: owner,
                local_offset: DVec3::new(0.0, 6.0, 0.0),
            },
        ));
        let scene = SceneColliders::from_world(&world);
        let mut p = Projectile::new(
            &spawn_at(DVec3::new(0.0, 1.0, 0.0), DVec3::Y, 120.0),
            owner,
            CraftId(1),
            &ProjectileConfig::default(),
        );
        for _ in 0..30 {
            assert!(!matches!(p.step(&scene, DT), StepResult::Hit { .. }));
        }
        assert!(p.position.y > 6.0);
    }

    #[test]
    fn test_spawn_overlap_hits_other_body_immediately() {
        let mut world = World::new();
        let target = body(&mut world, DVec3::ZERO, Collider::sphere(2.0, LayerMask::ENEMY));
        let scene = SceneColliders::from_world(&world);
        let mut p = Projectile::new(
            &spawn_at(DVec3::new(0.0, 1.0, 0.0), DVec3::Y, 100.0),
            Entity::DANGLING,
            CraftId(1),
            &ProjectileConfig::default(),
        );
        match p.step(&scene, DT) {
            StepResult::Hit { hit, .. } => {
                assert_eq!(hit.body, target);
                assert_eq!(p.age(), 0.0);
            }
            other => panic!("expected spawn overlap hit, got {other:?}"),
        }
    }

    #[test]
    fn test_expires_after_lifetime() {
        let world = World::new();
        let scene = SceneColliders::from_world(&world);
        let cfg = ProjectileConfig {
            lifetime_secs: 0.5,
            ..Default::default()
        };
        let mut p = Projectile::new(
            &spawn_at(DVec3::ZERO, DVec3::Y, 10.0),
            Entity::DANGLING,
            CraftId(1),
            &cfg,
        );
        let mut ticks = 0;
        while p.step(&scene, 0.1) == StepResult::Flying {
            ticks += 1;
            assert!(ticks < 100);
        }
        // Accumulated age passes 0.5 on the sixth or (rounding) fifth step.
        assert!((4..=5).contains(&ticks));
    }

    #[test]
    fn test_mask_excludes_own_faction_bodies() {
        let mut world = World::new();
        let friendly = Collider::sphere(1.0, LayerMask::PLAYER);
        body(&mut world, DVec3::new(0.0, 5.0, 0.0), friendly);
        let scene = SceneColliders::from_world(&world);
        let mut p = Projectile::new(
            &spawn_at(DVec3::ZERO, DVec3::Y, 600.0),
            Entity::DANGLING,
            CraftId(1),
            &ProjectileConfig::default(),
        );
        assert_eq!(p.step(&scene, DT), StepResult::Flying);
        assert_eq!(p.step(&scene, DT), StepResult::Flying);
    }

    #[test]
    fn test_piercing_hits_each_body_once() {
        let mut world = World::new();
        let a = body(
            &mut world,
            DVec3::new(0.0, 5.0, 0.0),
            Collider::sphere(1.0, LayerMask::ENEMY),
        );
        let b = body(
            &mut world,
            DVec3::new(0.0, 15.0, 0.0),
            Collider::sphere(1.0, LayerMask::ENEMY),
        );
        let scene = SceneColliders::from_world(&world);
        let cfg = ProjectileConfig {
            destroy_on_hit: false,
            ..Default::default()
        };
        let spawn = spawn_at(DVec3::ZERO, DVec3::Y, 120.0);
        let mut p = Projectile::new(&spawn, Entity::DANGLING, CraftId(1), &cfg);
        let mut struck = Vec::new();
        for _ in 0..20 {
            if let StepResult::Hit { hit, destroyed } = p.step(&scene, DT) {
                assert!(!destroyed);
                struck.push(hit.body);
            }
        }
        assert_eq!(struck, vec![a, b]);
    }
}
