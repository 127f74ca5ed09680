//! Weapon fire controller: cooldown gating, load draw and projectile launch.

use glam::DVec3;

use skirmish_core::config::WeaponFireConfig;
use skirmish_core::enums::Faction;
use skirmish_core::specs::WeaponSpec;

use crate::load::LoadModel;
use crate::projectile::ProjectileSpawn;

/// World-space pose of a muzzle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuzzlePose {
    pub position: DVec3,
    /// Unit firing direction.
    pub forward: DVec3,
}

#[derive(Debug, Clone, Default)]
pub struct WeaponController {
    cooldown_timer: f64,
    /// Shots per second used for the latest shot.
    current_fire_rate: f64,
}

impl WeaponController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_cooldown(&mut self, dt: f64) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
        }
    }

    pub fn cooldown(&self) -> f64 {
        self.cooldown_timer
    }

    pub fn current_fire_rate(&self) -> f64 {
        self.current_fire_rate
    }

    /// Attempt one shot.
    ///
    /// Weapon load never blocks a shot: it is charged (and refused silently
    /// while overloaded), and the overload state only slows the projectile
    /// and the refire rate.
    pub fn try_fire(
        &mut self,
        muzzle: Option<MuzzlePose>,
        weapon: Option<&WeaponSpec>,
        load: Option<&mut LoadModel>,
        faction: Faction,
        cfg: &WeaponFireConfig,
    ) -> Option<ProjectileSpawn> {
        if self.cooldown_timer > 0.0 {
            return None;
        }
        let muzzle = muzzle?;

        let spec = weapon.unwrap_or(&cfg.fallback);
        let mut speed = spec.projectile_speed;
        let mut power_scale = 1.0;

        if let Some(load) = load {
            // Slowdown reflects the state before this shot's draw.
            if load.is_overload() {
                speed *= cfg.overload_speed_factor;
            }
            if spec.energy_cost_per_shot > 0.0 {
                load.add_weapon_load(spec.energy_cost_per_shot);
            }
            power_scale = load.power_scale();
        }

        let mut rate = spec.fire_rate * power_scale;
        if rate <= 0.0 {
            rate = cfg.min_fire_rate;
        }
        self.current_fire_rate = rate;
        self.cooldown_timer = 1.0 / rate;

        let forward = muzzle.forward.try_normalize().unwrap_or(DVec3::Y);
        Some(ProjectileSpawn {
            position: muzzle.position + forward * cfg.spawn_forward_offset,
            forward,
            speed,
            damage: spec.damage,
            hit_mask: faction.hit_mask(),
        })
    }
}
