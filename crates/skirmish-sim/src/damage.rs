//! Hull durability and damage routing.
//!
//! Projectiles hit collider bodies; the registry maps each body to the
//! entity whose `Health` receives the damage.

use std::collections::HashMap;

use glam::DVec3;
use hecs::Entity;

use skirmish_core::types::CraftId;

/// Anything that can absorb damage.
pub trait Damageable {
    /// Apply `amount` of damage at `point`. Non-positive amounts are ignored.
    fn take_damage(&mut self, amount: f64, point: DVec3);
}

#[derive(Debug, Clone)]
pub struct Health {
    pub max_hp: f64,
    pub current_hp: f64,
    /// Destroyed at zero hp; otherwise refilled after a delay.
    pub destructible: bool,
    /// Tick at which a depleted, non-destructible hull refills.
    pub respawn_at_tick: Option<u64>,
    /// Shooter of the most recent damaging hit.
    pub last_attacker: Option<CraftId>,
    /// Point of the most recent damaging hit.
    pub last_hit_point: Option<DVec3>,
}

impl Health {
    pub fn new(max_hp: f64, destructible: bool) -> Self {
        Self {
            max_hp,
            current_hp: max_hp,
            destructible,
            respawn_at_tick: None,
            last_attacker: None,
            last_hit_point: None,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current_hp <= 0.0
    }

    pub fn refill(&mut self) {
        self.current_hp = self.max_hp;
        self.respawn_at_tick = None;
    }
}

impl Damageable for Health {
    fn take_damage(&mut self, amount: f64, point: DVec3) {
        if amount <= 0.0 {
            return;
        }
        self.current_hp = (self.current_hp - amount).clamp(0.0, self.max_hp);
        self.last_hit_point = Some(point);
    }
}

/// Collider body → entity receiving its damage.
#[derive(Debug, Default)]
pub struct DamageRegistry {
    receivers: HashMap<Entity, Entity>,
}

impl DamageRegistry {
    pub fn register(&mut self, body: Entity, receiver: Entity) {
        self.receivers.insert(body, receiver);
    }

    pub fn resolve(&self, body: Entity) -> Option<Entity> {
        self.receivers.get(&body).copied()
    }

    /// Forget a body and every body that routed damage to it.
    pub fn remove(&mut self, entity: Entity) {
        self.receivers
            .retain(|body, receiver| *body != entity && *receiver != entity);
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut h = Health::new(100.0, true);
        h.take_damage(30.0, DVec3::ZERO);
        assert_eq!(h.current_hp, 70.0);
        h.take_damage(500.0, DVec3::X);
        assert_eq!(h.current_hp, 0.0);
        assert!(h.is_depleted());
        assert_eq!(h.last_hit_point, Some(DVec3::X));
    }

    #[test]
    fn test_non_positive_damage_is_ignored() {
        let mut h = Health::new(100.0, true);
        h.take_damage(0.0, DVec3::ZERO);
        h.take_damage(-5.0, DVec3::ZERO);
        assert_eq!(h.current_hp, 100.0);
        assert_eq!(h.last_hit_point, None);
    }

    #[test]
    fn test_registry_routes_child_bodies_to_parent() {
        let mut world = World::new();
        let hull = world.spawn(());
        let turret = world.spawn(());
        let mut registry = DamageRegistry::default();
        registry.register(hull, hull);
        registry.register(turret, hull);

        assert_eq!(registry.resolve(turret), Some(hull));
        registry.remove(hull);
        assert!(registry.is_empty());
        assert_eq!(registry.resolve(turret), None);
    }
}
