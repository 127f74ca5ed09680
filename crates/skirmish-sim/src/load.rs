//! Load/overload resource model.
//!
//! Each craft carries one `LoadModel`. Engine gear sets a base load
//! absolutely every tick; engine boost, weapon shots and other systems add
//! transient load that decays over time. When the total reaches capacity the
//! craft overloads: output drops to `overload_power_scale` for a fixed time
//! and further additive draws are refused.

use skirmish_core::config::LoadConfig;
use skirmish_core::specs::EngineSpec;
use skirmish_core::state::LoadView;

/// Overload edge reported by [`LoadModel::poll_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadTransition {
    Entered,
    Cleared,
}

#[derive(Debug, Clone)]
pub struct LoadModel {
    config: LoadConfig,
    max_load: f64,
    engine_base_load: f64,
    engine_load: f64,
    weapon_load: f64,
    system_load: f64,
    overload_timer: f64,
    /// Overload flag as of the last `poll_transition` call.
    reported_overload: bool,
}

impl LoadModel {
    pub fn new(config: LoadConfig, engine: Option<&EngineSpec>) -> Self {
        let mut model = Self {
            config,
            max_load: 0.0,
            engine_base_load: 0.0,
            engine_load: 0.0,
            weapon_load: 0.0,
            system_load: 0.0,
            overload_timer: 0.0,
            reported_overload: false,
        };
        model.apply_engine(engine);
        model
    }

    /// Re-initialize capacity from an engine and zero every channel.
    ///
    /// Capacity comes from the engine when it provides a positive one,
    /// otherwise from `base_max_load`; either way it is at least 1.
    /// The overload timer is left running.
    pub fn apply_engine(&mut self, engine: Option<&EngineSpec>) {
        self.max_load = match engine {
            Some(spec) if spec.energy_capacity > 0.0 => spec.energy_capacity.max(1.0),
            _ => self.config.base_max_load.max(1.0),
        };
        self.engine_base_load = 0.0;
        self.engine_load = 0.0;
        self.weapon_load = 0.0;
        self.system_load = 0.0;
    }

    /// Absolute set of the gear-driven load.
    pub fn set_engine_base_load(&mut self, load: f64) {
        self.engine_base_load = load.clamp(0.0, self.max_load.max(1.0));
        self.check_overload();
    }

    /// Add transient engine load. Returns whether the draw was applied.
    pub fn add_engine_load(&mut self, amount: f64) -> bool {
        self.add(amount, |m| &mut m.engine_load)
    }

    /// Add weapon load. Returns whether the draw was applied.
    pub fn add_weapon_load(&mut self, amount: f64) -> bool {
        self.add(amount, |m| &mut m.weapon_load)
    }

    /// Add load from any other system. Returns whether the draw was applied.
    pub fn add_system_load(&mut self, amount: f64) -> bool {
        self.add(amount, |m| &mut m.system_load)
    }

    fn add(&mut self, amount: f64, channel: impl FnOnce(&mut Self) -> &mut f64) -> bool {
        if amount <= 0.0 || self.is_overload() {
            return false;
        }
        *channel(self) += amount;
        self.clamp_loads();
        self.check_overload();
        true
    }

    /// Advance the model by `dt` seconds: count down or arm the overload,
    /// then decay the transient channels.
    pub fn tick(&mut self, dt: f64) {
        if self.is_overload() {
            self.overload_timer = (self.overload_timer - dt).max(0.0);
        } else {
            self.check_overload();
        }
        self.cool_down(dt);
        self.clamp_loads();
    }

    fn cool_down(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let factor = if self.is_overload() {
            self.config.overload_cool_multiplier
        } else {
            1.0
        };
        self.engine_load -= self.config.engine_cool_rate * factor * dt;
        self.weapon_load -= self.config.weapon_cool_rate * factor * dt;
        self.system_load -= self.config.system_cool_rate * factor * dt;
    }

    fn clamp_loads(&mut self) {
        let max = self.max_load.max(1.0);
        self.engine_load = self.engine_load.clamp(0.0, max);
        self.weapon_load = self.weapon_load.clamp(0.0, max);
        self.system_load = self.system_load.clamp(0.0, max);
    }

    /// Arm the overload timer if capacity is reached. No-op while already
    /// overloaded, so an episode is armed exactly once.
    fn check_overload(&mut self) {
        if self.is_overload() {
            return;
        }
        if self.total_load() >= self.max_load {
            self.overload_timer = self.config.overload_cooldown_secs;
        }
    }

    /// Report an overload edge since the previous poll, if any.
    pub fn poll_transition(&mut self) -> Option<OverloadTransition> {
        let now = self.is_overload();
        if now == self.reported_overload {
            return None;
        }
        self.reported_overload = now;
        Some(if now {
            OverloadTransition::Entered
        } else {
            OverloadTransition::Cleared
        })
    }

    pub fn is_overload(&self) -> bool {
        self.overload_timer > 0.0
    }

    pub fn power_scale(&self) -> f64 {
        if self.is_overload() {
            self.config.overload_power_scale
        } else {
            1.0
        }
    }

    pub fn total_load(&self) -> f64 {
        (self.engine_base_load + self.engine_load + self.weapon_load + self.system_load).max(0.0)
    }

    pub fn load_percent(&self) -> f64 {
        if self.max_load <= 0.0 {
            0.0
        } else {
            (self.total_load() / self.max_load).clamp(0.0, 1.0)
        }
    }

    pub fn is_warning(&self) -> bool {
        self.load_percent() >= self.config.warning_percent
    }

    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    pub fn engine_base_load(&self) -> f64 {
        self.engine_base_load
    }

    pub fn engine_load(&self) -> f64 {
        self.engine_load
    }

    pub fn weapon_load(&self) -> f64 {
        self.weapon_load
    }

    pub fn system_load(&self) -> f64 {
        self.system_load
    }

    pub fn overload_remaining(&self) -> f64 {
        self.overload_timer
    }

    pub fn view(&self) -> LoadView {
        LoadView {
            percent: self.load_percent(),
            is_overload: self.is_overload(),
            is_warning: self.is_warning(),
            power_scale: self.power_scale(),
            max_load: self.max_load,
            engine_base: self.engine_base_load,
            engine: self.engine_load,
            weapon: self.weapon_load,
            system: self.system_load,
            overload_remaining_secs: self.overload_timer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> LoadModel {
        LoadModel::new(LoadConfig::default(), Some(&EngineSpec::default()))
    }

    fn assert_channels_in_range(m: &LoadModel) {
        for v in [m.engine_base_load(), m.engine_load(), m.weapon_load(), m.system_load()] {
            assert!(v >= 0.0 && v <= m.max_load(), "channel {v} outside [0, {}]", m.max_load());
        }
    }

    #[test]
    fn test_capacity_from_engine_or_default() {
        let m = model();
        assert_relative_eq!(m.max_load(), 100.0);

        let big = EngineSpec {
            energy_capacity: 250.0,
            ..Default::default()
        };
        assert_relative_eq!(LoadModel::new(LoadConfig::default(), Some(&big)).max_load(), 250.0);

        let none = EngineSpec {
            energy_capacity: 0.0,
            ..Default::default()
        };
        let cfg = LoadConfig {
            base_max_load: 80.0,
            ..Default::default()
        };
        assert_relative_eq!(LoadModel::new(cfg, Some(&none)).max_load(), 80.0);
        assert_relative_eq!(LoadModel::new(cfg, None).max_load(), 80.0);
    }

    #[test]
    fn test_weapon_load_accumulates_and_decays() {
        let mut m = model();
        assert!(m.add_weapon_load(10.0));
        assert_relative_eq!(m.weapon_load(), 10.0);
        m.tick(1.0);
        assert_relative_eq!(m.weapon_load(), 6.0);
        assert!(!m.add_weapon_load(0.0));
        assert!(!m.add_weapon_load(-3.0));
        assert_relative_eq!(m.weapon_load(), 6.0);
    }

    #[test]
    fn test_reaching_capacity_enters_overload() {
        let mut m = model();
        assert!(m.add_system_load(60.0));
        assert!(!m.is_overload());
        assert_relative_eq!(m.power_scale(), 1.0);

        assert!(m.add_weapon_load(40.0));
        assert!(m.is_overload());
        assert_relative_eq!(m.power_scale(), 0.6);
        assert_relative_eq!(m.overload_remaining(), 5.0);
    }

    #[test]
    fn test_draw_refused_while_overloaded() {
        let mut m = model();
        m.add_system_load(100.0);
        assert!(m.is_overload());
        let before = m.view();
        assert!(!m.add_weapon_load(5.0));
        assert!(!m.add_engine_load(5.0));
        assert!(!m.add_system_load(5.0));
        let after = m.view();
        assert_eq!(before.weapon, after.weapon);
        assert_eq!(before.engine, after.engine);
        assert_eq!(before.system, after.system);
    }

    #[test]
    fn test_overload_armed_once_per_episode() {
        let mut m = model();
        m.set_engine_base_load(100.0);
        assert!(m.is_overload());
        m.tick(1.0);
        assert_relative_eq!(m.overload_remaining(), 4.0);
        // Still at capacity: re-checking must not re-arm the timer.
        m.set_engine_base_load(100.0);
        assert_relative_eq!(m.overload_remaining(), 4.0);
    }

    #[test]
    fn test_overload_clears_after_cooldown() {
        let mut m = model();
        m.add_weapon_load(100.0);
        assert!(m.is_overload());
        for _ in 0..5 {
            m.tick(1.0);
        }
        assert!(!m.is_overload());
        assert_relative_eq!(m.power_scale(), 1.0);
    }

    #[test]
    fn test_decay_faster_while_overloaded() {
        let mut m = model();
        m.add_weapon_load(100.0);
        m.tick(1.0);
        // 4/s × 1.5
        assert_relative_eq!(m.weapon_load(), 94.0);
    }

    #[test]
    fn test_per_tick_check_arms_from_base_load() {
        let mut m = model();
        m.set_engine_base_load(95.0);
        m.add_engine_load(3.0);
        assert!(!m.is_overload());
        // Base load alone is under capacity; the tick check sees 98 < 100.
        m.tick(0.0);
        assert!(!m.is_overload());
        m.add_engine_load(2.0);
        assert!(m.is_overload());
    }

    #[test]
    fn test_base_load_clamped() {
        let mut m = model();
        m.set_engine_base_load(-4.0);
        assert_eq!(m.engine_base_load(), 0.0);
        m.set_engine_base_load(1e6);
        assert_relative_eq!(m.engine_base_load(), 100.0);
    }

    #[test]
    fn test_channels_stay_in_range() {
        let mut m = model();
        for i in 0..500 {
            let x = (i as f64 * 0.37).sin() * 40.0;
            m.set_engine_base_load(x * 2.0);
            m.add_engine_load(x);
            m.add_weapon_load(-x);
            m.add_system_load(x * 3.0);
            m.tick(1.0 / 60.0);
            assert_channels_in_range(&m);
        }
    }

    #[test]
    fn test_apply_engine_zeroes_channels() {
        let mut m = model();
        m.set_engine_base_load(20.0);
        m.add_weapon_load(30.0);
        let swap = EngineSpec {
            energy_capacity: 150.0,
            ..Default::default()
        };
        m.apply_engine(Some(&swap));
        assert_relative_eq!(m.max_load(), 150.0);
        assert_eq!(m.total_load(), 0.0);
    }

    #[test]
    fn test_poll_transition_edges() {
        let mut m = model();
        assert_eq!(m.poll_transition(), None);
        m.add_weapon_load(100.0);
        assert_eq!(m.poll_transition(), Some(OverloadTransition::Entered));
        assert_eq!(m.poll_transition(), None);
        m.tick(10.0);
        assert_eq!(m.poll_transition(), Some(OverloadTransition::Cleared));
    }

    #[test]
    fn test_warning_threshold() {
        let mut m = model();
        m.add_system_load(79.0);
        assert!(!m.is_warning());
        m.add_system_load(1.0);
        assert!(m.is_warning());
        assert_relative_eq!(m.load_percent(), 0.8);
    }
}
