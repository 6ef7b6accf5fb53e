//! World-anchored HP bars.
//!
//! A UI bar follows its target's projected position, fills by HP ratio, and
//! blinks a warning overlay when HP drops under a threshold. Targets without
//! [`Health`] fall back to the bar's own HP values.

mod entities;
mod systems;

pub use entities::{Health, HpBar, HpFill, HpWarning, WarningBlink, hp_ratio};

use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::{GameState, in_gameplay};

/// Per-plugin configuration for HP bars.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct HpBarConfig {
    /// HP ratio under which the warning overlay starts blinking.
    pub warning_percent: f32,
    /// Blink frequency (Hz).
    pub blink_hz: f32,
    /// Warning alpha at the blink trough.
    pub min_warn_alpha: f32,
    /// Warning alpha at the blink peak.
    pub max_warn_alpha: f32,
    /// Per-frame smoothing factor towards the target alpha.
    pub alpha_smoothing: f32,
    /// Bar size in logical pixels.
    pub bar_size: Vec2,
    /// HP removed / restored per H / J key press.
    pub debug_hp_step: i32,
}

impl Default for HpBarConfig {
    fn default() -> Self {
        Self {
            warning_percent: 0.2,
            blink_hz: 0.5,
            min_warn_alpha: 0.15,
            max_warn_alpha: 1.0,
            alpha_smoothing: 0.2,
            bar_size: Vec2::new(80.0, 10.0),
            debug_hp_step: 10,
        }
    }
}

/// HP bars for gameplay actors.
pub struct HpBarPlugin(pub HpBarConfig);

impl Plugin for HpBarPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HpBarConfig>()
            .register_type::<Health>()
            .register_type::<HpBar>()
            .insert_resource(self.0.clone())
            .add_systems(OnEnter(GameState::Stage), systems::spawn_combatants)
            .add_systems(OnEnter(GameState::Boss), systems::spawn_combatants)
            .add_systems(Update, systems::adjust_health.run_if(in_gameplay))
            .add_systems(
                PostUpdate,
                systems::update_hp_bars
                    .after(TransformSystems::Propagate)
                    .run_if(in_gameplay),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::systems::Combatant;

    fn cfg() -> HpBarConfig {
        HpBarConfig {
            alpha_smoothing: 1.0,
            ..default()
        }
    }

    // ── hp_ratio ────────────────────────────────────────────────────

    #[test]
    fn ratio_of_full_health_is_one() {
        assert_eq!(hp_ratio(100, 100), 1.0);
    }

    #[test]
    fn ratio_clamps_overheal_and_negative() {
        assert_eq!(hp_ratio(150, 100), 1.0);
        assert_eq!(hp_ratio(-5, 100), 0.0);
    }

    #[test]
    fn non_positive_max_is_treated_as_one() {
        assert_eq!(hp_ratio(1, 0), 1.0);
        assert_eq!(hp_ratio(0, -3), 0.0);
    }

    #[test]
    fn set_hp_clamps_into_range() {
        let mut bar = HpBar::new(Entity::PLACEHOLDER);
        bar.set_hp(250, 0);
        assert_eq!(bar.fallback, Health { current: 1, max: 1 });
        bar.set_hp(-4, 50);
        assert_eq!(bar.fallback, Health { current: 0, max: 50 });
    }

    #[test]
    fn damage_never_goes_below_zero() {
        let mut hp = Health::full(30);
        hp.apply_delta(-50);
        assert_eq!(hp.current, 0);
        hp.apply_delta(100);
        assert_eq!(hp.current, 30);
    }

    // ── warning blink ───────────────────────────────────────────────

    #[test]
    fn healthy_bar_shows_no_warning() {
        let mut blink = WarningBlink::default();
        assert_eq!(blink.step(0.8, 0.1, &cfg()), 0.0);
    }

    #[test]
    fn low_health_warning_stays_in_configured_band() {
        let cfg = cfg();
        let mut blink = WarningBlink::default();
        for _ in 0..200 {
            let a = blink.step(0.0, 0.05, &cfg);
            assert!(a >= cfg.min_warn_alpha - 1e-6 && a <= cfg.max_warn_alpha + 1e-6);
        }
    }

    #[test]
    fn warning_decays_after_recovery() {
        let cfg = HpBarConfig {
            alpha_smoothing: 0.5,
            ..default()
        };
        let mut blink = WarningBlink::default();
        for _ in 0..20 {
            blink.step(0.0, 0.05, &cfg);
        }
        let lit = blink.alpha();
        assert!(lit > 0.0);
        let dimmer = blink.step(1.0, 0.05, &cfg);
        assert!(dimmer < lit);
        assert_eq!(blink.phase(), 0.0);
    }

    #[test]
    fn blink_phase_wraps() {
        let mut blink = WarningBlink::default();
        for _ in 0..100 {
            blink.step(0.05, 0.3, &cfg());
            assert!((0.0..1.0).contains(&blink.phase()));
        }
    }

    // ── debug keys ──────────────────────────────────────────────────

    #[test]
    fn damage_key_hits_health_and_fallback_bars() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(HpBarConfig::default())
            .add_systems(Update, systems::adjust_health);

        let player = app.world_mut().spawn((Combatant, Health::full(100))).id();
        let companion = app.world_mut().spawn(Combatant).id();
        let mut companion_bar = HpBar::new(companion);
        companion_bar.set_hp(60, 100);
        let player_bar = app.world_mut().spawn(HpBar::new(player)).id();
        let companion_bar = app.world_mut().spawn(companion_bar).id();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyH);
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Health>(player), Some(&Health { current: 90, max: 100 }));
        assert_eq!(
            world.get::<HpBar>(companion_bar).map(|bar| bar.fallback),
            Some(Health { current: 50, max: 100 })
        );
        // Bars over a target with Health leave their fallback alone.
        assert_eq!(
            world.get::<HpBar>(player_bar).map(|bar| bar.fallback),
            Some(Health::full(100))
        );
    }
}
