use bevy::prelude::*;

use super::HpBarConfig;
use crate::math;

/// Hit points of an actor.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub struct Health {
    /// Current HP.
    pub current: i32,
    /// Maximum HP.
    pub max: i32,
}

impl Health {
    /// Full health at `max`.
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Fill ratio in `[0, 1]`.
    pub fn ratio(&self) -> f32 {
        hp_ratio(self.current, self.max)
    }

    /// Adds `delta` (negative for damage), clamped to `[0, max]`.
    pub fn apply_delta(&mut self, delta: i32) {
        self.current = (self.current + delta).clamp(0, self.max.max(0));
    }
}

/// HP fill ratio. A non-positive `max` counts as 1.
pub fn hp_ratio(current: i32, max: i32) -> f32 {
    let max = if max <= 0 { 1 } else { max };
    let current = current.clamp(0, max);
    math::clamp01(current as f32 / max as f32)
}

/// UI bar tracking a world entity.
#[derive(Component, Clone, Debug, Reflect)]
pub struct HpBar {
    /// Entity followed on screen.
    pub target: Entity,
    /// World-space offset above the target.
    pub world_offset: Vec3,
    /// Extra offset in logical pixels (y up).
    pub screen_offset: Vec2,
    /// HP used when the target has no [`Health`].
    pub fallback: Health,
}

impl HpBar {
    /// Bar over `target` with the default head offset.
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            world_offset: Vec3::new(0.0, 40.0, 0.0),
            screen_offset: Vec2::ZERO,
            fallback: Health::full(100),
        }
    }

    /// Sets the fallback HP; `max` is at least 1 and `current` is clamped.
    pub fn set_hp(&mut self, current: i32, max: i32) {
        let max = max.max(1);
        self.fallback = Health {
            current: current.clamp(0, max),
            max,
        };
    }
}

/// Fill child of an [`HpBar`]; width follows the ratio.
#[derive(Component, Reflect)]
pub struct HpFill;

/// Warning overlay child of an [`HpBar`].
#[derive(Component, Default, Reflect)]
pub struct HpWarning(pub WarningBlink);

/// Sine blink with exponential smoothing for the low-HP warning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct WarningBlink {
    phase: f32,
    alpha: f32,
}

impl WarningBlink {
    /// Blink phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Current overlay alpha.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Advances by `dt` at HP `ratio` and returns the new alpha in `[0, 1]`.
    ///
    /// Intensity scales with how far under the threshold the ratio is.
    pub fn step(&mut self, ratio: f32, dt: f32, cfg: &HpBarConfig) -> f32 {
        let threshold = math::clamp01(cfg.warning_percent);
        let shortage = (threshold - ratio).max(0.0);
        let base = if threshold > 0.0 {
            shortage / threshold
        } else {
            0.0
        };

        let target = if base > 0.0 {
            self.phase += dt * cfg.blink_hz;
            self.phase -= self.phase.floor();
            let warn = math::clamp01(base * math::blink01(self.phase));
            math::lerp(cfg.min_warn_alpha, cfg.max_warn_alpha, warn)
        } else {
            self.phase = 0.0;
            0.0
        };

        self.alpha = math::clamp01(math::approach(self.alpha, target, cfg.alpha_smoothing));
        self.alpha
    }
}
