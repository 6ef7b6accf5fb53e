//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` inputs, making them straightforward to unit-test.

use bevy::prelude::Vec3;

/// Smallest duration used as a divisor. Zero or negative durations complete
/// on the first tick instead of dividing by zero.
pub const MIN_DURATION: f32 = 0.0001;

/// Clamps `x` into `[0, 1]`.
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Normalized progress of `elapsed` over `duration`, clamped to `[0, 1]`.
///
/// # Examples
/// ```
/// # use hangar_client::math::progress;
/// assert_eq!(progress(0.2, 0.4), 0.5);
/// assert_eq!(progress(1.0, 0.4), 1.0);
/// assert_eq!(progress(0.0, 0.0), 0.0);
/// assert_eq!(progress(0.016, 0.0), 1.0);
/// ```
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    clamp01(elapsed / duration.max(MIN_DURATION))
}

/// Hermite smoothstep on `[0, 1]`: `p * p * (3 - 2p)`.
///
/// Input is clamped first, so the result always stays in `[0, 1]`.
pub fn smoothstep01(x: f32) -> f32 {
    let x = clamp01(x);
    x * x * (3.0 - 2.0 * x)
}

/// Linear interpolation between `a` and `b`. `t` is not clamped.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Moves `current` a fraction `factor` of the way towards `target`.
///
/// Frame-rate dependent exponential smoothing, used for UI alpha easing.
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Position along a lobbed arc from `from` to `to` at normalized time `t`.
///
/// X/Z interpolate linearly; Y rides `to.y` plus a half-sine bump of
/// `height`, so the arc starts and ends on the target's ground level.
pub fn lob_position(from: Vec3, to: Vec3, t: f32, height: f32) -> Vec3 {
    Vec3::new(
        lerp(from.x, to.x, t),
        to.y + (t * std::f32::consts::PI).sin() * height,
        lerp(from.z, to.z, t),
    )
}

/// Sinusoidal blink in `[0, 1]` for a phase in `[0, 1)`.
pub fn blink01(phase01: f32) -> f32 {
    0.5 + 0.5 * (std::f32::consts::TAU * phase01).sin()
}
