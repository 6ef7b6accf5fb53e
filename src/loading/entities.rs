use bevy::prelude::*;

/// Rotating load indicator.
#[derive(Component, Reflect)]
pub struct LoadingSpinner;

/// Mascot shown next to the spinner while loading.
#[derive(Component, Reflect)]
pub struct LoadingIcon;

/// Caption cycling through [`LoadingFrames`].
#[derive(Component, Reflect)]
pub struct LoadingText;

/// Precomputed caption frames.
#[derive(Resource, Debug)]
pub struct LoadingFrames(pub Vec<String>);

/// Caption frame timer.
///
/// The countdown carries its remainder, so long frames do not drift.
#[derive(Resource, Default, Debug, Reflect)]
pub struct LoadingTicker {
    timer: f32,
    index: usize,
}

impl LoadingTicker {
    /// Counts down by `dt`; on expiry moves to the next frame (wrapping) and
    /// returns its index.
    pub fn step(&mut self, dt: f32, interval: f32, frame_count: usize) -> Option<usize> {
        if frame_count == 0 {
            return None;
        }
        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        self.timer += interval;
        self.index = (self.index + 1) % frame_count;
        Some(self.index)
    }
}
