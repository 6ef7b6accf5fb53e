//! Bootstrap slideshow played before the title screen.
//!
//! Each slide holds, then cross-fades into the next. After the last hold an
//! overlay fades to opaque (or, without one, the last slide fades out) and
//! the title scene takes over. Runs on unscaled time.

mod entities;
mod systems;

pub use entities::{SlideImage, SlideOverlay, SlidePhase, Slideshow};

use bevy::prelude::*;

use crate::GameState;

/// Per-plugin configuration for the bootstrap slideshow.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct SlideshowConfig {
    /// Time each slide stays fully visible (seconds).
    pub hold_time: f32,
    /// Cross-fade between consecutive slides (seconds).
    pub cross_fade_time: f32,
    /// Final fade before switching to the title (seconds).
    pub end_delay_time: f32,
    /// Fade a black overlay in at the end instead of fading the last slide out.
    pub use_overlay: bool,
    /// Slides in order; one color per slide.
    pub slides: Vec<Color>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            hold_time: 0.5,
            cross_fade_time: 0.6,
            end_delay_time: 0.8,
            use_overlay: true,
            slides: vec![
                Color::srgb(0.9, 0.9, 0.9),
                Color::srgb(0.2, 0.5, 0.8),
                Color::srgb(0.8, 0.4, 0.2),
            ],
        }
    }
}

/// Logo slideshow for [`GameState::Bootstrap`].
pub struct SlideshowPlugin(pub SlideshowConfig);

impl Plugin for SlideshowPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SlideshowConfig>()
            .insert_resource(self.0.clone())
            .add_systems(OnEnter(GameState::Bootstrap), systems::spawn_slideshow)
            .add_systems(OnExit(GameState::Bootstrap), systems::remove_slideshow)
            .add_systems(
                Update,
                systems::run_slideshow.run_if(in_state(GameState::Bootstrap)),
            );
    }
}
