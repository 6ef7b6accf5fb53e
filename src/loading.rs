//! Loading screen: spinning indicator and an ellipsis caption.
//!
//! Animates while the next scene is loading; once the router reports ready
//! the spinner and mascot hide and the caption settles on a completion text.
//! The caption doubles as the loading-text layer faded by
//! [`crate::transition`].

mod entities;
mod systems;

pub use entities::{LoadingFrames, LoadingIcon, LoadingSpinner, LoadingText, LoadingTicker};

use bevy::prelude::*;

use crate::GameState;

/// Per-plugin configuration for the loading screen.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct LoadingConfig {
    /// Spinner speed, clockwise (degrees per second).
    pub rotate_degrees_per_sec: f32,
    /// Time between caption frames (seconds).
    pub char_interval: f32,
    /// Caption typed out one character per frame.
    pub base_text: String,
    /// Caption once loading finished.
    pub complete_text: String,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            rotate_degrees_per_sec: 180.0,
            char_interval: 0.1,
            base_text: "Loading...".into(),
            complete_text: "Load Complete".into(),
        }
    }
}

/// Every prefix of `base`, from empty to complete (`len + 1` frames).
///
/// # Examples
/// ```
/// # use hangar_client::loading::ellipsis_frames;
/// assert_eq!(ellipsis_frames("ab"), vec!["", "a", "ab"]);
/// ```
pub fn ellipsis_frames(base: &str) -> Vec<String> {
    std::iter::once(String::new())
        .chain(
            base.char_indices()
                .map(|(i, c)| base[..i + c.len_utf8()].to_string()),
        )
        .collect()
}

/// Loading-screen spinner and caption animation.
pub struct LoadingPlugin(pub LoadingConfig);

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LoadingConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(LoadingFrames(ellipsis_frames(&self.0.base_text)))
            .init_resource::<LoadingTicker>()
            .add_systems(OnEnter(GameState::Loading), systems::spawn_loading_ui)
            .add_systems(
                Update,
                systems::animate_loading.run_if(in_state(GameState::Loading)),
            );
    }
}
