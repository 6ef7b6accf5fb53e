#![warn(missing_docs)]
//! Hangar client presentation layer.
//!
//! Scene-switch transitions with cutscenes, a bootstrap slideshow, an
//! animated loading screen, world-anchored HP bars, lobbed weapon spawns and
//! weapon-slot HUD views. Each controller is a self-contained plugin driven by
//! the per-frame schedule; scene routing goes through [`scene::SceneRouting`].

#[cfg(feature = "native")]
pub mod cli;
pub mod hp_bar;
pub mod input;
pub mod loading;
pub mod math;
pub mod scene;
pub mod slideshow;
pub mod transition;
pub mod weapon_slot;
pub mod weapon_spawn;

use bevy::prelude::*;

use scene::SceneId;

/// Application-wide scene state, used for system scheduling.
///
/// Every playable scene maps to a [`SceneId`]; `Bootstrap` and `Loading` are
/// in-between scenes with no routing id.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Logo slideshow played once at startup.
    #[default]
    Bootstrap,
    /// Title screen.
    Title,
    /// Loading screen hosting the switch transition.
    Loading,
    /// Character selection.
    SelectCharacter,
    /// Regular stage.
    Stage,
    /// Boss stage.
    Boss,
}

impl GameState {
    /// Scene reached by routing to `id`, if any.
    pub fn from_scene(id: SceneId) -> Option<Self> {
        match id {
            SceneId::TITLE => Some(Self::Title),
            SceneId::SELECT_CHARACTER => Some(Self::SelectCharacter),
            SceneId::BOSS => Some(Self::Boss),
            SceneId::STAGE => Some(Self::Stage),
            _ => None,
        }
    }

    /// Routing id of this scene; [`SceneId::NONE`] for in-between scenes.
    pub fn scene_id(self) -> SceneId {
        match self {
            Self::Title => SceneId::TITLE,
            Self::SelectCharacter => SceneId::SELECT_CHARACTER,
            Self::Boss => SceneId::BOSS,
            Self::Stage => SceneId::STAGE,
            Self::Bootstrap | Self::Loading => SceneId::NONE,
        }
    }

    /// `true` for scenes with gameplay (HP bars, weapons, slot HUD).
    pub fn is_gameplay(self) -> bool {
        matches!(self, Self::Stage | Self::Boss)
    }
}

/// Run condition: current scene is a gameplay scene.
pub fn in_gameplay(state: Option<Res<State<GameState>>>) -> bool {
    state.is_some_and(|s| s.get().is_gameplay())
}

/// Whether the world inspector overlay is shown (Tab to toggle).
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InspectorState {
    /// Overlay hidden.
    #[default]
    Hidden,
    /// Overlay visible.
    Visible,
}

/// Scene and config overrides chosen at launch.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// First scene.
    pub start: GameState,
    /// Switch overlay config.
    pub transition: transition::TransitionConfig,
    /// Scene routing config.
    pub scene: scene::SceneConfig,
}

impl LaunchOptions {
    /// Reads the command line.
    #[cfg(feature = "native")]
    pub fn from_env() -> Self {
        use clap::Parser;
        cli::Cli::parse().into_launch_options()
    }

    /// Defaults; there is no command line on this target.
    #[cfg(not(feature = "native"))]
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Marker for the single camera used both for UI and world projection.
#[derive(Component, Reflect)]
pub struct WorldCamera;

/// Spawns the shared 2D camera.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d, WorldCamera));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_ids_round_trip_through_states() {
        for state in [
            GameState::Title,
            GameState::SelectCharacter,
            GameState::Stage,
            GameState::Boss,
        ] {
            assert_eq!(GameState::from_scene(state.scene_id()), Some(state));
        }
    }

    #[test]
    fn in_between_scenes_have_no_id() {
        assert_eq!(GameState::Loading.scene_id(), SceneId::NONE);
        assert_eq!(GameState::Bootstrap.scene_id(), SceneId::NONE);
        assert_eq!(GameState::from_scene(SceneId::NONE), None);
        assert_eq!(GameState::from_scene(SceneId(42)), None);
    }
}
