//! Scene routing and the simulated scene loader.
//!
//! [`SceneRouting`] replaces a process-wide scene manager: controllers read it
//! through the [`SceneRouter`] trait and request switches with
//! [`SceneRouter::commit_scene_switch`]. Playable scenes are placeholder cards
//! that route onward through the loading screen on confirm.

mod entities;
mod systems;

pub use entities::{LoadJob, SceneCard, SceneId, SceneRouter, SceneRouting};

use bevy::prelude::*;

use crate::GameState;

/// Per-plugin configuration for scene routing.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct SceneConfig {
    /// How long the loading screen pretends to load (seconds).
    pub simulated_load_secs: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            simulated_load_secs: 1.5,
        }
    }
}

/// Scene the player moves on to from `from`, if the scene routes anywhere.
///
/// Title → character select → stage → boss → title.
pub fn next_route(from: GameState) -> Option<SceneId> {
    match from {
        GameState::Title => Some(SceneId::SELECT_CHARACTER),
        GameState::SelectCharacter => Some(SceneId::STAGE),
        GameState::Stage => Some(SceneId::BOSS),
        GameState::Boss => Some(SceneId::TITLE),
        GameState::Bootstrap | GameState::Loading => None,
    }
}

/// Scene routing, placeholder scene cards, and the simulated loader.
pub struct ScenePlugin(pub SceneConfig);

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SceneConfig>()
            .register_type::<SceneRouting>()
            .insert_resource(self.0.clone())
            .init_resource::<SceneRouting>()
            .add_systems(OnEnter(GameState::Loading), systems::start_load_job)
            .add_systems(OnExit(GameState::Loading), systems::finish_load_job)
            .add_systems(
                Update,
                systems::tick_load_job.run_if(in_state(GameState::Loading)),
            )
            .add_systems(Update, systems::apply_pending_switch)
            .add_systems(
                Update,
                systems::advance_on_confirm.run_if(
                    in_state(GameState::Title)
                        .or(in_state(GameState::SelectCharacter))
                        .or(in_state(GameState::Stage))
                        .or(in_state(GameState::Boss)),
                ),
            );

        for state in [
            GameState::Title,
            GameState::SelectCharacter,
            GameState::Stage,
            GameState::Boss,
        ] {
            app.add_systems(OnEnter(state), systems::spawn_scene_card);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::input::ActivePad;

    fn headless_app(load_secs: f32) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ActivePad>()
            .insert_state(GameState::Loading)
            .add_plugins(ScenePlugin(SceneConfig {
                simulated_load_secs: load_secs,
            }));
        app
    }

    #[test]
    fn routes_cycle_back_to_title() {
        assert_eq!(next_route(GameState::Title), Some(SceneId::SELECT_CHARACTER));
        assert_eq!(next_route(GameState::Boss), Some(SceneId::TITLE));
        assert_eq!(next_route(GameState::Loading), None);
    }

    #[test]
    fn zero_length_load_completes_on_first_frames() {
        let mut app = headless_app(0.0);
        app.world_mut()
            .resource_mut::<SceneRouting>()
            .set_next_scene(SceneId::STAGE, SceneId::SELECT_CHARACTER);
        app.update();
        app.update();
        assert!(app.world().resource::<SceneRouting>().is_scene_load_ready());
    }

    #[test]
    fn committed_switch_changes_scene() {
        let mut app = headless_app(0.0);
        app.world_mut()
            .resource_mut::<SceneRouting>()
            .set_next_scene(SceneId::BOSS, SceneId::STAGE);
        app.update();
        app.world_mut()
            .resource_mut::<SceneRouting>()
            .commit_scene_switch();
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Boss
        );
    }
}
