use bevy::prelude::*;

use super::SceneConfig;
use super::entities::{LoadJob, SceneCard, SceneRouter, SceneRouting};
use crate::GameState;
use crate::input::ConfirmInput;

/// Starts the simulated load when the loading screen opens.
pub fn start_load_job(mut commands: Commands, cfg: Res<SceneConfig>, routing: Res<SceneRouting>) {
    info!(
        "Loading scene {:?} (from {:?})",
        routing.next_scene_id(),
        routing.came_from_scene_id()
    );
    commands.insert_resource(LoadJob(Timer::from_seconds(
        cfg.simulated_load_secs.max(0.0),
        TimerMode::Once,
    )));
}

pub fn finish_load_job(mut commands: Commands) {
    commands.remove_resource::<LoadJob>();
}

/// Advances the load timer on unscaled time; flags completion once.
pub fn tick_load_job(
    time: Res<Time<Real>>,
    job: Option<ResMut<LoadJob>>,
    mut routing: ResMut<SceneRouting>,
) {
    let Some(mut job) = job else { return };
    job.0.tick(time.delta());
    if job.0.just_finished() && !routing.is_scene_load_ready() {
        routing.mark_load_complete();
        info!("Scene {:?} load complete", routing.next_scene_id());
    }
}

/// Turns a committed switch into a state change.
pub fn apply_pending_switch(
    mut routing: ResMut<SceneRouting>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(id) = routing.take_pending_switch() else {
        return;
    };
    match GameState::from_scene(id) {
        Some(state) => {
            info!("Switching to {state:?}");
            next.set(state);
        }
        None => warn!("No scene registered for {id:?}, switch ignored"),
    }
}

/// Heads to the next scene through the loading screen on confirm.
pub fn advance_on_confirm(
    confirm: ConfirmInput,
    state: Res<State<GameState>>,
    mut routing: ResMut<SceneRouting>,
    mut next: ResMut<NextState<GameState>>,
) {
    if !confirm.just_pressed() {
        return;
    }
    let current = *state.get();
    let Some(target) = super::next_route(current) else {
        return;
    };
    routing.set_next_scene(target, current.scene_id());
    next.set(GameState::Loading);
}

/// Caption naming the current scene, despawned when the scene exits.
pub fn spawn_scene_card(mut commands: Commands, state: Res<State<GameState>>) {
    let current = *state.get();
    commands.spawn((
        Name::new("SceneCard"),
        SceneCard,
        DespawnOnExit(current),
        Text::new(format!("{current:?}  (Enter)")),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
    ));
}
