//! Hangar client entry point.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use hangar_client::hp_bar::{HpBarConfig, HpBarPlugin};
use hangar_client::input::PadRoutingPlugin;
use hangar_client::loading::{LoadingConfig, LoadingPlugin};
use hangar_client::scene::ScenePlugin;
use hangar_client::slideshow::{SlideshowConfig, SlideshowPlugin};
use hangar_client::transition::TransitionPlugin;
use hangar_client::weapon_slot::{WeaponSlotConfig, WeaponSlotPlugin};
use hangar_client::weapon_spawn::{WeaponSpawnConfig, WeaponSpawnPlugin};
use hangar_client::{GameState, InspectorState, LaunchOptions, spawn_camera};

fn main() {
    let opts = LaunchOptions::from_env();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hangar".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .insert_state(opts.start)
    .init_state::<InspectorState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(PadRoutingPlugin)
    .add_plugins(ScenePlugin(opts.scene))
    .add_plugins(SlideshowPlugin(SlideshowConfig::default()))
    .add_plugins(LoadingPlugin(LoadingConfig::default()))
    .add_plugins(TransitionPlugin(opts.transition))
    .add_plugins(HpBarPlugin(HpBarConfig::default()))
    .add_plugins(WeaponSpawnPlugin(WeaponSpawnConfig::default()))
    .add_plugins(WeaponSlotPlugin(WeaponSlotConfig::default()))
    .add_systems(Startup, spawn_camera)
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(InspectorState::Visible)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<InspectorState>>,
    mut next: ResMut<NextState<InspectorState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            InspectorState::Hidden => InspectorState::Visible,
            InspectorState::Visible => InspectorState::Hidden,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
