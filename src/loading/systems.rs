use bevy::prelude::*;
use bevy::ui::UiTransform;

use super::LoadingConfig;
use super::entities::{LoadingFrames, LoadingIcon, LoadingSpinner, LoadingText, LoadingTicker};
use crate::GameState;
use crate::scene::{SceneRouter, SceneRouting};

/// Spawns spinner, mascot and caption in the lower-right corner.
pub fn spawn_loading_ui(
    mut commands: Commands,
    frames: Res<LoadingFrames>,
    mut ticker: ResMut<LoadingTicker>,
) {
    *ticker = LoadingTicker::default();

    commands
        .spawn((
            Name::new("LoadingUi"),
            DespawnOnExit(GameState::Loading),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(32.0),
                bottom: Val::Px(32.0),
                align_items: AlignItems::Center,
                column_gap: Val::Px(10.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("LoadingIcon"),
                LoadingIcon,
                ImageNode::default().with_color(Color::srgb(0.95, 0.8, 0.3)),
                Node {
                    width: Val::Px(36.0),
                    height: Val::Px(36.0),
                    ..default()
                },
            ));
            parent.spawn((
                Name::new("LoadingSpinner"),
                LoadingSpinner,
                ImageNode::default().with_color(Color::srgb(0.4, 0.8, 1.0)),
                UiTransform::default(),
                Node {
                    width: Val::Px(28.0),
                    height: Val::Px(28.0),
                    ..default()
                },
            ));
            parent.spawn((
                Name::new("LoadingText"),
                LoadingText,
                Text::new(frames.0.first().cloned().unwrap_or_default()),
                TextColor(Color::WHITE),
                Node {
                    min_width: Val::Px(160.0),
                    ..default()
                },
            ));
        });
}

/// Spins and types while loading; settles once the router reports ready.
#[allow(clippy::type_complexity)]
pub fn animate_loading(
    time: Res<Time>,
    cfg: Res<LoadingConfig>,
    routing: Res<SceneRouting>,
    frames: Res<LoadingFrames>,
    mut ticker: ResMut<LoadingTicker>,
    mut spinners: Query<(&mut UiTransform, &mut Visibility), With<LoadingSpinner>>,
    mut icons: Query<&mut Visibility, (With<LoadingIcon>, Without<LoadingSpinner>)>,
    mut texts: Query<&mut Text, With<LoadingText>>,
) {
    let dt = time.delta_secs();

    if !routing.is_scene_load_ready() {
        let turn = Rot2::degrees(-cfg.rotate_degrees_per_sec * dt);
        for (mut transform, _) in &mut spinners {
            transform.rotation = transform.rotation * turn;
        }
        if let Some(index) = ticker.step(dt, cfg.char_interval, frames.0.len()) {
            for mut text in &mut texts {
                text.0.clone_from(&frames.0[index]);
            }
        }
        return;
    }

    for (_, mut visibility) in &mut spinners {
        *visibility = Visibility::Hidden;
    }
    for mut visibility in &mut icons {
        *visibility = Visibility::Hidden;
    }
    for mut text in &mut texts {
        if text.0 != cfg.complete_text {
            text.0.clone_from(&cfg.complete_text);
        }
    }
}
