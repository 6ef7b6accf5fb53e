use bevy::prelude::*;

use super::HpBarConfig;
use super::entities::{Health, HpBar, HpFill, HpWarning};
use crate::{GameState, WorldCamera};

/// Marker for actors that carry an HP bar.
#[derive(Component)]
pub struct Combatant;

/// Spawns the player, a drone companion, and the boss in the boss scene, each
/// with an HP bar. The companion has no [`Health`]; its bar keeps the HP.
pub fn spawn_combatants(
    mut commands: Commands,
    state: Res<State<GameState>>,
    cfg: Res<HpBarConfig>,
) {
    let scene = *state.get();
    let mut actors = vec![(
        "Player",
        Vec3::new(-160.0, -60.0, 0.0),
        Color::srgb(0.3, 0.8, 0.5),
        Some(Health::full(100)),
    )];
    actors.push((
        "Companion",
        Vec3::new(-240.0, 20.0, 0.0),
        Color::srgb(0.4, 0.6, 0.9),
        None,
    ));
    if scene == GameState::Boss {
        actors.push((
            "Boss",
            Vec3::new(180.0, -40.0, 0.0),
            Color::srgb(0.8, 0.2, 0.25),
            Some(Health::full(400)),
        ));
    }

    for (name, pos, color, health) in actors {
        let mut actor = commands.spawn((
            Name::new(name),
            Combatant,
            Sprite::from_color(color, Vec2::splat(48.0)),
            Transform::from_translation(pos),
            DespawnOnExit(scene),
        ));
        if let Some(health) = health {
            actor.insert(health);
        }
        let target = actor.id();

        let mut bar = HpBar::new(target);
        if health.is_none() {
            bar.set_hp(60, 100);
        }

        commands
            .spawn((
                Name::new(format!("{name}HpBar")),
                bar,
                DespawnOnExit(scene),
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(cfg.bar_size.x),
                    height: Val::Px(cfg.bar_size.y),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ))
            .with_children(|bar| {
                bar.spawn((
                    HpFill,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.85, 0.2, 0.2)),
                ));
                bar.spawn((
                    HpWarning::default(),
                    ImageNode::default().with_color(Color::srgba(1.0, 0.9, 0.2, 0.0)),
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                ));
            });
    }
}

/// H damages and J heals every combatant; bars of targets without
/// [`Health`] take the change on their own HP.
pub fn adjust_health(
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<HpBarConfig>,
    mut actors: Query<&mut Health, With<Combatant>>,
    mut bars: Query<&mut HpBar>,
) {
    let delta = if keys.just_pressed(KeyCode::KeyH) {
        -cfg.debug_hp_step
    } else if keys.just_pressed(KeyCode::KeyJ) {
        cfg.debug_hp_step
    } else {
        return;
    };
    for mut health in &mut actors {
        health.apply_delta(delta);
    }
    for mut bar in &mut bars {
        if actors.contains(bar.target) {
            continue;
        }
        let Health { current, max } = bar.fallback;
        bar.set_hp(current + delta, max);
    }
}

/// Fill, screen position, then warning, for every bar with a live target.
#[allow(clippy::type_complexity)]
pub fn update_hp_bars(
    time: Res<Time<Real>>,
    cfg: Res<HpBarConfig>,
    cameras: Query<(&Camera, &GlobalTransform), With<WorldCamera>>,
    targets: Query<(&GlobalTransform, Option<&Health>)>,
    mut bars: Query<(&HpBar, &mut Node), (Without<HpFill>, Without<HpWarning>)>,
    mut fills: Query<(&ChildOf, &mut Node), (With<HpFill>, Without<HpBar>)>,
    mut warnings: Query<(&ChildOf, &mut HpWarning, &mut ImageNode)>,
) {
    let Ok((camera, camera_tf)) = cameras.single() else {
        return;
    };
    let dt = time.delta_secs();

    let ratio_of = |bar: &HpBar| {
        targets
            .get(bar.target)
            .ok()
            .map(|(_, health)| health.unwrap_or(&bar.fallback).ratio())
    };

    for (child_of, mut fill) in &mut fills {
        if let Ok((bar, _)) = bars.get(child_of.parent())
            && let Some(ratio) = ratio_of(bar)
        {
            fill.width = Val::Percent(ratio * 100.0);
        }
    }

    for (bar, mut node) in &mut bars {
        let Ok((target_tf, _)) = targets.get(bar.target) else {
            continue;
        };
        // Behind the camera: keep the last position.
        let world = target_tf.translation() + bar.world_offset;
        if let Ok(screen) = camera.world_to_viewport(camera_tf, world) {
            node.left = Val::Px(screen.x - cfg.bar_size.x / 2.0 + bar.screen_offset.x);
            node.top = Val::Px(screen.y - bar.screen_offset.y);
        }
    }

    for (child_of, mut warning, mut image) in &mut warnings {
        if let Ok((bar, _)) = bars.get(child_of.parent())
            && let Some(ratio) = ratio_of(bar)
        {
            let alpha = warning.0.step(ratio, dt, &cfg);
            image.color.set_alpha(alpha);
        }
    }
}
