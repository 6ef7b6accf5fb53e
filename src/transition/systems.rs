use bevy::prelude::*;

use super::TransitionConfig;
use super::entities::{
    CutImage, Illustration, IllustrationChoice, LastFrame, SwitchButtonIcon, SwitchingText,
    TickInput, TransitionSequencer,
};
use crate::GameState;
use crate::input::ConfirmInput;
use crate::loading::LoadingText;
use crate::math;
use crate::scene::{SceneRouter, SceneRouting};

/// Resets the sequencer and spawns the overlay layers for this loading screen.
///
/// Prompt layers start transparent, every cut starts hidden, and the
/// illustration is picked from the route.
pub fn spawn_transition_ui(
    mut commands: Commands,
    cfg: Res<TransitionConfig>,
    routing: Res<SceneRouting>,
    mut seq: ResMut<TransitionSequencer>,
    mut last: ResMut<LastFrame>,
) {
    *seq = TransitionSequencer::default();
    *last = LastFrame::default();

    let choice =
        IllustrationChoice::for_route(routing.next_scene_id(), routing.came_from_scene_id());
    let (illustration_color, illustration_visibility) = match choice {
        IllustrationChoice::Default => (cfg.default_illustration, Visibility::Inherited),
        IllustrationChoice::Boss => (cfg.boss_illustration, Visibility::Inherited),
        IllustrationChoice::Hidden => (Color::NONE, Visibility::Hidden),
    };

    let full_screen = Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    };

    commands
        .spawn((
            Name::new("SwitchOverlay"),
            DespawnOnExit(GameState::Loading),
            // Behind the loading spinner and text.
            GlobalZIndex(-1),
            full_screen.clone(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("Illustration"),
                Illustration,
                ImageNode::default().with_color(illustration_color.with_alpha(1.0)),
                illustration_visibility,
                full_screen.clone(),
            ));

            for index in 0..cfg.cut_count {
                // Hue steps so consecutive cuts are distinguishable.
                let hue = (index as f32 * 37.0) % 360.0;
                parent.spawn((
                    Name::new(format!("Cut{index}")),
                    CutImage { index },
                    ImageNode::default().with_color(Color::hsl(hue, 0.45, 0.35)),
                    Visibility::Hidden,
                    full_screen.clone(),
                ));
            }

            parent
                .spawn(Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(48.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(12.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Name::new("SwitchButtonIcon"),
                        SwitchButtonIcon,
                        ImageNode::default().with_color(Color::WHITE.with_alpha(0.0)),
                        Node {
                            width: Val::Px(32.0),
                            height: Val::Px(32.0),
                            ..default()
                        },
                    ));
                    row.spawn((
                        Name::new("SwitchingText"),
                        SwitchingText,
                        Text::new(cfg.prompt.clone()),
                        TextColor(Color::WHITE.with_alpha(0.0)),
                    ));
                });
        });
}

/// Warns about prompt layers that are missing after spawn.
pub fn validate_bindings(
    icons: Query<(), With<SwitchButtonIcon>>,
    prompts: Query<(), With<SwitchingText>>,
) {
    if icons.is_empty() {
        warn!("Switch overlay: button icon not bound");
    }
    if prompts.is_empty() {
        warn!("Switch overlay: switching text not bound, overlay disabled");
    }
}

/// Steps the sequencer on unscaled time and commits the switch when asked.
pub fn tick_transition(
    time: Res<Time<Real>>,
    cfg: Res<TransitionConfig>,
    confirm: ConfirmInput,
    prompts: Query<(), With<SwitchingText>>,
    mut routing: ResMut<SceneRouting>,
    mut seq: ResMut<TransitionSequencer>,
    mut last: ResMut<LastFrame>,
) {
    last.0 = default();
    if prompts.is_empty() {
        return;
    }

    let input = TickInput {
        delta_secs: time.delta_secs(),
        scene_load_ready: routing.is_scene_load_ready(),
        next_scene: routing.next_scene_id(),
        came_from: routing.came_from_scene_id(),
        confirm_held: confirm.held(),
    };
    let (next, frame) = seq.step(&cfg, &input);

    if next.state() != seq.state() {
        info!("Switch overlay {:?} -> {:?}", seq.state(), next.state());
    }
    if let Some(index) = frame.reveal_cut {
        debug!("Revealing cut {index}");
    }
    if frame.commit {
        routing.commit_scene_switch();
    }

    *seq = next;
    last.0 = frame;
}

/// Writes the latest frame to whichever layers exist. Missing layers are skipped.
#[allow(clippy::type_complexity)]
pub fn apply_transition_frame(
    last: Res<LastFrame>,
    mut icons: Query<&mut ImageNode, (With<SwitchButtonIcon>, Without<Illustration>)>,
    mut illustrations: Query<
        (&mut ImageNode, &mut Visibility),
        (With<Illustration>, Without<SwitchButtonIcon>),
    >,
    mut prompts: Query<&mut TextColor, (With<SwitchingText>, Without<LoadingText>)>,
    mut loading_texts: Query<&mut TextColor, (With<LoadingText>, Without<SwitchingText>)>,
    mut cuts: Query<(&CutImage, &mut Visibility), Without<Illustration>>,
) {
    let frame = last.0;

    if let Some(a) = frame.layer_alpha {
        let a = math::clamp01(a);
        for mut icon in &mut icons {
            icon.color.set_alpha(a);
        }
        for mut color in &mut prompts {
            color.0.set_alpha(a);
        }
    }

    for (mut image, mut visibility) in &mut illustrations {
        if let Some(a) = frame.illustration_alpha() {
            image.color.set_alpha(math::clamp01(a));
        }
        if frame.hide_illustration {
            *visibility = Visibility::Hidden;
        }
    }

    if let Some(a) = frame.loading_text_alpha {
        for mut color in &mut loading_texts {
            color.0.set_alpha(math::clamp01(a));
        }
    }

    if let Some(index) = frame.reveal_cut {
        for (cut, mut visibility) in &mut cuts {
            if cut.index == index {
                *visibility = Visibility::Inherited;
            }
        }
    }
}
