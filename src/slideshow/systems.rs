use bevy::prelude::*;

use super::SlideshowConfig;
use super::entities::{SlideImage, SlideOverlay, Slideshow};
use crate::GameState;

/// Spawns one full-screen image per slide plus the optional overlay.
pub fn spawn_slideshow(mut commands: Commands, cfg: Res<SlideshowConfig>) {
    let show = Slideshow::new(cfg.slides.len(), cfg.use_overlay);

    let full_screen = Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    };

    commands
        .spawn((
            Name::new("Slideshow"),
            DespawnOnExit(GameState::Bootstrap),
            full_screen.clone(),
        ))
        .with_children(|parent| {
            for (index, (color, alpha)) in cfg.slides.iter().zip(show.alphas()).enumerate() {
                parent.spawn((
                    Name::new(format!("Slide{index}")),
                    SlideImage { index },
                    ImageNode::default().with_color(color.with_alpha(*alpha)),
                    full_screen.clone(),
                ));
            }
            if let Some(alpha) = show.overlay() {
                parent.spawn((
                    Name::new("SlideOverlay"),
                    SlideOverlay,
                    ImageNode::default().with_color(Color::BLACK.with_alpha(alpha)),
                    full_screen.clone(),
                ));
            }
        });

    commands.insert_resource(show);
}

pub fn remove_slideshow(mut commands: Commands) {
    commands.remove_resource::<Slideshow>();
}

/// Steps the slideshow and pushes alphas to the images; moves to the title when done.
#[allow(clippy::type_complexity)]
pub fn run_slideshow(
    time: Res<Time<Real>>,
    cfg: Res<SlideshowConfig>,
    show: Option<ResMut<Slideshow>>,
    mut slides: Query<(&SlideImage, &mut ImageNode), Without<SlideOverlay>>,
    mut overlays: Query<&mut ImageNode, (With<SlideOverlay>, Without<SlideImage>)>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(mut show) = show else { return };

    let finished = show.step(&cfg, time.delta_secs());

    for (slide, mut image) in &mut slides {
        if let Some(alpha) = show.alphas().get(slide.index) {
            image.color.set_alpha(*alpha);
        }
    }
    if let Some(alpha) = show.overlay() {
        for mut image in &mut overlays {
            image.color.set_alpha(alpha);
        }
    }

    if finished {
        info!("ChangeTitleScene");
        next.set(GameState::Title);
    }
}
