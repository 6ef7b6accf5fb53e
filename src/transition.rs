//! Scene-switch overlay shown on the loading screen.
//!
//! Once the next scene reports ready, the prompt fades in, an optional
//! cutscene steps through its cuts (confirm or auto-play), the prompt fades
//! out, and the switch is committed through [`crate::scene::SceneRouter`].
//! Losing readiness at any point snaps the overlay back to hidden.

mod entities;
mod systems;

pub use entities::{
    CutImage, CutRange, Illustration, IllustrationChoice, SwitchButtonIcon, SwitchingText,
    TickInput, TransitionFrame, TransitionSequencer, TransitionState, has_cutscene, is_boss_path,
};

use bevy::prelude::*;

use crate::GameState;

/// Per-plugin configuration for the switch overlay.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct TransitionConfig {
    /// Prompt fade-in time (seconds). Non-positive completes instantly.
    pub fade_in_duration: f32,
    /// Prompt fade-out time (seconds). Non-positive completes instantly.
    pub fade_out_duration: f32,
    /// Delay between automatically revealed cuts (seconds).
    pub auto_play_delay: f32,
    /// Hold on the last cut until confirm instead of moving on.
    pub wait_at_last_cut: bool,
    /// Force a cutscene on every switch.
    pub test_mode: bool,
    /// Force the boss cut range.
    pub test_boss_stage: bool,
    /// Number of cut elements available.
    pub cut_count: usize,
    /// Tint of the regular illustration.
    pub default_illustration: Color,
    /// Tint of the boss illustration.
    pub boss_illustration: Color,
    /// Prompt caption.
    pub prompt: String,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_in_duration: 0.4,
            fade_out_duration: 0.4,
            auto_play_delay: 1.0,
            wait_at_last_cut: false,
            test_mode: false,
            test_boss_stage: false,
            cut_count: 8,
            default_illustration: Color::srgb(0.25, 0.35, 0.6),
            boss_illustration: Color::srgb(0.6, 0.15, 0.15),
            prompt: "Press Enter".into(),
        }
    }
}

/// Loading-screen switch overlay with cutscene playback.
pub struct TransitionPlugin(pub TransitionConfig);

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TransitionConfig>()
            .register_type::<TransitionSequencer>()
            .register_type::<CutImage>()
            .insert_resource(self.0.clone())
            .init_resource::<TransitionSequencer>()
            .init_resource::<entities::LastFrame>()
            .add_systems(
                OnEnter(GameState::Loading),
                (systems::spawn_transition_ui, systems::validate_bindings).chain(),
            )
            .add_systems(
                Update,
                (systems::tick_transition, systems::apply_transition_frame)
                    .chain()
                    .run_if(in_state(GameState::Loading)),
            );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::input::ActivePad;
    use crate::loading::LoadingText;
    use crate::scene::{SceneConfig, SceneId, ScenePlugin, SceneRouting};

    const DT: f32 = 0.1;

    fn cfg() -> TransitionConfig {
        TransitionConfig {
            cut_count: 10,
            ..default()
        }
    }

    fn input(next: SceneId, came_from: SceneId) -> TickInput {
        TickInput {
            delta_secs: DT,
            scene_load_ready: true,
            next_scene: next,
            came_from,
            confirm_held: false,
        }
    }

    /// Steps until `state` is reached, collecting every frame on the way.
    fn run_until(
        mut seq: TransitionSequencer,
        cfg: &TransitionConfig,
        input: &TickInput,
        state: TransitionState,
        frames: &mut Vec<TransitionFrame>,
    ) -> TransitionSequencer {
        for _ in 0..1000 {
            if seq.state() == state {
                return seq;
            }
            let (next, frame) = seq.step(cfg, input);
            frames.push(frame);
            seq = next;
        }
        panic!("never reached {state:?}");
    }

    // ── cut range ───────────────────────────────────────────────────

    #[test]
    fn boss_destination_selects_boss_range() {
        let r = CutRange::select(is_boss_path(SceneId::BOSS, false), 10);
        assert_eq!(r, CutRange { start: 3, end: 8 });
    }

    #[test]
    fn select_character_origin_uses_default_range() {
        let next = SceneId(5);
        assert!(has_cutscene(next, SceneId::SELECT_CHARACTER, false));
        let r = CutRange::select(is_boss_path(next, false), 10);
        assert_eq!(r, CutRange { start: 0, end: 3 });
    }

    #[test]
    fn short_cut_list_shrinks_range() {
        assert_eq!(CutRange::select(true, 5), CutRange { start: 3, end: 5 });
        assert_eq!(CutRange::select(true, 2), CutRange { start: 2, end: 2 });
        assert!(CutRange::select(false, 0).is_empty());
    }

    #[test]
    fn test_flags_force_cutscene_and_boss_range() {
        assert!(has_cutscene(SceneId::STAGE, SceneId::TITLE, true));
        assert!(!has_cutscene(SceneId::STAGE, SceneId::TITLE, false));
        assert!(is_boss_path(SceneId::STAGE, true));
    }

    #[test]
    fn illustration_prefers_select_character_origin() {
        assert_eq!(
            IllustrationChoice::for_route(SceneId::BOSS, SceneId::SELECT_CHARACTER),
            IllustrationChoice::Default
        );
        assert_eq!(
            IllustrationChoice::for_route(SceneId::BOSS, SceneId::STAGE),
            IllustrationChoice::Boss
        );
        assert_eq!(
            IllustrationChoice::for_route(SceneId::STAGE, SceneId::TITLE),
            IllustrationChoice::Hidden
        );
    }

    // ── state machine ───────────────────────────────────────────────

    #[test]
    fn plain_switch_runs_full_cycle_and_commits_once() {
        let cfg = cfg();
        let input = input(SceneId::STAGE, SceneId::TITLE);
        let mut seq = TransitionSequencer::default();
        let mut states = vec![seq.state()];
        let mut commits = 0;

        for _ in 0..40 {
            let (next, frame) = seq.step(&cfg, &input);
            seq = next;
            if frame.commit {
                commits += 1;
            }
            if states.last() != Some(&seq.state()) {
                states.push(seq.state());
            }
            if commits == 1 && seq.state() == TransitionState::Hidden {
                break;
            }
        }

        assert_eq!(commits, 1);
        assert_eq!(
            states,
            vec![
                TransitionState::Hidden,
                TransitionState::FadingIn,
                TransitionState::WaitingInput,
                TransitionState::FadingOut,
                TransitionState::Switching,
                TransitionState::Hidden,
            ]
        );
    }

    #[test]
    fn fade_in_completes_on_threshold_tick() {
        let cfg = cfg();
        let mut input = input(SceneId::STAGE, SceneId::TITLE);
        let (mut seq, _) = TransitionSequencer::default().step(&cfg, &input);
        assert_eq!(seq.state(), TransitionState::FadingIn);

        input.delta_secs = 0.25;
        let (next, frame) = seq.step(&cfg, &input);
        seq = next;
        assert_eq!(seq.state(), TransitionState::FadingIn);
        assert!(frame.layer_alpha.is_some_and(|a| a > 0.0 && a < 1.0));

        // 0.25 + 0.25 crosses 0.4 on this tick.
        let (seq, frame) = seq.step(&cfg, &input);
        assert_eq!(frame.layer_alpha, Some(1.0));
        assert_eq!(frame.illustration_alpha(), Some(0.0));
        assert_eq!(seq.state(), TransitionState::WaitingInput);
    }

    #[test]
    fn zero_durations_complete_instantly() {
        let cfg = TransitionConfig {
            fade_in_duration: 0.0,
            fade_out_duration: -1.0,
            ..cfg()
        };
        let input = input(SceneId::STAGE, SceneId::TITLE);
        let mut seq = TransitionSequencer::default();
        for expected in [
            TransitionState::FadingIn,
            TransitionState::WaitingInput,
            TransitionState::FadingOut,
            TransitionState::Switching,
            TransitionState::Hidden,
        ] {
            let (next, frame) = seq.step(&cfg, &input);
            seq = next;
            assert_eq!(seq.state(), expected);
            if let Some(a) = frame.layer_alpha {
                assert!((0.0..=1.0).contains(&a));
            }
        }
    }

    #[test]
    fn losing_readiness_hides_from_any_state() {
        let cfg = cfg();
        let ready = input(SceneId::BOSS, SceneId::STAGE);
        let not_ready = TickInput {
            scene_load_ready: false,
            ..ready
        };

        let mut seq = TransitionSequencer::default();
        for _ in 0..12 {
            let (next, _) = seq.step(&cfg, &ready);
            seq = next;
            let (hidden, frame) = seq.step(&cfg, &not_ready);
            assert_eq!(hidden.state(), TransitionState::Hidden);
            assert_eq!(frame.layer_alpha, Some(0.0));
            assert!(!frame.commit);
        }
    }

    #[test]
    fn boss_cutscene_auto_plays_then_switches() {
        let cfg = cfg();
        let input = input(SceneId::BOSS, SceneId::STAGE);
        let mut frames = Vec::new();
        let seq = run_until(
            TransitionSequencer::default(),
            &cfg,
            &input,
            TransitionState::WaitingInput,
            &mut frames,
        );
        assert!(frames.last().is_some_and(|f| f.hide_illustration));
        assert_eq!(seq.cut_range(), Some(CutRange::BOSS));
        assert_eq!(seq.cursor(), 3);

        frames.clear();
        let seq = run_until(seq, &cfg, &input, TransitionState::Hidden, &mut frames);
        let revealed: Vec<usize> = frames.iter().filter_map(|f| f.reveal_cut).collect();
        assert_eq!(revealed, vec![3, 4, 5, 6, 7]);
        assert_eq!(frames.iter().filter(|f| f.commit).count(), 1);
        assert_eq!(seq.cursor(), 8);
    }

    #[test]
    fn confirm_edge_reveals_once_per_press() {
        let cfg = TransitionConfig {
            auto_play_delay: 100.0,
            ..cfg()
        };
        let idle = input(SceneId::STAGE, SceneId::SELECT_CHARACTER);
        let held = TickInput {
            confirm_held: true,
            ..idle
        };
        let mut frames = Vec::new();
        let seq = run_until(
            TransitionSequencer::default(),
            &cfg,
            &idle,
            TransitionState::WaitingInput,
            &mut frames,
        );

        let (seq, first) = seq.step(&cfg, &held);
        let (seq, second) = seq.step(&cfg, &held);
        assert_eq!(first.reveal_cut, Some(0));
        assert_eq!(second.reveal_cut, None);

        let (seq, _) = seq.step(&cfg, &idle);
        let (seq, third) = seq.step(&cfg, &held);
        assert_eq!(third.reveal_cut, Some(1));
        assert_eq!(seq.state(), TransitionState::WaitingInput);
    }

    #[test]
    fn press_held_through_fade_in_counts_on_first_wait() {
        let cfg = TransitionConfig {
            auto_play_delay: 100.0,
            ..cfg()
        };
        let idle = input(SceneId::STAGE, SceneId::SELECT_CHARACTER);
        let held = TickInput {
            confirm_held: true,
            ..idle
        };

        let (seq, _) = TransitionSequencer::default().step(&cfg, &idle);
        let (seq, _) = seq.step(&cfg, &idle);
        assert_eq!(seq.state(), TransitionState::FadingIn);

        let mut frames = Vec::new();
        let seq = run_until(seq, &cfg, &held, TransitionState::WaitingInput, &mut frames);
        assert!(frames.iter().all(|f| f.reveal_cut.is_none()));

        let (seq, frame) = seq.step(&cfg, &held);
        assert_eq!(frame.reveal_cut, Some(0));

        // Still held: no second reveal.
        let (_, frame) = seq.step(&cfg, &held);
        assert_eq!(frame.reveal_cut, None);
    }

    #[test]
    fn confirm_after_last_cut_fades_out() {
        let cfg = TransitionConfig {
            auto_play_delay: 100.0,
            wait_at_last_cut: true,
            ..cfg()
        };
        let idle = input(SceneId::STAGE, SceneId::SELECT_CHARACTER);
        let held = TickInput {
            confirm_held: true,
            ..idle
        };
        let mut frames = Vec::new();
        let mut seq = run_until(
            TransitionSequencer::default(),
            &cfg,
            &idle,
            TransitionState::WaitingInput,
            &mut frames,
        );

        for expected in 0..3 {
            let (next, frame) = seq.step(&cfg, &held);
            assert_eq!(frame.reveal_cut, Some(expected));
            let (next, _) = next.step(&cfg, &idle);
            seq = next;
        }
        assert_eq!(seq.cursor(), 3);

        // Exhausted and holding: idle ticks keep waiting.
        for _ in 0..20 {
            let (next, _) = seq.step(&cfg, &idle);
            seq = next;
            assert_eq!(seq.state(), TransitionState::WaitingInput);
        }

        let (seq, frame) = seq.step(&cfg, &held);
        assert_eq!(frame.reveal_cut, None);
        assert_eq!(seq.state(), TransitionState::FadingOut);
    }

    #[test]
    fn no_cutscene_passes_straight_through() {
        let cfg = cfg();
        let input = input(SceneId::STAGE, SceneId::TITLE);
        let mut frames = Vec::new();
        let seq = run_until(
            TransitionSequencer::default(),
            &cfg,
            &input,
            TransitionState::WaitingInput,
            &mut frames,
        );
        assert!(!frames.iter().any(|f| f.hide_illustration));
        let (seq, frame) = seq.step(&cfg, &input);
        assert_eq!(seq.state(), TransitionState::FadingOut);
        assert_eq!(frame.reveal_cut, None);
        assert_eq!(seq.cut_range(), None);
    }

    #[test]
    fn fade_out_drives_loading_text_to_zero() {
        let cfg = cfg();
        let input = input(SceneId::STAGE, SceneId::TITLE);
        let mut frames = Vec::new();
        run_until(
            TransitionSequencer::default(),
            &cfg,
            &input,
            TransitionState::Switching,
            &mut frames,
        );
        let last = frames.last().copied().unwrap_or_default();
        assert_eq!(last.layer_alpha, Some(0.0));
        assert_eq!(last.loading_text_alpha, Some(0.0));
        for f in &frames {
            for a in [f.layer_alpha, f.loading_text_alpha, f.illustration_alpha()]
                .into_iter()
                .flatten()
            {
                assert!((0.0..=1.0).contains(&a), "alpha {a} out of range");
            }
        }
    }

    #[test]
    fn cursor_never_passes_range_end() {
        let cfg = TransitionConfig {
            auto_play_delay: 0.0,
            wait_at_last_cut: true,
            cut_count: 6,
            ..cfg()
        };
        let input = input(SceneId::BOSS, SceneId::STAGE);
        let mut seq = TransitionSequencer::default();
        for _ in 0..50 {
            let (next, _) = seq.step(&cfg, &input);
            seq = next;
            if let Some(range) = seq.cut_range() {
                assert!(seq.cursor() >= range.start && seq.cursor() <= range.end);
            }
        }
        assert_eq!(seq.cut_range(), Some(CutRange { start: 3, end: 6 }));
        assert_eq!(seq.cursor(), 6);
    }

    // ── app wiring ──────────────────────────────────────────────────

    /// Loading screen headed for the boss, 100 ms of real time per update.
    fn headless_app(cfg: TransitionConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ActivePad>()
            .insert_state(GameState::Loading)
            .add_plugins(ScenePlugin(SceneConfig {
                simulated_load_secs: 0.0,
            }))
            .add_plugins(TransitionPlugin(cfg));
        app.world_mut()
            .resource_mut::<SceneRouting>()
            .set_next_scene(SceneId::BOSS, SceneId::STAGE);
        app.world_mut().spawn((LoadingText, TextColor(Color::WHITE)));
        app
    }

    fn game_state(app: &App) -> GameState {
        *app.world().resource::<State<GameState>>().get()
    }

    #[test]
    fn boss_cutscene_runs_from_loading_into_boss() {
        let mut app = headless_app(TransitionConfig {
            fade_in_duration: 0.2,
            fade_out_duration: 0.2,
            auto_play_delay: 0.1,
            ..default()
        });

        let mut states = vec![game_state(&app)];
        let mut checked_cuts = false;
        for _ in 0..100 {
            app.update();
            let state = game_state(&app);
            if states.last() != Some(&state) {
                states.push(state);
            }

            let seq = *app.world().resource::<TransitionSequencer>();
            if !checked_cuts
                && state == GameState::Loading
                && seq.cursor() == CutRange::BOSS.end
            {
                checked_cuts = true;

                let mut cuts = app.world_mut().query::<(&CutImage, &Visibility)>();
                let mut seen = 0;
                for (cut, visibility) in cuts.iter(app.world()) {
                    seen += 1;
                    let expected = if (3..8).contains(&cut.index) {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    };
                    assert_eq!(*visibility, expected, "cut {}", cut.index);
                }
                assert_eq!(seen, 8);

                let mut illustrations = app
                    .world_mut()
                    .query_filtered::<(&ImageNode, &Visibility), With<Illustration>>();
                let (image, visibility) = illustrations.single(app.world()).unwrap();
                assert_eq!(*visibility, Visibility::Hidden);
                assert!(image.color.alpha().abs() < 1e-5);
            }
        }

        assert!(checked_cuts, "cutscene never reached its last cut");
        assert_eq!(states, vec![GameState::Loading, GameState::Boss]);
        assert!(
            app.world_mut()
                .resource_mut::<SceneRouting>()
                .take_pending_switch()
                .is_none()
        );

        let mut loading_texts = app
            .world_mut()
            .query_filtered::<&TextColor, With<LoadingText>>();
        let color = loading_texts.single(app.world()).unwrap();
        assert_eq!(color.0.alpha(), 0.0);
    }

    #[test]
    fn removing_prompt_freezes_sequencer() {
        let mut app = headless_app(TransitionConfig {
            fade_in_duration: 10.0,
            ..default()
        });
        for _ in 0..4 {
            app.update();
        }
        let before = *app.world().resource::<TransitionSequencer>();
        assert_eq!(before.state(), TransitionState::FadingIn);

        let mut prompts = app.world_mut().query_filtered::<Entity, With<SwitchingText>>();
        let prompt = prompts.single(app.world()).unwrap();
        app.world_mut().despawn(prompt);

        for _ in 0..20 {
            app.update();
        }
        assert_eq!(*app.world().resource::<TransitionSequencer>(), before);
        assert_eq!(game_state(&app), GameState::Loading);
    }
}
