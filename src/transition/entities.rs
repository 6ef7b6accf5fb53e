use bevy::prelude::*;

use super::TransitionConfig;
use crate::math;
use crate::scene::SceneId;

/// Phase of the scene-switch overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum TransitionState {
    /// Nothing shown; waiting for the scene load to finish.
    #[default]
    Hidden,
    /// Prompt layers easing in.
    FadingIn,
    /// Prompt shown; cutscene cuts step on confirm or auto-play.
    WaitingInput,
    /// Prompt layers easing out.
    FadingOut,
    /// Commit fires; returns to `Hidden` on the same tick.
    Switching,
}

/// Half-open index interval `[start, end)` over the cut elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub struct CutRange {
    /// First cut shown.
    pub start: usize,
    /// One past the last cut shown.
    pub end: usize,
}

impl CutRange {
    /// Cuts played on the way into a boss stage.
    pub const BOSS: Self = Self { start: 3, end: 8 };
    /// Cuts played for every other cutscene.
    pub const DEFAULT: Self = Self { start: 0, end: 3 };

    /// Picks the bucket and clamps it to `cut_count` elements.
    ///
    /// A short cut list shrinks the range silently; `start <= end <= cut_count`.
    pub fn select(boss_path: bool, cut_count: usize) -> Self {
        let bucket = if boss_path { Self::BOSS } else { Self::DEFAULT };
        let start = bucket.start.min(cut_count);
        let end = bucket.end.clamp(start, cut_count);
        Self { start, end }
    }

    /// Number of cuts in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// `true` when the range holds no cuts.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Whether the upcoming switch plays a cutscene at all.
pub fn has_cutscene(next: SceneId, came_from: SceneId, test_mode: bool) -> bool {
    came_from == SceneId::SELECT_CHARACTER || next == SceneId::BOSS || test_mode
}

/// Whether the boss cut bucket applies. Only the destination counts.
pub fn is_boss_path(next: SceneId, test_boss_stage: bool) -> bool {
    next == SceneId::BOSS || test_boss_stage
}

/// Illustration shown behind the prompt when the loading screen opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum IllustrationChoice {
    /// Regular artwork.
    Default,
    /// Boss artwork.
    Boss,
    /// No illustration.
    Hidden,
}

impl IllustrationChoice {
    /// Coming from character select wins over heading to the boss.
    pub fn for_route(next: SceneId, came_from: SceneId) -> Self {
        if came_from == SceneId::SELECT_CHARACTER {
            Self::Default
        } else if next == SceneId::BOSS {
            Self::Boss
        } else {
            Self::Hidden
        }
    }
}

/// Everything the sequencer consumes on one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickInput {
    /// Unscaled seconds since the previous tick.
    pub delta_secs: f32,
    /// Scene loader readiness.
    pub scene_load_ready: bool,
    /// Destination scene.
    pub next_scene: SceneId,
    /// Origin scene.
    pub came_from: SceneId,
    /// Raw confirm level; the sequencer derives the edge itself.
    pub confirm_held: bool,
}

/// Visual outputs of one tick. `None` leaves a layer untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransitionFrame {
    /// Alpha for the button icon and prompt text.
    pub layer_alpha: Option<f32>,
    /// Alpha for the loading text.
    pub loading_text_alpha: Option<f32>,
    /// Hide the illustration (a cutscene is taking over).
    pub hide_illustration: bool,
    /// Cut element to make visible.
    pub reveal_cut: Option<usize>,
    /// Request the scene switch.
    pub commit: bool,
}

impl TransitionFrame {
    /// The illustration fades against the prompt: `1 - a`.
    pub fn illustration_alpha(&self) -> Option<f32> {
        self.layer_alpha.map(|a| 1.0 - a)
    }
}

/// Scene-switch state machine.
///
/// Plain data so it can be stepped without a running app; see
/// [`TransitionSequencer::step`].
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct TransitionSequencer {
    state: TransitionState,
    timer: f32,
    cut_range: Option<CutRange>,
    cursor: usize,
    auto_timer: f32,
    prev_confirm: bool,
}

impl TransitionSequencer {
    /// Current phase.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Latched cut range, once a cutscene started this cycle.
    pub fn cut_range(&self) -> Option<CutRange> {
        self.cut_range
    }

    /// Next cut to reveal.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advances one tick.
    pub fn step(mut self, cfg: &TransitionConfig, input: &TickInput) -> (Self, TransitionFrame) {
        let mut frame = TransitionFrame::default();

        if !input.scene_load_ready {
            self.state = TransitionState::Hidden;
            self.timer = 0.0;
            self.prev_confirm = false;
            frame.layer_alpha = Some(0.0);
            return (self, frame);
        }

        match self.state {
            TransitionState::Hidden => {
                self.timer = 0.0;
                self.state = TransitionState::FadingIn;
                frame.layer_alpha = Some(0.0);
            }
            TransitionState::FadingIn => {
                self.timer += input.delta_secs;
                let t = math::progress(self.timer, cfg.fade_in_duration);
                frame.layer_alpha = Some(math::smoothstep01(t));

                if t >= 1.0 {
                    self.timer = 0.0;
                    self.state = TransitionState::WaitingInput;

                    if has_cutscene(input.next_scene, input.came_from, cfg.test_mode) {
                        self.latch_cut_range(cfg, input.next_scene);
                        frame.hide_illustration = true;
                    }
                }
            }
            TransitionState::WaitingInput => {
                // Confirm is only sampled here; a press held since the fade-in
                // still counts as fresh on the first waiting tick.
                let confirm_edge = input.confirm_held && !self.prev_confirm;
                self.prev_confirm = input.confirm_held;
                let cutscene = has_cutscene(input.next_scene, input.came_from, cfg.test_mode);
                let remaining = self.cursor < self.cut_end();

                if confirm_edge {
                    if cutscene && remaining {
                        frame.reveal_cut = Some(self.advance_cursor());
                    } else {
                        self.begin_fade_out();
                    }
                } else if cutscene {
                    if remaining {
                        self.auto_timer += input.delta_secs;
                        if self.auto_timer >= cfg.auto_play_delay {
                            frame.reveal_cut = Some(self.advance_cursor());
                        }
                    } else if !cfg.wait_at_last_cut {
                        self.begin_fade_out();
                    }
                } else {
                    self.begin_fade_out();
                }
            }
            TransitionState::FadingOut => {
                self.timer += input.delta_secs;
                let t = math::progress(self.timer, cfg.fade_out_duration);
                let a = 1.0 - math::smoothstep01(t);
                frame.layer_alpha = Some(a);
                frame.loading_text_alpha = Some(a);

                if t >= 1.0 {
                    self.state = TransitionState::Switching;
                }
            }
            TransitionState::Switching => {
                frame.commit = true;
                self.state = TransitionState::Hidden;
                self.timer = 0.0;
                frame.layer_alpha = Some(0.0);
                frame.loading_text_alpha = Some(0.0);
            }
        }

        (self, frame)
    }

    fn latch_cut_range(&mut self, cfg: &TransitionConfig, next: SceneId) {
        if self.cut_range.is_some() {
            return;
        }
        let range = CutRange::select(is_boss_path(next, cfg.test_boss_stage), cfg.cut_count);
        self.cut_range = Some(range);
        self.cursor = range.start;
        self.auto_timer = 0.0;
    }

    // Without a latched range there is nothing left to show.
    fn cut_end(&self) -> usize {
        self.cut_range.map_or(self.cursor, |r| r.end)
    }

    fn advance_cursor(&mut self) -> usize {
        let shown = self.cursor;
        self.cursor += 1;
        self.auto_timer = 0.0;
        shown
    }

    fn begin_fade_out(&mut self) {
        self.state = TransitionState::FadingOut;
        self.timer = 0.0;
    }
}

/// Switch button icon layer.
#[derive(Component, Reflect)]
pub struct SwitchButtonIcon;

/// "Press to continue" prompt text layer.
#[derive(Component, Reflect)]
pub struct SwitchingText;

/// Illustration behind the prompt; alpha runs inverse to the prompt.
#[derive(Component, Reflect)]
pub struct Illustration;

/// One cutscene frame, revealed in index order.
#[derive(Component, Reflect)]
pub struct CutImage {
    /// Position in the cut sequence.
    pub index: usize,
}

/// Outputs of the latest tick, applied to the UI by a follow-up system.
#[derive(Resource, Default, Debug)]
pub struct LastFrame(pub TransitionFrame);
