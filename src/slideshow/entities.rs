use bevy::prelude::*;

use super::SlideshowConfig;
use crate::math;

/// Full-screen slide image.
#[derive(Component, Reflect)]
pub struct SlideImage {
    /// Position in the slideshow.
    pub index: usize,
}

/// Overlay faded in at the end of the slideshow.
#[derive(Component, Reflect)]
pub struct SlideOverlay;

/// Slideshow phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum SlidePhase {
    /// A slide fully shown.
    Hold {
        /// Slide on screen.
        index: usize,
    },
    /// Fading one slide out and the next in.
    CrossFade {
        /// Outgoing slide; `from + 1` fades in.
        from: usize,
    },
    /// Closing fade.
    EndFade,
    /// Finished.
    Done,
}

/// Slideshow state machine; owns the alpha of every slide and the overlay.
#[derive(Resource, Debug, Clone, Reflect)]
pub struct Slideshow {
    phase: SlidePhase,
    timer: f32,
    alphas: Vec<f32>,
    overlay: Option<f32>,
    end_from: f32,
    finish_pending: bool,
}

impl Slideshow {
    /// First slide opaque, the rest and the overlay transparent.
    pub fn new(slide_count: usize, use_overlay: bool) -> Self {
        let alphas = (0..slide_count)
            .map(|i| if i == 0 { 1.0 } else { 0.0 })
            .collect();
        let empty = slide_count == 0;
        Self {
            phase: if empty {
                SlidePhase::Done
            } else {
                SlidePhase::Hold { index: 0 }
            },
            timer: 0.0,
            alphas,
            overlay: use_overlay.then_some(0.0),
            end_from: 0.0,
            finish_pending: empty,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SlidePhase {
        self.phase
    }

    /// Alpha per slide.
    pub fn alphas(&self) -> &[f32] {
        &self.alphas
    }

    /// Overlay alpha, if an overlay is used.
    pub fn overlay(&self) -> Option<f32> {
        self.overlay
    }

    /// Advances by `dt`. Returns `true` exactly once, on the tick the
    /// slideshow finishes.
    pub fn step(&mut self, cfg: &SlideshowConfig, dt: f32) -> bool {
        match self.phase {
            SlidePhase::Hold { index } => {
                self.timer += dt;
                if self.timer >= cfg.hold_time {
                    self.timer = 0.0;
                    if index + 1 < self.alphas.len() {
                        self.phase = SlidePhase::CrossFade { from: index };
                    } else {
                        self.end_from = self.end_alpha();
                        self.phase = SlidePhase::EndFade;
                    }
                }
            }
            SlidePhase::CrossFade { from } => {
                self.timer += dt;
                let a = math::progress(self.timer, cfg.cross_fade_time);
                self.alphas[from] = 1.0 - a;
                self.alphas[from + 1] = a;
                if a >= 1.0 {
                    self.timer = 0.0;
                    self.phase = SlidePhase::Hold { index: from + 1 };
                }
            }
            SlidePhase::EndFade => {
                self.timer += dt;
                let t = math::progress(self.timer, cfg.end_delay_time);
                let target = if self.overlay.is_some() { 1.0 } else { 0.0 };
                self.set_end_alpha(math::lerp(self.end_from, target, t));
                if t >= 1.0 {
                    self.set_end_alpha(target);
                    self.phase = SlidePhase::Done;
                    self.finish_pending = true;
                }
            }
            SlidePhase::Done => {}
        }

        std::mem::take(&mut self.finish_pending)
    }

    fn end_alpha(&self) -> f32 {
        match self.overlay {
            Some(a) => a,
            None => self.alphas.last().copied().unwrap_or(0.0),
        }
    }

    fn set_end_alpha(&mut self, a: f32) {
        match &mut self.overlay {
            Some(overlay) => *overlay = a,
            None => {
                if let Some(last) = self.alphas.last_mut() {
                    *last = a;
                }
            }
        }
    }
}
