//! Hero background layer and its glitch transition.
//!
//! The glitch is a short independent timeline: the current image is
//! perturbed, the source is swapped partway through, and the layers settle
//! back. It is loosely aligned with the text transition by sharing the
//! configured offsets rather than by a hard barrier.

use std::time::Instant;

use folio_config::HeroCarouselTimings;

use crate::tween::{Easing, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlitchPhase {
    #[default]
    Steady,
    /// Current image is jittered; the swap has not happened yet.
    Perturbing,
    /// Target image is in place, still perturbed.
    Swapped,
    /// Perturbation easing back out.
    Settling,
}

/// What a renderer needs to draw the glitch layers at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchFrame {
    /// Opacity of the red/cyan split layers.
    pub split_opacity: f32,
    /// Opacity of the darkening overlay. Breathes down during the glitch.
    pub overlay_opacity: f32,
}

impl GlitchFrame {
    pub const STEADY: Self = Self {
        split_opacity: 0.0,
        overlay_opacity: 1.0,
    };
}

const SPLIT_OPACITY: f32 = 0.65;
const OVERLAY_DIP: f32 = 0.9;

/// State of the background image layer, keyed by card index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackgroundTrack {
    shown: Option<usize>,
    pending: Option<usize>,
    phase: GlitchPhase,
    started_at: Option<Instant>,
}

impl BackgroundTrack {
    pub fn new(shown: Option<usize>) -> Self {
        Self {
            shown,
            ..Self::default()
        }
    }

    /// Card whose image is currently displayed.
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    pub fn phase(&self) -> GlitchPhase {
        self.phase
    }

    pub fn is_glitching(&self) -> bool {
        self.phase != GlitchPhase::Steady
    }

    /// Begin a glitch towards `target`. Ignored while a glitch is running.
    pub fn glitch_to(&mut self, target: usize, now: Instant) -> bool {
        if self.is_glitching() {
            return false;
        }
        self.pending = Some(target);
        self.phase = GlitchPhase::Perturbing;
        self.started_at = Some(now);
        true
    }

    /// Swap in the pending image. Returns the new card index.
    pub fn swap(&mut self) -> Option<usize> {
        if self.phase != GlitchPhase::Perturbing {
            return None;
        }
        self.shown = self.pending.take();
        self.phase = GlitchPhase::Swapped;
        self.shown
    }

    pub fn settle(&mut self) {
        if self.phase == GlitchPhase::Swapped {
            self.phase = GlitchPhase::Settling;
        }
    }

    /// Glitch timeline completed; layers reset.
    pub fn finish(&mut self) {
        self.phase = GlitchPhase::Steady;
        self.pending = None;
        self.started_at = None;
    }

    /// Hard-set the displayed image without a glitch, as a renderer does
    /// when the active card changes under a glitch that was not started for it.
    pub fn sync(&mut self, index: usize) {
        if self.pending.is_some() && self.phase == GlitchPhase::Perturbing {
            self.pending = Some(index);
        } else {
            self.shown = Some(index);
        }
    }

    pub fn reset(&mut self, shown: Option<usize>) {
        *self = Self::new(shown);
    }

    /// Sample the glitch layers at `now`.
    pub fn frame(&self, now: Instant, timings: &HeroCarouselTimings) -> GlitchFrame {
        let Some(started_at) = self.started_at else {
            return GlitchFrame::STEADY;
        };
        if !self.is_glitching() {
            return GlitchFrame::STEADY;
        }

        let settle_at = timings.glitch_settle_at;
        let remaining = timings.glitch_duration.saturating_sub(settle_at);
        let overlay = if now < started_at + settle_at {
            Tween::new(started_at, settle_at, Easing::SineInOut).sample(
                1.0,
                OVERLAY_DIP,
                now,
            )
        } else {
            Tween::new(started_at + settle_at, remaining, Easing::SineOut)
                .sample(OVERLAY_DIP, 1.0, now)
        };
        let split = match self.phase {
            GlitchPhase::Settling => {
                Tween::new(started_at + settle_at, remaining, Easing::SineOut)
                    .sample(SPLIT_OPACITY, 0.0, now)
            }
            _ => SPLIT_OPACITY,
        };

        GlitchFrame {
            split_opacity: split,
            overlay_opacity: overlay,
        }
    }
}
