//! Time-based tweens sampled by renderers.
//!
//! The controllers only decide *when* things happen; how a value moves
//! between two states over that window is sampled here.

use std::time::{Duration, Instant};

/// Easing curves used by the hero transitions. Names follow the usual
/// power/sine families (power2 is cubic, power3 is quartic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Accelerating cubic, used for text leaving the stage.
    Power2In,
    /// Decelerating quartic, used for text entering.
    #[default]
    Power3Out,
    SineInOut,
    SineOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2In => t * t * t,
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            Self::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
        }
    }
}

/// A single tween window: starts `delay` after `started_at` and runs for
/// `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    pub started_at: Instant,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(started_at: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            started_at,
            delay: Duration::ZERO,
            duration,
            easing,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ends_at(&self) -> Instant {
        self.started_at + self.delay + self.duration
    }

    /// Linear progress in `[0, 1]`.
    pub fn linear_progress(&self, now: Instant) -> f32 {
        let begin = self.started_at + self.delay;
        let elapsed = now.saturating_duration_since(begin);
        if self.duration.is_zero() {
            return if now >= begin { 1.0 } else { 0.0 };
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        self.easing.apply(self.linear_progress(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.ends_at()
    }

    /// Interpolate between `from` and `to` at `now`.
    pub fn sample(&self, from: f32, to: f32, now: Instant) -> f32 {
        from + (to - from) * self.progress(now)
    }
}
