//! Staggered text tracks for the hero card: audience line, title, body and
//! CTA animate one after another.

use std::time::Instant;

use folio_config::StaggeredTiming;

use crate::tween::{Easing, Tween};

/// Visual state of one text element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub opacity: f32,
    /// Vertical offset in pixels, negative is up.
    pub offset_y: f32,
    pub blur_px: f32,
}

impl ElementStyle {
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
        blur_px: 0.0,
    };
    /// Where exiting text ends up: faded, lifted and blurred.
    pub const EXITED: Self = Self {
        opacity: 0.0,
        offset_y: -14.0,
        blur_px: 8.0,
    };
    /// Where entering text starts: faded, lowered and blurred.
    pub const PRE_ENTER: Self = Self {
        opacity: 0.0,
        offset_y: 28.0,
        blur_px: 8.0,
    };

    fn lerp(from: Self, to: Self, tween: &Tween, now: Instant) -> Self {
        Self {
            opacity: tween.sample(from.opacity, to.opacity, now),
            offset_y: tween.sample(from.offset_y, to.offset_y, now),
            blur_px: tween.sample(from.blur_px, to.blur_px, now),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMotion {
    Exit,
    Enter,
}

/// One staggered animation over a card's text elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTrack {
    motion: TextMotion,
    started_at: Instant,
    timing: StaggeredTiming,
    elements: usize,
}

impl TextTrack {
    pub fn exit(started_at: Instant, timing: StaggeredTiming, elements: usize) -> Self {
        Self {
            motion: TextMotion::Exit,
            started_at,
            timing,
            elements,
        }
    }

    pub fn enter(started_at: Instant, timing: StaggeredTiming, elements: usize) -> Self {
        Self {
            motion: TextMotion::Enter,
            started_at,
            timing,
            elements,
        }
    }

    pub fn motion(&self) -> TextMotion {
        self.motion
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn ends_at(&self) -> Instant {
        self.started_at + self.timing.total(self.elements)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.ends_at()
    }

    fn tween(&self, index: usize) -> Tween {
        let easing = match self.motion {
            TextMotion::Exit => Easing::Power2In,
            TextMotion::Enter => Easing::Power3Out,
        };
        Tween::new(self.started_at, self.timing.duration, easing)
            .delayed(self.timing.delay_of(index))
    }

    /// Style of element `index` at `now`. Indices past the last element
    /// sample like the last one.
    pub fn element(&self, index: usize, now: Instant) -> ElementStyle {
        let index = index.min(self.elements.saturating_sub(1));
        let (from, to) = match self.motion {
            TextMotion::Exit => (ElementStyle::VISIBLE, ElementStyle::EXITED),
            TextMotion::Enter => (ElementStyle::PRE_ENTER, ElementStyle::VISIBLE),
        };
        ElementStyle::lerp(from, to, &self.tween(index), now)
    }

    pub fn sample(&self, now: Instant) -> Vec<ElementStyle> {
        (0..self.elements).map(|i| self.element(i, now)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn timing(duration_ms: u64, stagger_ms: u64) -> StaggeredTiming {
        StaggeredTiming {
            duration: Duration::from_millis(duration_ms),
            stagger: Duration::from_millis(stagger_ms),
        }
    }

    #[test]
    fn exit_staggers_elements_in_order() {
        let t0 = Instant::now();
        let track = TextTrack::exit(t0, timing(320, 40), 4);
        let styles = track.sample(t0 + Duration::from_millis(100));

        assert_eq!(styles.len(), 4);
        for pair in styles.windows(2) {
            assert!(pair[0].opacity <= pair[1].opacity, "{pair:?}");
        }
        assert_eq!(track.ends_at(), t0 + Duration::from_millis(440));
    }

    #[test]
    fn enter_settles_fully_visible() {
        let t0 = Instant::now();
        let track = TextTrack::enter(t0, timing(950, 90), 4);

        assert_eq!(track.element(0, t0), ElementStyle::PRE_ENTER);
        let done = track.sample(track.ends_at());
        assert!(done.iter().all(|style| *style == ElementStyle::VISIBLE));
    }
}
