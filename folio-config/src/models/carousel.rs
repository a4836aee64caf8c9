use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Autoplay pacing. `Reading` stretches the interval for visitors who
/// actually read the card text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CarouselMode {
    #[default]
    Default,
    Reading,
}

impl CarouselMode {
    pub const ALL: [Self; 2] = [Self::Default, Self::Reading];
}

impl std::fmt::Display for CarouselMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Reading => write!(f, "reading"),
        }
    }
}

impl std::str::FromStr for CarouselMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "reading" => Ok(Self::Reading),
            other => Err(format!("unknown carousel mode '{other}'")),
        }
    }
}

/// Per-mode factor applied to [`AutoplayConfig::base_seconds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeMultiplier {
    pub default: f64,
    pub reading: f64,
}

impl Default for ModeMultiplier {
    fn default() -> Self {
        Self {
            default: 1.0,
            reading: 3.0,
        }
    }
}

impl ModeMultiplier {
    pub fn for_mode(&self, mode: CarouselMode) -> f64 {
        match mode {
            CarouselMode::Default => self.default,
            CarouselMode::Reading => self.reading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClampSeconds {
    pub min: f64,
    pub max: f64,
}

impl Default for ClampSeconds {
    fn default() -> Self {
        Self {
            min: 8.0,
            max: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Interval before the multiplier, in seconds.
    pub base_seconds: f64,
    pub mode_multiplier: ModeMultiplier,
    /// Bounds applied after the multiplier.
    pub clamp_seconds: ClampSeconds,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            base_seconds: 10.0,
            mode_multiplier: ModeMultiplier::default(),
            clamp_seconds: ClampSeconds::default(),
        }
    }
}

impl AutoplayConfig {
    /// Unclamped interval for `mode`, in seconds.
    pub fn raw_seconds(&self, mode: CarouselMode) -> f64 {
        self.base_seconds * self.mode_multiplier.for_mode(mode)
    }

    /// `clamp(base * multiplier, min, max)`, in seconds. Applied as max-then-min
    /// so an inverted clamp cannot panic; the guard rails reject it anyway.
    pub fn seconds(&self, mode: CarouselMode) -> f64 {
        self.raw_seconds(mode)
            .max(self.clamp_seconds.min)
            .min(self.clamp_seconds.max)
    }
}

/// A staggered tween over the card's text elements, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenTiming {
    pub duration: f64,
    pub stagger: f64,
}

impl TweenTiming {
    /// Seconds until the last of `elements` finishes.
    pub fn total_seconds(&self, elements: usize) -> f64 {
        self.duration + self.stagger * elements.saturating_sub(1) as f64
    }
}

/// Background glitch offsets, in seconds from the start of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchTiming {
    /// When the perturbation starts easing back out.
    pub settle_at: f64,
    /// When the glitch timeline completes and the layers reset.
    pub duration: f64,
}

impl Default for GlitchTiming {
    fn default() -> Self {
        Self {
            settle_at: 0.18,
            duration: 0.40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    /// Offset at which the background swaps its image mid-glitch.
    pub bg_swap_at: f64,
    pub text_out: TweenTiming,
    pub text_in: TweenTiming,
    /// Delay between the background swap and the content swap.
    pub content_switch_after_bg_swap: f64,
    pub glitch: GlitchTiming,
    /// One rendered frame. The in-flight latch is released on the frame
    /// after the text timeline completes.
    pub frame_interval: f64,
    /// Pause before autoplay resumes after a manual selection.
    pub manual_resume_grace: f64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            bg_swap_at: 0.11,
            text_out: TweenTiming {
                duration: 0.32,
                stagger: 0.04,
            },
            text_in: TweenTiming {
                duration: 0.95,
                stagger: 0.09,
            },
            content_switch_after_bg_swap: 0.07,
            glitch: GlitchTiming::default(),
            frame_interval: 1.0 / 60.0,
            manual_resume_grace: 0.2,
        }
    }
}

impl TimingsConfig {
    /// `bg_swap_at + content_switch_after_bg_swap`, in seconds.
    pub fn content_switch_at(&self) -> f64 {
        self.bg_swap_at + self.content_switch_after_bg_swap
    }
}

/// Hero carousel configuration: autoplay pacing plus the transition timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroCarouselConfig {
    pub autoplay: AutoplayConfig,
    pub timings: TimingsConfig,
}

impl HeroCarouselConfig {
    pub fn autoplay_delay(&self, mode: CarouselMode) -> Duration {
        secs(self.autoplay.seconds(mode))
    }

    /// Resolve the timeline for `mode` into durations.
    pub fn timings(&self, mode: CarouselMode) -> HeroCarouselTimings {
        let t = &self.timings;
        HeroCarouselTimings {
            mode,
            autoplay_delay: self.autoplay_delay(mode),
            bg_swap_at: secs(t.bg_swap_at),
            content_switch_at: secs(t.content_switch_at()),
            text_out: StaggeredTiming::from(t.text_out),
            text_in: StaggeredTiming::from(t.text_in),
            glitch_settle_at: secs(t.glitch.settle_at),
            glitch_duration: secs(t.glitch.duration),
            frame_interval: secs(t.frame_interval),
            manual_resume_grace: secs(t.manual_resume_grace),
        }
    }
}

/// A staggered tween resolved into durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggeredTiming {
    pub duration: Duration,
    pub stagger: Duration,
}

impl From<TweenTiming> for StaggeredTiming {
    fn from(value: TweenTiming) -> Self {
        Self {
            duration: secs(value.duration),
            stagger: secs(value.stagger),
        }
    }
}

impl StaggeredTiming {
    /// Start offset of element `index`.
    pub fn delay_of(&self, index: usize) -> Duration {
        self.stagger.saturating_mul(index as u32)
    }

    /// Time until the last of `elements` finishes.
    pub fn total(&self, elements: usize) -> Duration {
        self.duration + self.delay_of(elements.saturating_sub(1))
    }
}

/// Resolved timeline for one carousel mode. All offsets are relative to the
/// moment a transition starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroCarouselTimings {
    pub mode: CarouselMode,
    pub autoplay_delay: Duration,
    pub bg_swap_at: Duration,
    pub content_switch_at: Duration,
    pub text_out: StaggeredTiming,
    pub text_in: StaggeredTiming,
    pub glitch_settle_at: Duration,
    pub glitch_duration: Duration,
    pub frame_interval: Duration,
    pub manual_resume_grace: Duration,
}

impl HeroCarouselTimings {
    /// End of the text timeline: the exit tweens and the content swap
    /// callback, whichever finishes last.
    pub fn text_timeline_end(&self, elements: usize) -> Duration {
        self.text_out.total(elements).max(self.content_switch_at)
    }
}

// Rounded to the nanosecond so decimal offsets like 0.11 + 0.07 land exactly.
fn secs(value: f64) -> Duration {
    if !value.is_finite() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((value * 1e9).round() as u64)
}
