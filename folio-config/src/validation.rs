//! Guard rails applied to every loaded configuration.
//!
//! Hard errors reject values the controllers cannot run with (a content swap
//! after the exit animation has finished, an inverted autoplay clamp). Soft
//! warnings flag values that work but probably are not what the author meant.

use std::fmt;

use thiserror::Error;

use crate::models::FolioConfig;
use crate::models::carousel::CarouselMode;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigGuardRailError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("autoplay clamp is inverted: min {min}s > max {max}s")]
    InvertedClamp { min: f64, max: f64 },
    #[error(
        "content switch at {switch_at}s must happen before the text exit \
         finishes at {exit_duration}s"
    )]
    ContentSwitchTooLate { switch_at: f64, exit_duration: f64 },
    #[error(
        "glitch offsets must satisfy swap ({swap_at}s) < settle ({settle_at}s) \
         <= end ({duration}s)"
    )]
    GlitchOrder {
        swap_at: f64,
        settle_at: f64,
        duration: f64,
    },
    #[error("scan line fraction must lie strictly between 0 and 1 (got {0})")]
    ScanLineFraction(f64),
    #[error("hero section id must not be empty")]
    EmptyHeroSection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The autoplay delay for `mode` was pulled into the clamp range.
    AutoplayClamped {
        mode: CarouselMode,
        requested: f64,
        applied: f64,
    },
    /// The in-flight latch outlives the autoplay interval, so every other
    /// tick would be dropped.
    AutoplayShorterThanTransition { mode: CarouselMode, interval: f64 },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoplayClamped {
                mode,
                requested,
                applied,
            } => write!(
                f,
                "autoplay delay for {mode} mode clamped from {requested}s to {applied}s"
            ),
            Self::AutoplayShorterThanTransition { mode, interval } => write!(
                f,
                "autoplay interval {interval}s in {mode} mode is shorter than a transition"
            ),
        }
    }
}

pub type ConfigWarnings = Vec<ConfigWarning>;

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigGuardRailError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigGuardRailError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigGuardRailError> {
    if finite(field, value)? <= 0.0 {
        return Err(ConfigGuardRailError::NonPositive { field, value });
    }
    Ok(())
}

fn non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), ConfigGuardRailError> {
    if finite(field, value)? < 0.0 {
        return Err(ConfigGuardRailError::Negative { field, value });
    }
    Ok(())
}

/// Check `config` and collect soft warnings. Runs after every load.
pub fn validate(
    config: &FolioConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let autoplay = &config.carousel.autoplay;
    let timings = &config.carousel.timings;
    let tracker = &config.tracker;

    positive("autoplay.base_seconds", autoplay.base_seconds)?;
    positive("autoplay.mode_multiplier.default", autoplay.mode_multiplier.default)?;
    positive("autoplay.mode_multiplier.reading", autoplay.mode_multiplier.reading)?;
    positive("autoplay.clamp_seconds.min", autoplay.clamp_seconds.min)?;
    positive("autoplay.clamp_seconds.max", autoplay.clamp_seconds.max)?;
    if autoplay.clamp_seconds.min > autoplay.clamp_seconds.max {
        return Err(ConfigGuardRailError::InvertedClamp {
            min: autoplay.clamp_seconds.min,
            max: autoplay.clamp_seconds.max,
        });
    }

    non_negative("timings.bg_swap_at", timings.bg_swap_at)?;
    non_negative(
        "timings.content_switch_after_bg_swap",
        timings.content_switch_after_bg_swap,
    )?;
    positive("timings.text_out.duration", timings.text_out.duration)?;
    non_negative("timings.text_out.stagger", timings.text_out.stagger)?;
    positive("timings.text_in.duration", timings.text_in.duration)?;
    non_negative("timings.text_in.stagger", timings.text_in.stagger)?;
    positive("timings.frame_interval", timings.frame_interval)?;
    non_negative("timings.manual_resume_grace", timings.manual_resume_grace)?;
    positive("timings.glitch.duration", timings.glitch.duration)?;
    finite("timings.glitch.settle_at", timings.glitch.settle_at)?;

    let switch_at = timings.content_switch_at();
    if switch_at >= timings.text_out.duration {
        return Err(ConfigGuardRailError::ContentSwitchTooLate {
            switch_at,
            exit_duration: timings.text_out.duration,
        });
    }

    let glitch = &timings.glitch;
    if !(timings.bg_swap_at < glitch.settle_at
        && glitch.settle_at <= glitch.duration)
    {
        return Err(ConfigGuardRailError::GlitchOrder {
            swap_at: timings.bg_swap_at,
            settle_at: glitch.settle_at,
            duration: glitch.duration,
        });
    }

    let fraction = finite("tracker.scan_line_fraction", tracker.scan_line_fraction)?;
    if fraction <= 0.0 || fraction >= 1.0 {
        return Err(ConfigGuardRailError::ScanLineFraction(fraction));
    }
    finite(
        "tracker.header_hero_threshold_px",
        tracker.header_hero_threshold_px,
    )?;
    if tracker.hero_section_id.as_str().trim().is_empty() {
        return Err(ConfigGuardRailError::EmptyHeroSection);
    }

    let mut warnings = ConfigWarnings::new();
    let transition = timings.text_out.total_seconds(4) + timings.frame_interval;
    for mode in CarouselMode::ALL {
        let requested = autoplay.raw_seconds(mode);
        let applied = autoplay.seconds(mode);
        if requested != applied {
            warnings.push(ConfigWarning::AutoplayClamped {
                mode,
                requested,
                applied,
            });
        }
        if applied <= transition {
            warnings.push(ConfigWarning::AutoplayShorterThanTransition {
                mode,
                interval: applied,
            });
        }
    }

    Ok(warnings)
}
