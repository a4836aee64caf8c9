pub mod carousel;
pub mod tracker;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::carousel::HeroCarouselConfig;
use self::tracker::TrackerConfig;

/// Source that produced the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FolioConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Top-level configuration. Missing sections and fields fall back to the
/// defaults below, so a file only needs to name what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Hero carousel autoplay and transition timeline.
    pub carousel: HeroCarouselConfig,
    /// Active-section tracking and header tone.
    pub tracker: TrackerConfig,
}
