use folio_model::SectionId;
use serde::{Deserialize, Serialize};

/// Active-section tracking and header tone settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Scan line position as a fraction of the viewport height, measured
    /// from the top. The section straddling it is the active one.
    pub scan_line_fraction: f64,
    /// Section that hosts the hero carousel. The menu and header switch to
    /// their "on hero" styling while it is active.
    pub hero_section_id: SectionId,
    /// The header stays in hero tone while the hero section's bottom edge is
    /// further than this many pixels below the top of the viewport.
    pub header_hero_threshold_px: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            scan_line_fraction: 0.35,
            hero_section_id: SectionId::from("home"),
            header_hero_threshold_px: 80.0,
        }
    }
}

impl TrackerConfig {
    /// Scan line offset from the viewport top for a viewport of `height`.
    pub fn scan_line(&self, viewport_height: f64) -> f64 {
        viewport_height * self.scan_line_fraction
    }
}
