//! Header tone: light-on-dark while the hero fills the top of the viewport,
//! dark-on-light once it has scrolled away.

use folio_config::TrackerConfig;
use folio_model::SectionId;

use crate::tracker::LayoutProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderTone {
    #[default]
    OnHero,
    OnLight,
}

#[derive(Debug, Clone)]
pub struct HeaderState {
    hero: SectionId,
    threshold_px: f64,
    tone: HeaderTone,
}

impl HeaderState {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            hero: config.hero_section_id.clone(),
            threshold_px: config.header_hero_threshold_px,
            tone: HeaderTone::OnHero,
        }
    }

    pub fn tone(&self) -> HeaderTone {
        self.tone
    }

    pub fn is_on_hero(&self) -> bool {
        self.tone == HeaderTone::OnHero
    }

    /// Re-evaluate on scroll or resize. Without hero geometry the tone is left
    /// as it was. Returns whether the tone changed.
    pub fn update(&mut self, probe: &impl LayoutProbe) -> bool {
        let Some(rect) = probe.section_rect(&self.hero) else {
            return false;
        };
        let tone = if rect.bottom > self.threshold_px {
            HeaderTone::OnHero
        } else {
            HeaderTone::OnLight
        };
        let changed = tone != self.tone;
        self.tone = tone;
        changed
    }
}
