//! Active-section tracking
//!
//! Decides which page section is "in focus" for the navigation highlight by
//! comparing section bounds against a horizontal scan line. Recomputation is
//! a pure function of the current layout, so a newer measurement simply
//! supersedes an older one.

use folio_config::TrackerConfig;
use folio_model::SectionId;
use tracing::{debug, trace};

/// Vertical extent of a section relative to the viewport top, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub bottom: f64,
}

impl SectionRect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Inclusive on both edges.
    pub fn straddles(&self, y: f64) -> bool {
        self.top <= y && self.bottom >= y
    }
}

/// Read access to current layout geometry, implemented by the host.
pub trait LayoutProbe {
    fn viewport_height(&self) -> f64;

    /// Bounds of the region anchored at `id`, or `None` when no such region
    /// is rendered.
    fn section_rect(&self, id: &SectionId) -> Option<SectionRect>;
}

/// Pick the active section for a scan line at `scan_y`.
///
/// Sections are considered in registry order. The first one whose bounds
/// straddle the scan line wins. When none does, the section whose top edge is
/// closest to the scan line wins; a later section only replaces an earlier
/// one on a strictly smaller distance, so ties go to the earlier-declared
/// section. Returns `None` for an empty iterator.
pub fn resolve_active<'a, I>(sections: I, scan_y: f64) -> Option<&'a SectionId>
where
    I: IntoIterator<Item = (&'a SectionId, SectionRect)>,
    I::IntoIter: Clone,
{
    let sections = sections.into_iter();

    if let Some((id, _)) = sections.clone().find(|(_, rect)| rect.straddles(scan_y)) {
        return Some(id);
    }

    let mut best: Option<(&SectionId, f64)> = None;
    for (id, rect) in sections {
        let dist = (rect.top - scan_y).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((id, dist)),
        }
    }
    best.map(|(id, _)| id)
}

/// Outcome of a scroll or resize notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum FrameRequest {
    /// The host must queue one animation-frame callback and call
    /// [`SectionTracker::on_animation_frame`] from it.
    Schedule,
    /// A frame is already queued for this burst.
    Coalesced,
    /// The tracker is not mounted.
    Ignored,
}

/// Scroll-aware active-section tracker.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    registry: Vec<SectionId>,
    active: Option<SectionId>,
    scan_line_fraction: f64,
    frame_pending: bool,
    mounted: bool,
}

impl SectionTracker {
    /// The first registered section is active until the first measurement.
    pub fn new(registry: Vec<SectionId>, config: &TrackerConfig) -> Self {
        let active = registry.first().cloned();
        Self {
            registry,
            active,
            scan_line_fraction: config.scan_line_fraction,
            frame_pending: false,
            mounted: false,
        }
    }

    pub fn registry(&self) -> &[SectionId] {
        &self.registry
    }

    pub fn active_id(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &SectionId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start listening and measure once right away, so the first render is
    /// correct without any scrolling. Returns whether the active id changed.
    pub fn mount(&mut self, probe: &impl LayoutProbe) -> bool {
        self.mounted = true;
        self.frame_pending = false;
        self.recompute(probe)
    }

    /// Stop listening. A frame queued before this point is ignored when it
    /// runs.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.frame_pending = false;
    }

    pub fn on_scroll(&mut self) -> FrameRequest {
        self.request_frame()
    }

    pub fn on_resize(&mut self) -> FrameRequest {
        self.request_frame()
    }

    fn request_frame(&mut self) -> FrameRequest {
        if !self.mounted {
            return FrameRequest::Ignored;
        }
        if self.frame_pending {
            return FrameRequest::Coalesced;
        }
        self.frame_pending = true;
        FrameRequest::Schedule
    }

    /// Animation-frame callback. Returns whether the active id changed.
    pub fn on_animation_frame(&mut self, probe: &impl LayoutProbe) -> bool {
        if !self.mounted || !self.frame_pending {
            return false;
        }
        self.frame_pending = false;
        self.recompute(probe)
    }

    /// Measure now. Sections without geometry are skipped; if none can be
    /// measured the previous active id stays.
    pub fn recompute(&mut self, probe: &impl LayoutProbe) -> bool {
        let scan_y = probe.viewport_height() * self.scan_line_fraction;
        let measured: Vec<(&SectionId, SectionRect)> = self
            .registry
            .iter()
            .filter_map(|id| probe.section_rect(id).map(|rect| (id, rect)))
            .collect();

        let Some(next) = resolve_active(measured.iter().copied(), scan_y) else {
            trace!("no section geometry available; keeping active section");
            return false;
        };

        if self.active.as_ref() == Some(next) {
            return false;
        }
        debug!(from = ?self.active, to = %next, "active section changed");
        self.active = Some(next.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straddle_is_inclusive_on_both_edges() {
        let rect = SectionRect::new(100.0, 200.0);
        assert!(rect.straddles(100.0));
        assert!(rect.straddles(200.0));
        assert!(!rect.straddles(200.5));
    }

    #[test]
    fn overlapping_sections_resolve_to_the_first() {
        let a = SectionId::from("a");
        let b = SectionId::from("b");
        let sections = [
            (&a, SectionRect::new(0.0, 400.0)),
            (&b, SectionRect::new(300.0, 800.0)),
        ];
        assert_eq!(resolve_active(sections, 350.0), Some(&a));
    }

    #[test]
    fn empty_layout_resolves_to_nothing() {
        let none: [(&SectionId, SectionRect); 0] = [];
        assert_eq!(resolve_active(none, 350.0), None);
    }
}
