use std::collections::HashMap;

use folio_config::TrackerConfig;
use folio_core::{
    FrameRequest, HeaderState, HeaderTone, LayoutProbe, SectionRect,
    SectionTracker,
};
use folio_model::SectionId;

/// Fake layout: fixed viewport and per-section bounds.
#[derive(Default)]
struct Layout {
    viewport: f64,
    rects: HashMap<String, SectionRect>,
}

impl Layout {
    fn new(viewport: f64) -> Self {
        Self {
            viewport,
            rects: HashMap::new(),
        }
    }

    fn with(mut self, id: &str, top: f64, bottom: f64) -> Self {
        self.rects.insert(id.to_string(), SectionRect::new(top, bottom));
        self
    }

    /// Shift every section up by `dy`, as scrolling down does.
    fn scrolled(mut self, dy: f64) -> Self {
        for rect in self.rects.values_mut() {
            rect.top -= dy;
            rect.bottom -= dy;
        }
        self
    }
}

impl LayoutProbe for Layout {
    fn viewport_height(&self) -> f64 {
        self.viewport
    }

    fn section_rect(&self, id: &SectionId) -> Option<SectionRect> {
        self.rects.get(id.as_str()).copied()
    }
}

fn registry(ids: &[&str]) -> Vec<SectionId> {
    ids.iter().map(|id| SectionId::from(*id)).collect()
}

fn tracker(ids: &[&str]) -> SectionTracker {
    SectionTracker::new(registry(ids), &TrackerConfig::default())
}

fn active(tracker: &SectionTracker) -> Option<&str> {
    tracker.active_id().map(SectionId::as_str)
}

#[test]
fn first_section_is_active_before_any_measurement() {
    let t = tracker(&["home", "about"]);
    assert_eq!(active(&t), Some("home"));
    assert!(!t.is_mounted());
}

#[test]
fn section_straddling_the_scan_line_wins() {
    // Scan line at 350px of a 1000px viewport.
    let layout = Layout::new(1000.0)
        .with("a", -1400.0, -900.0)
        .with("b", -900.0, 100.0)
        .with("c", 100.0, 600.0)
        .with("d", 600.0, 1200.0)
        .with("e", 1200.0, 1800.0);
    let mut t = tracker(&["a", "b", "c", "d", "e"]);

    assert!(t.mount(&layout));
    assert_eq!(active(&t), Some("c"));
}

#[test]
fn nearest_top_edge_wins_when_nothing_straddles() {
    // Gap around the scan line; both tops are 100px away.
    let layout = Layout::new(1000.0)
        .with("a", 250.0, 300.0)
        .with("b", 450.0, 900.0);
    let mut t = tracker(&["b", "a"]);
    t.mount(&layout);
    assert_eq!(active(&t), Some("b"), "ties go to the earlier registry entry");

    let layout = Layout::new(1000.0)
        .with("a", 250.0, 300.0)
        .with("b", 460.0, 900.0);
    let mut t = tracker(&["b", "a"]);
    t.mount(&layout);
    assert_eq!(active(&t), Some("a"));
}

#[test]
fn scan_line_above_every_section_picks_the_nearest_top() {
    // Page scrolled above the content: all tops sit below the 350px line.
    let layout = Layout::new(1000.0)
        .with("home", 600.0, 1400.0)
        .with("about", 400.0, 500.0)
        .with("contact", 1400.0, 2000.0);
    let mut t = tracker(&["home", "about", "contact"]);

    assert!(t.mount(&layout));
    assert_eq!(active(&t), Some("about"));
}

#[test]
fn sections_without_geometry_are_skipped() {
    let layout = Layout::new(1000.0)
        .with("home", -800.0, 200.0)
        .with("contact", 200.0, 900.0);
    let mut t = tracker(&["home", "services", "contact"]);

    assert!(t.mount(&layout));
    assert_eq!(active(&t), Some("contact"));
}

#[test]
fn nothing_measurable_keeps_the_previous_section() {
    let mut t = tracker(&["home", "about"]);
    assert!(!t.mount(&Layout::new(1000.0)));
    assert_eq!(active(&t), Some("home"));
}

#[test]
fn scroll_bursts_coalesce_into_one_frame() {
    let base = Layout::new(1000.0)
        .with("home", 0.0, 1000.0)
        .with("about", 1000.0, 2000.0);
    let mut t = tracker(&["home", "about"]);

    assert_eq!(t.on_scroll(), FrameRequest::Ignored, "not mounted yet");
    t.mount(&base);

    assert_eq!(t.on_scroll(), FrameRequest::Schedule);
    assert_eq!(t.on_scroll(), FrameRequest::Coalesced);
    assert_eq!(t.on_resize(), FrameRequest::Coalesced);

    let scrolled = base.scrolled(700.0);
    assert!(t.on_animation_frame(&scrolled));
    assert_eq!(active(&t), Some("about"));
    assert!(!t.frame_pending());

    assert!(!t.on_animation_frame(&scrolled), "no frame was requested");
    assert_eq!(t.on_scroll(), FrameRequest::Schedule);
}

#[test]
fn frame_after_unmount_is_ignored() {
    let layout = Layout::new(1000.0)
        .with("home", -900.0, 100.0)
        .with("about", 100.0, 1100.0);
    let mut t = tracker(&["home", "about"]);
    t.mount(&Layout::new(1000.0));

    assert_eq!(t.on_scroll(), FrameRequest::Schedule);
    t.unmount();
    assert!(!t.on_animation_frame(&layout));
    assert_eq!(active(&t), Some("home"));
}

#[test]
fn empty_registry_has_no_active_section() {
    let mut t = tracker(&[]);
    assert!(!t.mount(&Layout::new(1000.0).with("home", 0.0, 1000.0)));
    assert_eq!(t.active_id(), None);
}

#[test]
fn header_tone_tracks_the_hero_bottom() {
    let mut header = HeaderState::new(&TrackerConfig::default());
    let hero = Layout::new(900.0).with("home", 0.0, 900.0);

    header.update(&hero);
    assert_eq!(header.tone(), HeaderTone::OnHero);

    let hero = hero.scrolled(850.0);
    assert!(header.update(&hero));
    assert_eq!(header.tone(), HeaderTone::OnLight);
}
