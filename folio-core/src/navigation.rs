//! Top navigation menu
//!
//! Wraps the [`SectionTracker`] with the menu's own behaviour: which item is
//! highlighted, what a click does, and the mobile dropdown's open state.

use folio_config::TrackerConfig;
use folio_model::{NavItem, NavigationData, SectionId};
use tracing::trace;

use crate::tracker::{FrameRequest, LayoutProbe, SectionTracker};

/// Which rendering of the menu received the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSurface {
    Desktop,
    Mobile,
}

/// History entry pushed when navigating. Only clicks update the url;
/// scrolling never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    /// Bare path, used for the hero section.
    Path,
    /// `#id` fragment.
    Fragment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavCommand {
    pub scroll_to: SectionId,
    pub history: HistoryEntry,
}

#[derive(Debug, Clone)]
pub struct NavigationMenu {
    items: Vec<NavItem>,
    tracker: SectionTracker,
    hero: SectionId,
    mobile_open: bool,
}

impl NavigationMenu {
    pub fn new(navigation: NavigationData, config: &TrackerConfig) -> Self {
        let tracker = SectionTracker::new(navigation.section_ids(), config);
        Self {
            items: navigation.items,
            tracker,
            hero: config.hero_section_id.clone(),
            mobile_open: false,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// An empty menu renders nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }

    pub fn active_id(&self) -> Option<&SectionId> {
        self.tracker.active_id()
    }

    pub fn is_active(&self, item: &NavItem) -> bool {
        self.tracker.is_active(&item.id)
    }

    /// The menu's only notion of "over the hero": the hero section is the
    /// active one.
    pub fn is_on_hero(&self) -> bool {
        self.tracker.is_active(&self.hero)
    }

    pub fn mobile_open(&self) -> bool {
        self.mobile_open
    }

    pub fn toggle_mobile(&mut self) -> bool {
        self.mobile_open = !self.mobile_open;
        self.mobile_open
    }

    pub fn close_mobile(&mut self) {
        self.mobile_open = false;
    }

    pub fn mount(&mut self, probe: &impl LayoutProbe) -> bool {
        self.tracker.mount(probe)
    }

    pub fn unmount(&mut self) {
        self.tracker.unmount();
        self.mobile_open = false;
    }

    pub fn on_scroll(&mut self) -> FrameRequest {
        self.tracker.on_scroll()
    }

    pub fn on_resize(&mut self) -> FrameRequest {
        self.tracker.on_resize()
    }

    pub fn on_animation_frame(&mut self, probe: &impl LayoutProbe) -> bool {
        self.tracker.on_animation_frame(probe)
    }

    /// Handle a click on the item for `id`.
    ///
    /// On desktop, clicking the highlighted item does nothing. On mobile the
    /// dropdown closes after any selection. Unknown ids, and sections that
    /// are not rendered, yield no command, so no history entry is pushed.
    pub fn select(
        &mut self,
        id: &SectionId,
        surface: MenuSurface,
        probe: &impl LayoutProbe,
    ) -> Option<NavCommand> {
        if surface == MenuSurface::Mobile {
            self.close_mobile();
        }
        if !self.items.iter().any(|item| &item.id == id) {
            trace!(%id, "menu selection for unknown section");
            return None;
        }
        if surface == MenuSurface::Desktop && self.tracker.is_active(id) {
            return None;
        }
        if probe.section_rect(id).is_none() {
            trace!(%id, "menu target is not rendered");
            return None;
        }

        let history = if *id == self.hero {
            HistoryEntry::Path
        } else {
            HistoryEntry::Fragment(format!("#{id}"))
        };
        Some(NavCommand {
            scroll_to: id.clone(),
            history,
        })
    }
}
