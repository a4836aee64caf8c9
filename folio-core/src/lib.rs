//! Folio landing-page behaviour
//!
//! Two independent pieces drive the landing page:
//!
//! - [`carousel`]: the hero carousel, a timer-driven state machine that
//!   serialises card transitions (staggered text exit and entrance plus a
//!   glitch background swap) and paces autoplay by reading mode.
//! - [`tracker`]: the scroll-aware active-section tracker behind the
//!   navigation highlight, plus the [`header`] tone and [`navigation`] menu
//!   built on the same layout probe.
//!
//! Everything here is sans-IO. Operations take the current time explicitly
//! and the host calls `advance` when [`CarouselController::next_deadline`]
//! passes; [`driver`] does that on a tokio task.

#![allow(missing_docs)]

pub mod background;
pub mod carousel;
pub mod cta;
pub mod driver;
pub mod header;
pub mod navigation;
pub mod text;
pub mod timer;
pub mod tracker;
pub mod tween;

pub use background::{BackgroundTrack, GlitchFrame, GlitchPhase};
pub use carousel::{CarouselController, CarouselEvent, TransitionPhase};
pub use cta::{CtaCommand, dispatch as dispatch_cta};
pub use driver::{CarouselDriver, DriverCommand, DriverError};
pub use header::{HeaderState, HeaderTone};
pub use navigation::{HistoryEntry, MenuSurface, NavCommand, NavigationMenu};
pub use text::{ElementStyle, TextMotion, TextTrack};
pub use timer::{TimerId, TimerQueue};
pub use tracker::{
    FrameRequest, LayoutProbe, SectionRect, SectionTracker, resolve_active,
};
pub use tween::{Easing, Tween};
