//! Shared configuration library for Folio.
//!
//! Every timing constant of the hero carousel and every tuning knob of the
//! section tracker lives in one immutable [`FolioConfig`], injected into the
//! controllers at construction. Defaults reproduce the site's shipped
//! behaviour; overrides come from a TOML/JSON file or inline JSON in the
//! environment and are checked by the guard rails in [`validation`].

#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::carousel::{
    AutoplayConfig, CarouselMode, ClampSeconds, GlitchTiming,
    HeroCarouselConfig, HeroCarouselTimings, ModeMultiplier, StaggeredTiming,
    TimingsConfig, TweenTiming,
};
pub use models::tracker::TrackerConfig;
pub use models::{FolioConfig, FolioConfigSource};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
