//! Hero carousel
//!
//! A sans-IO controller for the hero section: it owns the active card, an
//! autoplay interval and the two-track transition (text exit/entrance plus
//! background glitch). The host passes the current time into every call and
//! drives pending steps with [`CarouselController::advance`]; the
//! [`driver`](crate::driver) module does this on a tokio task.

pub mod controller;
pub mod types;

pub use controller::CarouselController;
pub use types::{CarouselEvent, TransitionPhase};
