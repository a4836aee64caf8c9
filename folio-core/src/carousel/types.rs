//! Shared types for the hero carousel

use std::time::Instant;

/// Where the controller is in a card transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// No transition in flight; `go_to` is accepted.
    #[default]
    Idle,
    /// Outgoing text is leaving and the background is perturbing. The old
    /// card is still the active one.
    ExitingOut,
    /// The target card is active and its entrance has started, on top of the
    /// tail of the old card's exit.
    ContentSwapped,
    /// The text timeline is complete; the latch is released on the next frame.
    SettlingIn,
}

/// Observable effects of the controller, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    TransitionStarted { from: usize, to: usize, at: Instant },
    BackgroundSwapped { index: usize, at: Instant },
    ContentSwapped { index: usize, at: Instant },
    ExitCompleted { at: Instant },
    TransitionFinished { index: usize, at: Instant },
    BackgroundSettled { at: Instant },
    /// An autoplay tick advanced the carousel.
    AutoplayTick { at: Instant },
    /// An autoplay tick arrived mid-transition and was dropped.
    AutoplaySkipped { at: Instant },
    /// Autoplay re-armed after the grace delay following a manual selection.
    AutoplayResumed { at: Instant },
}

impl CarouselEvent {
    pub fn at(&self) -> Instant {
        match *self {
            Self::TransitionStarted { at, .. }
            | Self::BackgroundSwapped { at, .. }
            | Self::ContentSwapped { at, .. }
            | Self::ExitCompleted { at }
            | Self::TransitionFinished { at, .. }
            | Self::BackgroundSettled { at }
            | Self::AutoplayTick { at }
            | Self::AutoplaySkipped { at }
            | Self::AutoplayResumed { at } => at,
        }
    }
}

/// Scheduled controller steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    AutoplayTick,
    ResumeAutoplay,
    BackgroundSwap,
    BackgroundSettle,
    BackgroundFinish,
    ContentSwap,
    ExitComplete,
    ReleaseLatch,
}
