use std::time::{Duration, Instant};

use folio_config::{CarouselMode, HeroCarouselConfig, HeroCarouselTimings};
use folio_model::HeroCard;
use tracing::{debug, trace};

use super::types::{CarouselEvent, Step, TransitionPhase};
use crate::background::{BackgroundTrack, GlitchFrame};
use crate::text::{ElementStyle, TextTrack};
use crate::timer::{Due, TimerId, TimerQueue};

const TEXT_ELEMENTS: usize = HeroCard::TEXT_ELEMENTS;

/// Floor for the autoplay period, for frame intervals configured down to zero.
const MIN_AUTOPLAY_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug)]
struct Transition {
    from: usize,
    to: usize,
    started_at: Instant,
    steps: Vec<TimerId>,
}

/// Hero carousel controller.
///
/// Invariants:
/// - at most one transition is in flight; requests arriving while the latch
///   is set are dropped, never queued
/// - `active_index` only changes at the content-swap step of a transition
///   (or when the card collection is replaced)
/// - every pending step is a handle in the controller's own timer queue, so
///   [`teardown`](Self::teardown) leaves nothing behind
#[derive(Debug)]
pub struct CarouselController {
    cards: Vec<HeroCard>,
    config: HeroCarouselConfig,
    mode: CarouselMode,
    timings: HeroCarouselTimings,
    active_index: usize,
    phase: TransitionPhase,
    transition: Option<Transition>,
    background: BackgroundTrack,
    glitch_steps: Vec<TimerId>,
    text: Option<TextTrack>,
    timers: TimerQueue<Step>,
    autoplay: Option<TimerId>,
    resume: Option<TimerId>,
    outbox: Vec<CarouselEvent>,
    mounted: bool,
}

impl CarouselController {
    /// Mount a controller: the first card starts its entrance at `now` and
    /// autoplay is armed when there is more than one card.
    pub fn new(
        cards: Vec<HeroCard>,
        config: HeroCarouselConfig,
        mode: CarouselMode,
        now: Instant,
    ) -> Self {
        let timings = config.timings(mode);
        let mut controller = Self {
            cards: Vec::new(),
            config,
            mode,
            timings,
            active_index: 0,
            phase: TransitionPhase::Idle,
            transition: None,
            background: BackgroundTrack::default(),
            glitch_steps: Vec::new(),
            text: None,
            timers: TimerQueue::new(),
            autoplay: None,
            resume: None,
            outbox: Vec::new(),
            mounted: true,
        };
        controller.install_cards(cards, now);
        controller.start_autoplay(now);
        controller
    }

    // ===== Queries =====

    pub fn cards(&self) -> &[HeroCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// `None` when there are no cards; the hero then renders nothing.
    pub fn active_card(&self) -> Option<&HeroCard> {
        self.cards.get(self.active_index)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Target of the in-flight transition.
    pub fn pending_target(&self) -> Option<usize> {
        self.transition.as_ref().map(|t| t.to)
    }

    /// Start time of the in-flight transition.
    pub fn transition_started_at(&self) -> Option<Instant> {
        self.transition.as_ref().map(|t| t.started_at)
    }

    pub fn mode(&self) -> CarouselMode {
        self.mode
    }

    pub fn timings(&self) -> &HeroCarouselTimings {
        &self.timings
    }

    pub fn background(&self) -> &BackgroundTrack {
        &self.background
    }

    pub fn glitch_frame(&self, now: Instant) -> GlitchFrame {
        self.background.frame(now, &self.timings)
    }

    pub fn text_track(&self) -> Option<&TextTrack> {
        self.text.as_ref()
    }

    /// Per-element text styles at `now`; empty when there are no cards.
    pub fn text_styles(&self, now: Instant) -> Vec<ElementStyle> {
        self.text.map(|track| track.sample(now)).unwrap_or_default()
    }

    pub fn autoplay_armed(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn autoplay_deadline(&self) -> Option<Instant> {
        self.autoplay.and_then(|id| self.timers.deadline(id))
    }

    pub fn resume_pending(&self) -> bool {
        self.resume.is_some()
    }

    /// Earliest pending step; the host should call [`advance`](Self::advance)
    /// no later than this.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ===== Commands =====

    /// Start a transition to `target`.
    ///
    /// Returns `false` without touching any state when there are no cards,
    /// `target` is out of range or already active, or a transition is in
    /// flight.
    pub fn go_to(&mut self, target: usize, now: Instant) -> bool {
        if !self.mounted || self.cards.is_empty() {
            return false;
        }
        if target >= self.cards.len() {
            trace!(target, len = self.cards.len(), "go_to out of range");
            return false;
        }
        if target == self.active_index {
            trace!(target, "go_to ignored: card already active");
            return false;
        }
        if self.transition.is_some() {
            trace!(target, "go_to dropped: transition in flight");
            return false;
        }

        let from = self.active_index;
        let t = self.timings;

        if self.background.glitch_to(target, now) {
            self.glitch_steps = vec![
                self.timers.schedule(now + t.bg_swap_at, Step::BackgroundSwap),
                self.timers
                    .schedule(now + t.glitch_settle_at, Step::BackgroundSettle),
                self.timers
                    .schedule(now + t.glitch_duration, Step::BackgroundFinish),
            ];
        }

        self.text = Some(TextTrack::exit(now, t.text_out, TEXT_ELEMENTS));
        let steps = vec![
            self.timers
                .schedule(now + t.content_switch_at, Step::ContentSwap),
            self.timers.schedule(
                now + t.text_timeline_end(TEXT_ELEMENTS),
                Step::ExitComplete,
            ),
        ];

        self.transition = Some(Transition {
            from,
            to: target,
            started_at: now,
            steps,
        });
        self.phase = TransitionPhase::ExitingOut;

        debug!(from, to = target, "carousel transition started");
        self.outbox.push(CarouselEvent::TransitionStarted {
            from,
            to: target,
            at: now,
        });
        true
    }

    /// Advance to the following card, wrapping at the end.
    pub fn next(&mut self, now: Instant) -> bool {
        let len = self.cards.len();
        if len <= 1 {
            return false;
        }
        self.go_to((self.active_index + 1) % len, now)
    }

    /// Step back to the preceding card, wrapping at the start.
    pub fn previous(&mut self, now: Instant) -> bool {
        let len = self.cards.len();
        if len <= 1 {
            return false;
        }
        self.go_to((self.active_index + len - 1) % len, now)
    }

    /// Manual navigation: pause autoplay, jump, and resume autoplay after the
    /// configured grace delay whether or not the jump was accepted.
    pub fn select(&mut self, target: usize, now: Instant) -> bool {
        self.stop_autoplay();
        let started = self.go_to(target, now);
        if self.mounted && self.cards.len() > 1 {
            let at = now + self.timings.manual_resume_grace;
            self.resume = Some(self.timers.schedule(at, Step::ResumeAutoplay));
        }
        started
    }

    /// (Re-)arm the autoplay interval from `now`. Never armed for fewer than
    /// two cards.
    pub fn start_autoplay(&mut self, now: Instant) -> bool {
        self.stop_autoplay();
        if !self.mounted || self.cards.len() <= 1 {
            return false;
        }
        let delay = self.autoplay_period();
        self.autoplay = Some(self.timers.schedule(now + delay, Step::AutoplayTick));
        debug!(?delay, mode = %self.mode, "autoplay armed");
        true
    }

    /// Disarm autoplay, including a pending post-selection resume.
    pub fn stop_autoplay(&mut self) {
        if let Some(id) = self.autoplay.take() {
            self.timers.cancel(id);
            trace!("autoplay disarmed");
        }
        if let Some(id) = self.resume.take() {
            self.timers.cancel(id);
        }
    }

    /// Switch autoplay pacing. A running interval restarts with the new
    /// period.
    pub fn set_mode(&mut self, mode: CarouselMode, now: Instant) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.timings = self.config.timings(mode);
        if self.autoplay.is_some() {
            self.start_autoplay(now);
        }
    }

    /// Replace the card collection. Any in-flight transition is abandoned.
    /// The active index is kept while it is still in range, otherwise the
    /// first card becomes active. Autoplay restarts when the number of cards
    /// changed.
    pub fn set_cards(&mut self, cards: Vec<HeroCard>, now: Instant) {
        if !self.mounted {
            return;
        }
        let size_changed = cards.len() != self.cards.len();
        self.abandon_transition();
        self.install_cards(cards, now);
        if size_changed {
            self.start_autoplay(now);
        }
    }

    /// Fire every step due at or before `now`, in deadline order, and return
    /// what happened since the last call.
    pub fn advance(&mut self, now: Instant) -> Vec<CarouselEvent> {
        if self.mounted {
            while let Some(due) = self.timers.pop_due(now) {
                self.fire(due);
            }
        }
        self.take_events()
    }

    /// Drain events produced by direct commands without advancing time.
    pub fn take_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Unmount: cancel every pending step. The visible state is frozen and
    /// further commands are ignored.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        let cancelled = self.timers.len();
        self.timers.clear();
        self.autoplay = None;
        self.resume = None;
        self.glitch_steps.clear();
        if let Some(transition) = self.transition.as_mut() {
            transition.steps.clear();
        }
        self.outbox.clear();
        self.mounted = false;
        debug!(cancelled, "carousel torn down");
    }

    // ===== Internals =====

    fn install_cards(&mut self, cards: Vec<HeroCard>, now: Instant) {
        self.cards = cards;
        if self.active_index >= self.cards.len() {
            self.active_index = 0;
        }
        if self.cards.is_empty() {
            self.background.reset(None);
            self.text = None;
        } else {
            self.background.reset(Some(self.active_index));
            self.text = Some(TextTrack::enter(
                now,
                self.timings.text_in,
                TEXT_ELEMENTS,
            ));
        }
    }

    fn abandon_transition(&mut self) {
        if let Some(transition) = self.transition.take() {
            for id in transition.steps {
                self.timers.cancel(id);
            }
            debug!(
                from = transition.from,
                to = transition.to,
                "carousel transition abandoned"
            );
        }
        for id in self.glitch_steps.drain(..) {
            self.timers.cancel(id);
        }
        self.phase = TransitionPhase::Idle;
    }

    fn fire(&mut self, due: Due<Step>) {
        let at = due.at;
        match due.kind {
            Step::AutoplayTick => {
                // Interval semantics: the next tick is due one period after
                // this one, whatever happens to this tick.
                let period = self.autoplay_period();
                self.autoplay =
                    Some(self.timers.schedule(at + period, Step::AutoplayTick));
                if self.is_animating() {
                    trace!("autoplay tick dropped: transition in flight");
                    self.outbox.push(CarouselEvent::AutoplaySkipped { at });
                } else {
                    self.outbox.push(CarouselEvent::AutoplayTick { at });
                    self.next(at);
                }
            }
            Step::ResumeAutoplay => {
                self.resume = None;
                if self.start_autoplay(at) {
                    self.outbox.push(CarouselEvent::AutoplayResumed { at });
                }
            }
            Step::BackgroundSwap => {
                if let Some(index) = self.background.swap() {
                    self.outbox
                        .push(CarouselEvent::BackgroundSwapped { index, at });
                }
            }
            Step::BackgroundSettle => self.background.settle(),
            Step::BackgroundFinish => {
                self.background.finish();
                self.glitch_steps.clear();
                self.outbox.push(CarouselEvent::BackgroundSettled { at });
            }
            Step::ContentSwap => {
                let Some(to) = self.pending_target() else {
                    return;
                };
                self.active_index = to;
                self.phase = TransitionPhase::ContentSwapped;
                self.text =
                    Some(TextTrack::enter(at, self.timings.text_in, TEXT_ELEMENTS));
                if self.background.shown() != Some(to) {
                    self.background.sync(to);
                }
                debug!(index = to, "carousel content swapped");
                self.outbox
                    .push(CarouselEvent::ContentSwapped { index: to, at });
            }
            Step::ExitComplete => {
                self.phase = TransitionPhase::SettlingIn;
                let release = self
                    .timers
                    .schedule(at + self.frame_interval(), Step::ReleaseLatch);
                if let Some(transition) = self.transition.as_mut() {
                    transition.steps.push(release);
                }
                self.outbox.push(CarouselEvent::ExitCompleted { at });
            }
            Step::ReleaseLatch => {
                if self.transition.take().is_some() {
                    self.phase = TransitionPhase::Idle;
                    debug!(index = self.active_index, "carousel transition finished");
                    self.outbox.push(CarouselEvent::TransitionFinished {
                        index: self.active_index,
                        at,
                    });
                }
            }
        }
    }

    fn frame_interval(&self) -> Duration {
        self.timings.frame_interval
    }

    /// Never shorter than one frame, so a tick cannot reschedule itself at
    /// the instant it fired.
    fn autoplay_period(&self) -> Duration {
        self.timings
            .autoplay_delay
            .max(self.frame_interval())
            .max(MIN_AUTOPLAY_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{CardId, Cta, CtaAction};

    fn cards(n: usize) -> Vec<HeroCard> {
        (0..n)
            .map(|i| HeroCard {
                id: CardId::new(format!("card-{i}")),
                audience: String::new(),
                title: format!("Card {i}"),
                text: Vec::new(),
                cta: Cta {
                    label: "More".into(),
                    action: CtaAction::Scroll {
                        target: "services".into(),
                    },
                },
                background: Vec::new(),
            })
            .collect()
    }

    fn controller(n: usize, now: Instant) -> CarouselController {
        CarouselController::new(
            cards(n),
            HeroCarouselConfig::default(),
            CarouselMode::Default,
            now,
        )
    }

    #[test]
    fn phases_follow_the_timeline() {
        let t0 = Instant::now();
        let mut c = controller(3, t0);
        let ms = Duration::from_millis;

        assert!(c.go_to(2, t0));
        assert_eq!(c.phase(), TransitionPhase::ExitingOut);

        c.advance(t0 + ms(150));
        assert_eq!(c.active_index(), 0, "swap happens at 180ms");
        assert_eq!(c.background().shown(), Some(2), "background swaps at 110ms");

        c.advance(t0 + ms(180));
        assert_eq!(c.phase(), TransitionPhase::ContentSwapped);
        assert_eq!(c.active_index(), 2);

        c.advance(t0 + ms(440));
        assert_eq!(c.phase(), TransitionPhase::SettlingIn);
        assert!(c.is_animating());

        c.advance(t0 + ms(460));
        assert_eq!(c.phase(), TransitionPhase::Idle);
        assert!(!c.is_animating());
    }

    #[test]
    fn events_are_reported_in_order() {
        let t0 = Instant::now();
        let mut c = controller(2, t0);

        c.go_to(1, t0);
        let events = c.advance(t0 + Duration::from_secs(1));
        let kinds: Vec<_> = events.iter().map(std::mem::discriminant).collect();
        let expected = [
            CarouselEvent::TransitionStarted { from: 0, to: 1, at: t0 },
            CarouselEvent::BackgroundSwapped { index: 1, at: t0 },
            CarouselEvent::ContentSwapped { index: 1, at: t0 },
            CarouselEvent::BackgroundSettled { at: t0 },
            CarouselEvent::ExitCompleted { at: t0 },
            CarouselEvent::TransitionFinished { index: 1, at: t0 },
        ]
        .iter()
        .map(std::mem::discriminant)
        .collect::<Vec<_>>();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn mode_change_rearms_running_autoplay() {
        let t0 = Instant::now();
        let mut c = controller(2, t0);
        assert_eq!(c.autoplay_deadline(), Some(t0 + Duration::from_secs(10)));

        let t1 = t0 + Duration::from_secs(4);
        c.set_mode(CarouselMode::Reading, t1);
        assert_eq!(c.autoplay_deadline(), Some(t1 + Duration::from_secs(30)));
    }

    #[test]
    fn replacing_cards_abandons_the_transition() {
        let t0 = Instant::now();
        let mut c = controller(3, t0);
        c.go_to(1, t0);

        c.set_cards(cards(2), t0 + Duration::from_millis(50));
        assert!(!c.is_animating());
        assert_eq!(c.phase(), TransitionPhase::Idle);
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.pending_timers(), 1, "only the fresh autoplay tick");
    }

    #[test]
    fn replacing_cards_keeps_an_index_still_in_range() {
        let t0 = Instant::now();
        let mut c = controller(3, t0);
        c.go_to(2, t0);
        c.advance(t0 + Duration::from_secs(1));
        assert_eq!(c.active_index(), 2);

        c.set_cards(cards(3), t0 + Duration::from_secs(2));
        assert_eq!(c.active_index(), 2);
        assert_eq!(c.background().shown(), Some(2));

        c.set_cards(cards(2), t0 + Duration::from_secs(3));
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.background().shown(), Some(0));
    }

    #[test]
    fn previous_wraps_to_the_last_card() {
        let t0 = Instant::now();
        let mut c = controller(4, t0);
        assert!(c.previous(t0));
        assert_eq!(c.pending_target(), Some(3));
    }
}
