//! Deadline queue owned by a controller.
//!
//! Every pending step of a controller (autoplay ticks, transition steps,
//! deferred resumes) lives here under a [`TimerId`] the controller keeps.
//! Cancelling a handle removes the step outright; there is no ambient timer
//! registry that could fire after teardown.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::time::Instant;

use priority_queue::PriorityQueue;

/// Handle to a scheduled step. Ids are never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A step whose deadline has passed, removed from the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<K> {
    pub id: TimerId,
    pub at: Instant,
    pub kind: K,
}

/// Min-deadline queue. Steps sharing a deadline fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<K> {
    // Priority is (deadline, id) reversed so the earliest pops first.
    queue: PriorityQueue<TimerId, Reverse<(Instant, TimerId)>>,
    kinds: HashMap<TimerId, K>,
    next_id: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            kinds: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn schedule(&mut self, at: Instant, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(id, Reverse((at, id)));
        self.kinds.insert(id, kind);
        id
    }

    /// Remove a pending step. Returns its kind if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        self.queue.remove(&id);
        self.kinds.remove(&id)
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.kinds.contains_key(&id)
    }

    /// Deadline of `id`, if it is still pending.
    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.queue.get_priority(&id).map(|Reverse((at, _))| *at)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.peek().map(|(_, Reverse((at, _)))| *at)
    }

    /// Pop the earliest step if its deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Due<K>> {
        let at = self.next_deadline()?;
        if at > now {
            return None;
        }
        let (id, _) = self.queue.pop()?;
        let kind = self.kinds.remove(&id)?;
        Some(Due { id, at, kind })
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.kinds.clear();
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pops_in_deadline_then_scheduling_order() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule(t0 + Duration::from_millis(30), "late");
        timers.schedule(t0 + Duration::from_millis(10), "first");
        timers.schedule(t0 + Duration::from_millis(10), "second");

        let now = t0 + Duration::from_millis(50);
        let order: Vec<_> =
            std::iter::from_fn(|| timers.pop_due(now).map(|due| due.kind))
                .collect();
        assert_eq!(order, vec!["first", "second", "late"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn nothing_pops_before_its_deadline() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let id = timers.schedule(t0 + Duration::from_secs(1), ());

        assert!(timers.pop_due(t0).is_none());
        assert_eq!(timers.deadline(id), Some(t0 + Duration::from_secs(1)));
        assert_eq!(timers.next_deadline(), Some(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn cancelled_steps_never_fire() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let keep = timers.schedule(t0, 1);
        let dropped = timers.schedule(t0, 2);

        assert_eq!(timers.cancel(dropped), Some(2));
        assert_eq!(timers.cancel(dropped), None);
        assert!(timers.contains(keep));

        let due = timers.pop_due(t0).expect("kept step");
        assert_eq!(due.kind, 1);
        assert!(timers.pop_due(t0).is_none());
    }
}
