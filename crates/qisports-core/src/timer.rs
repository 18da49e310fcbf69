//! Timers on the runtime's virtual clock
//!
//! Plain data: a timer firing produces a `(TimerId, OwnerId)` pair that the
//! owner's controller handles. Nothing here holds callbacks.

use std::time::Duration;

use crate::runtime::OwnerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Timeout,
    Interval(Duration),
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    owner: OwnerId,
    due: Duration,
    kind: TimerKind,
}

/// Smallest interval period; keeps a zero period from spinning
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, owner: OwnerId, due: Duration, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, owner, due, kind });
        id
    }

    /// One-shot timer firing `delay` after `now`
    pub fn set_timeout(&mut self, now: Duration, owner: OwnerId, delay: Duration) -> TimerId {
        self.push(owner, now + delay, TimerKind::Timeout)
    }

    /// Repeating timer; the first firing is one full period after `now`
    pub fn set_interval(&mut self, now: Duration, owner: OwnerId, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.push(owner, now + period, TimerKind::Interval(period))
    }

    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn clear_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner);
        before - self.timers.len()
    }

    /// Earliest pending deadline
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    pub fn has_due(&self, now: Duration) -> bool {
        self.timers.iter().any(|t| t.due <= now)
    }

    /// Fire everything due at or before `now`, earliest first
    ///
    /// Intervals are rescheduled one period later and fire at most once per
    /// call; the caller steps the clock to the next deadline for catch-up.
    pub fn pop_due(&mut self, now: Duration) -> Vec<(TimerId, OwnerId)> {
        let mut due: Vec<(Duration, TimerId, OwnerId)> = self
            .timers
            .iter()
            .filter(|t| t.due <= now)
            .map(|t| (t.due, t.id, t.owner))
            .collect();
        due.sort();

        self.timers.retain_mut(|t| {
            if t.due > now {
                return true;
            }
            match t.kind {
                TimerKind::Timeout => false,
                TimerKind::Interval(period) => {
                    t.due += period;
                    true
                }
            }
        });

        due.into_iter().map(|(_, id, owner)| (id, owner)).collect()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Deadline of a pending timer
    pub fn due(&self, id: TimerId) -> Option<Duration> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.due)
    }

    pub fn count_for(&self, owner: OwnerId) -> usize {
        self.timers.iter().filter(|t| t.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::ms;

    #[test]
    fn test_timeout_fires_once() {
        let mut queue = TimerQueue::new();
        let owner = OwnerId::from_raw(1);
        let id = queue.set_timeout(ms(0), owner, ms(1500));
        assert_eq!(queue.next_due(), Some(ms(1500)));
        assert!(queue.pop_due(ms(1499)).is_empty());
        assert_eq!(queue.pop_due(ms(1500)), vec![(id, owner)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_interval_keeps_cadence() {
        let mut queue = TimerQueue::new();
        let owner = OwnerId::from_raw(1);
        let id = queue.set_interval(ms(0), owner, ms(5000));
        assert_eq!(queue.pop_due(ms(5000)), vec![(id, owner)]);
        assert_eq!(queue.due(id), Some(ms(10000)));
        assert_eq!(queue.pop_due(ms(10000)).len(), 1);
        assert!(queue.is_active(id));
    }

    #[test]
    fn test_clear_owner() {
        let mut queue = TimerQueue::new();
        let a = OwnerId::from_raw(1);
        let b = OwnerId::from_raw(2);
        queue.set_interval(ms(0), a, ms(100));
        queue.set_timeout(ms(0), a, ms(100));
        let kept = queue.set_timeout(ms(0), b, ms(100));
        assert_eq!(queue.clear_owner(a), 2);
        assert_eq!(queue.count_for(a), 0);
        assert!(queue.is_active(kept));
    }

    #[test]
    fn test_due_order() {
        let mut queue = TimerQueue::new();
        let owner = OwnerId::from_raw(1);
        let late = queue.set_timeout(ms(0), owner, ms(300));
        let early = queue.set_timeout(ms(0), owner, ms(100));
        let fired: Vec<TimerId> = queue.pop_due(ms(300)).into_iter().map(|(id, _)| id).collect();
        assert_eq!(fired, vec![early, late]);
    }
}
