//! Virtual-clock timer queue.
//!
//! The host owns real time and feeds elapsed milliseconds in; the queue
//! hands back due events one at a time. Events are keyed by
//! `(due, id)` so equal deadlines fire in the order they were scheduled.
//! Every event has a `TimerHandle` that can cancel it before it fires.

use std::collections::BTreeMap;

/// Handle to one pending event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    due: u64,
    id: u64,
}

impl TimerHandle {
    /// Absolute virtual time at which the event fires.
    pub fn due(&self) -> u64 {
        self.due
    }
}

pub struct Scheduler<E> {
    now: u64,
    next_id: u64,
    pending: BTreeMap<(u64, u64), E>,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `event` to fire `delay_ms` after the current virtual time.
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerHandle {
        let handle = TimerHandle {
            due: self.now.saturating_add(delay_ms),
            id: self.next_id,
        };
        self.next_id += 1;
        self.pending.insert((handle.due, handle.id), event);
        handle
    }

    /// Drop a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&(handle.due, handle.id)).is_some()
    }

    /// Drop every pending event, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Pop the earliest event due at or before `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: u64) -> Option<E> {
        let &(due, _) = self.pending.keys().next()?;
        if due > until {
            return None;
        }
        let (_, event) = self.pending.pop_first()?;
        self.now = self.now.max(due);
        Some(event)
    }

    /// Move the clock forward to `until` once no more events are due.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>, until: u64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(e) = s.pop_due(until) {
            fired.push(e);
        }
        s.settle(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(500, "c");
        s.schedule(100, "a");
        s.schedule(300, "b");
        assert_eq!(drain(&mut s, 1000), vec!["a", "b", "c"]);
        assert_eq!(s.now(), 1000);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(200, "first");
        s.schedule(200, "second");
        assert_eq!(drain(&mut s, 200), vec!["first", "second"]);
    }

    #[test]
    fn test_only_due_events_fire() {
        let mut s = Scheduler::new();
        s.schedule(100, "early");
        s.schedule(900, "late");
        assert_eq!(drain(&mut s, 500), vec!["early"]);
        assert_eq!(s.len(), 1);
        assert_eq!(drain(&mut s, 900), vec!["late"]);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut s = Scheduler::new();
        drain(&mut s, 1000);
        let h = s.schedule(250, "x");
        assert_eq!(h.due(), 1250);
        assert!(drain(&mut s, 1249).is_empty());
        assert_eq!(drain(&mut s, 1250), vec!["x"]);
    }

    #[test]
    fn test_cancel_single() {
        let mut s = Scheduler::new();
        let h = s.schedule(100, "gone");
        s.schedule(200, "kept");
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert_eq!(drain(&mut s, 300), vec!["kept"]);
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Scheduler::new();
        s.schedule(1, "a");
        s.schedule(2, "b");
        assert_eq!(s.cancel_all(), 2);
        assert!(s.is_empty());
        assert!(drain(&mut s, 10).is_empty());
    }
}
