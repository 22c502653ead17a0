//! Virtual-clock timer queue
//!
//! Stage transitions are queued here instead of on platform timers. The host
//! moves the clock forward with elapsed time and the owner drains whatever
//! fell due. Every timer carries a cancel token; a cancelled timer is dropped
//! the next time the queue is inspected and never fires.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag for a group of timers
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a live token
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every timer scheduled with this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether the token was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct Timer<E> {
    due_ms: u64,
    seq: u64,
    token: CancelToken,
    event: E,
}

/// Timer queue keyed on a virtual millisecond clock
#[derive(Debug)]
pub struct Scheduler<E> {
    now_ms: u64,
    next_seq: u64,
    timers: Vec<Timer<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    /// Create an empty queue at time zero
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            timers: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Queue an event `delay_ms` after the current time
    pub fn schedule(&mut self, delay_ms: u64, event: E, token: &CancelToken) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.timers.push(Timer {
            due_ms,
            seq: self.next_seq,
            token: token.clone(),
            event,
        });
        self.next_seq += 1;
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.timers
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .count()
    }

    /// Pop the earliest live timer due at or before `deadline_ms`
    ///
    /// The clock moves to the timer's due time so that anything scheduled in
    /// response is measured from the moment it fired.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<E> {
        self.pop_where(|due| due <= deadline_ms)
    }

    /// Pop the earliest live timer regardless of its due time
    pub fn pop_next(&mut self) -> Option<E> {
        self.pop_where(|_| true)
    }

    /// Move the clock forward to `deadline_ms` without firing anything
    pub fn advance_to(&mut self, deadline_ms: u64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }

    /// Drop every timer
    pub fn clear(&mut self) {
        for timer in &self.timers {
            timer.token.cancel();
        }
        self.timers.clear();
    }

    fn pop_where(&mut self, ready: impl Fn(u64) -> bool) -> Option<E> {
        self.timers.retain(|t| !t.token.is_cancelled());

        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| ready(t.due_ms))
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;

        let timer = self.timers.swap_remove(idx);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        let token = CancelToken::new();
        scheduler.schedule(300, "c", &token);
        scheduler.schedule(100, "a", &token);
        scheduler.schedule(200, "b", &token);

        assert_eq!(scheduler.pop_due(250), Some("a"));
        assert_eq!(scheduler.now(), 100);
        assert_eq!(scheduler.pop_due(250), Some("b"));
        assert_eq!(scheduler.pop_due(250), None);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_same_due_time_keeps_schedule_order() {
        let mut scheduler = Scheduler::new();
        let token = CancelToken::new();
        scheduler.schedule(50, 1, &token);
        scheduler.schedule(50, 2, &token);
        scheduler.schedule(50, 3, &token);

        let fired: Vec<i32> = std::iter::from_fn(|| scheduler.pop_due(50)).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancelled_timers_never_fire() {
        let mut scheduler = Scheduler::new();
        let stale = CancelToken::new();
        let live = CancelToken::new();
        scheduler.schedule(10, "stale", &stale);
        scheduler.schedule(20, "live", &live);

        stale.cancel();
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pop_due(1000), Some("live"));
        assert_eq!(scheduler.pop_due(1000), None);
    }

    #[test]
    fn test_delay_measured_from_fire_time() {
        let mut scheduler = Scheduler::new();
        let token = CancelToken::new();
        scheduler.schedule(500, "first", &token);

        assert_eq!(scheduler.pop_due(3000), Some("first"));
        scheduler.schedule(1000, "second", &token);
        assert_eq!(scheduler.pop_due(1499), None);
        assert_eq!(scheduler.pop_due(1500), Some("second"));
    }

    #[test]
    fn test_advance_and_pop_next() {
        let mut scheduler = Scheduler::new();
        let token = CancelToken::new();
        scheduler.advance_to(40);
        scheduler.schedule(10_000, (), &token);
        assert_eq!(scheduler.pop_due(100), None);
        assert_eq!(scheduler.pop_next(), Some(()));
        assert_eq!(scheduler.now(), 10_040);

        // The clock never runs backwards
        scheduler.advance_to(5);
        assert_eq!(scheduler.now(), 10_040);
    }

    #[test]
    fn test_clear_cancels_tokens() {
        let mut scheduler = Scheduler::new();
        let token = CancelToken::new();
        scheduler.schedule(1, (), &token);
        scheduler.clear();
        assert!(token.is_cancelled());
        assert_eq!(scheduler.pending(), 0);
    }
}
