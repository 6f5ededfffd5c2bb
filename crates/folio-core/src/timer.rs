#![forbid(unsafe_code)]

//! Deterministic, host-driven timers.
//!
//! The page never blocks and never reads a wall clock. The host advances a
//! [`DeterministicClock`] explicitly and the [`TimerQueue`] hands back the
//! tasks that became due, in `(deadline, insertion)` order. This stands in for
//! `setTimeout`/`setInterval` and makes every delayed transition testable.

use core::time::Duration;
use std::collections::BTreeMap;

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Time never moves backwards.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TimerId,
    task: T,
    /// `Some` for repeating timers.
    every: Option<Duration>,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    /// The deadline it was scheduled for, which may be earlier than "now".
    pub deadline: Duration,
    pub task: T,
}

/// Ordered queue of pending one-shot and repeating timers.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    /// Keyed by `(deadline, sequence)` so equal deadlines keep insertion order.
    entries: BTreeMap<(Duration, u64), Entry<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once, `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) -> TimerId {
        self.insert(now.saturating_add(delay), task, None)
    }

    /// Run `task` every `interval` starting one interval after `now`.
    ///
    /// A zero interval is clamped to one millisecond so a repeating timer can
    /// never starve the queue.
    pub fn schedule_repeating(&mut self, now: Duration, interval: Duration, task: T) -> TimerId {
        let interval = interval.max(Duration::from_millis(1));
        self.insert(now.saturating_add(interval), task, Some(interval))
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self
            .entries
            .iter()
            .find(|(_, entry)| entry.id == id)
            .map(|(key, _)| *key);
        match key {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Repeating timers are re-armed before being returned, keeping their id,
    /// so a task may cancel its own timer while handling the tick.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<T>> {
        let (&(deadline, _), _) = self.entries.first_key_value()?;
        if deadline > now {
            return None;
        }
        let (_, entry) = self.entries.pop_first()?;
        if let Some(every) = entry.every {
            let seq = self.bump_seq();
            self.entries.insert(
                (deadline.saturating_add(every), seq),
                Entry {
                    id: entry.id,
                    task: entry.task.clone(),
                    every: Some(every),
                },
            );
        }
        Some(Fired {
            id: entry.id,
            deadline,
            task: entry.task,
        })
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first_key_value().map(|(&(deadline, _), _)| deadline)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, deadline: Duration, task: T, every: Option<Duration>) -> TimerId {
        let seq = self.bump_seq();
        let id = TimerId(seq);
        self.entries.insert((deadline, seq), Entry { id, task, every });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
