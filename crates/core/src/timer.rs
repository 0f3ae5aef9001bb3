use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;

/// Source of "now" in milliseconds. The UI samples a monotonic clock; tests
/// and the headless runner step a [`ManualClock`].
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) -> u64 {
        let next = self.now.get().saturating_add(delta_ms);
        self.now.set(next);
        next
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer was scheduled for: a sequencer session and the stage index
/// that was current when it was armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    pub session: SessionId,
    pub stage: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub token: TimerToken,
    pub at_ms: u64,
}

/// Single-shot timers on a virtual timeline.
///
/// Timers fire in `(deadline, id)` order. `pop_due` moves `now` forward to
/// the deadline of the timer it returns, so anything scheduled while handling
/// that timer is measured from the moment it fired, not from the end of the
/// advance window.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<(u64, TimerId), TimerToken>,
}

impl TimerQueue {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: start_ms,
            ..Self::default()
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, token: TimerToken) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deadline = self.now_ms.saturating_add(delay_ms);
        self.pending.insert((deadline, id), token);
        id
    }

    /// Returns false when the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, tid)| *tid == id).copied();
        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.keys().any(|(_, tid)| *tid == id)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn pop_due(&mut self, until_ms: u64) -> Option<FiredTimer> {
        let (&(deadline, id), _) = self.pending.iter().next()?;
        if deadline > until_ms {
            return None;
        }
        let token = self.pending.remove(&(deadline, id))?;
        self.now_ms = self.now_ms.max(deadline);
        Some(FiredTimer {
            id,
            token,
            at_ms: deadline,
        })
    }

    /// Moves `now` to `until_ms` once every due timer has been popped.
    /// Time never runs backwards.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
