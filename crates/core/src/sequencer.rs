use crate::{FiredTimer, SessionId, TimerId, TimerQueue, TimerToken};
use std::fmt;
use tracing::trace;

/// A fixed, ordered set of named stages. The last entry of `ORDER` is the
/// terminal stage and must have zero dwell.
pub trait Stage: Copy + Eq + fmt::Debug + 'static {
    const ORDER: &'static [Self];

    fn dwell_ms(self) -> u64;

    fn label(self) -> &'static str;

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|stage| *stage == self)
            .unwrap_or(Self::ORDER.len() - 1)
    }

    fn terminal() -> Self {
        Self::ORDER[Self::ORDER.len() - 1]
    }

    /// Sum of all dwell times, i.e. how long an unskipped run takes.
    fn total_ms() -> u64 {
        Self::ORDER.iter().map(|stage| stage.dwell_ms()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<S> {
    Entered(S),
    Completed,
}

/// Timer-driven walk over a [`Stage`] list.
///
/// Exactly one timer is armed while the sequencer sits on a non-terminal
/// stage. Reaching the terminal stage yields [`Step::Completed`] once; every
/// later timer or skip is ignored.
#[derive(Debug)]
pub struct Sequencer<S: Stage> {
    session: SessionId,
    index: usize,
    entered_at_ms: u64,
    pending: Option<TimerId>,
    visited: Vec<S>,
    transitions: usize,
}

impl<S: Stage> Sequencer<S> {
    pub fn start(session: SessionId, timers: &mut TimerQueue) -> Self {
        let mut seq = Self {
            session,
            index: 0,
            entered_at_ms: timers.now_ms(),
            pending: None,
            visited: vec![S::ORDER[0]],
            transitions: 0,
        };
        seq.arm(timers);
        seq
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn stage(&self) -> S {
        S::ORDER[self.index]
    }

    pub fn is_done(&self) -> bool {
        self.index + 1 == S::ORDER.len()
    }

    pub fn entered_at_ms(&self) -> u64 {
        self.entered_at_ms
    }

    /// Stages entered so far, starting stage included.
    pub fn visited(&self) -> &[S] {
        &self.visited
    }

    pub fn transitions(&self) -> usize {
        self.transitions
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    /// Fraction of the current stage's dwell that has elapsed, in `0.0..=1.0`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let dwell = self.stage().dwell_ms();
        if dwell == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.entered_at_ms);
        (elapsed as f32 / dwell as f32).clamp(0.0, 1.0)
    }

    pub fn on_timer(&mut self, fired: &FiredTimer, timers: &mut TimerQueue) -> Option<Step<S>> {
        if fired.token.session != self.session {
            return None;
        }
        if self.pending != Some(fired.id) || fired.token.stage != self.index {
            trace!(
                session = %self.session,
                stage = fired.token.stage,
                current = self.index,
                "ignoring stale stage timer"
            );
            return None;
        }
        self.pending = None;
        Some(self.enter(self.index + 1, timers))
    }

    pub fn skip(&mut self, timers: &mut TimerQueue) -> Option<Step<S>> {
        if self.is_done() {
            return None;
        }
        self.disarm(timers);
        Some(self.enter(S::ORDER.len() - 1, timers))
    }

    /// Teardown without completion.
    pub fn cancel(&mut self, timers: &mut TimerQueue) {
        self.disarm(timers);
    }

    fn enter(&mut self, index: usize, timers: &mut TimerQueue) -> Step<S> {
        self.index = index;
        self.entered_at_ms = timers.now_ms();
        self.transitions += 1;
        let stage = self.stage();
        self.visited.push(stage);
        if self.is_done() {
            return Step::Completed;
        }
        self.arm(timers);
        Step::Entered(stage)
    }

    fn arm(&mut self, timers: &mut TimerQueue) {
        if self.is_done() {
            return;
        }
        let token = TimerToken {
            session: self.session,
            stage: self.index,
        };
        self.pending = Some(timers.schedule(self.stage().dwell_ms(), token));
    }

    fn disarm(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }
}
