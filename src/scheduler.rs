//! Debounced analysis trigger
//!
//! Delayed-debounce policy: every qualifying text change cancels the pending trigger and
//! schedules a new one after a quiet period. The trigger fires only when no further
//! qualifying change arrives before the deadline. The caller polls [`Debouncer::poll_due`]
//! from its event loop.

use std::time::{Duration, Instant};

/// Default quiet period before analysis
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Default minimum number of words for a change to qualify
pub const DEFAULT_MIN_WORDS: usize = 3;

/// Scheduler decision for one text change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Too little text; displayed suggestions should be cleared
    Suppress,
    ScheduleDelayed,
    /// Quiet period is zero, trigger immediately
    FireNow,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    min_words: usize,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD, DEFAULT_MIN_WORDS)
    }
}

impl Debouncer {
    pub fn new(quiet_period: Duration, min_words: usize) -> Self {
        Self {
            quiet_period,
            min_words,
            deadline: None,
        }
    }

    /// Whether `text` has enough words to be analysed
    pub fn qualifies(&self, text: &str) -> bool {
        text.split_whitespace().count() >= self.min_words
    }

    pub fn on_text_changed(&mut self, text: &str) -> TriggerDecision {
        self.on_text_changed_at(text, Instant::now())
    }

    /// Record a text change that happened at `now`
    pub fn on_text_changed_at(&mut self, text: &str, now: Instant) -> TriggerDecision {
        self.deadline = None;
        if !self.qualifies(text) {
            return TriggerDecision::Suppress;
        }
        if self.quiet_period.is_zero() {
            return TriggerDecision::FireNow;
        }
        self.deadline = Some(now + self.quiet_period);
        TriggerDecision::ScheduleDelayed
    }

    /// Returns true exactly once when the pending deadline has passed
    pub fn poll_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
