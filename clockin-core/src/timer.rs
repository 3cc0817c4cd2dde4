use std::time::{Duration, Instant};

/// A cancellable one-shot task.
///
/// Scheduling while already armed replaces the pending deadline, so at most one firing
/// is ever outstanding. A deadline beyond what `Instant` can represent never fires.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    pub fn schedule(&mut self, now: Instant, after: Duration) {
        self.due = now.checked_add(after);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// Time left until the deadline, zero once due, `None` when disarmed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-period ticker, re-armed from the poll that observed it.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, last: now }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }
}
