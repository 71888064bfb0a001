use itertools::Itertools;
use tokio::time::Instant;

/// Deferred work of the query panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Restart the caret blink if `token` is still the expected one.
    ResumeBlink(u64),
}

/// Pending deadlines on tokio's clock.
///
/// Scheduled tasks are never cancelled; whoever fires them decides whether
/// they are still relevant.
#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<(Instant, TimerTask)>,
}

impl Timers {
    pub fn schedule(&mut self, deadline: Instant, task: TimerTask) {
        self.pending.push((deadline, task));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerTask> {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|(deadline, _)| *deadline <= now);
        self.pending = pending;
        due.into_iter()
            .sorted_by_key(|(deadline, _)| *deadline)
            .map(|(_, task)| task)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
