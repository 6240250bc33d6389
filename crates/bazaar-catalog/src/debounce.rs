use std::time::{Duration, Instant};

/// Coalesces bursts of input into one action.
///
/// The caller supplies the current instant; nothing here sleeps or spawns.
/// Each [`schedule`](Self::schedule) pushes the deadline out to
/// `now + wait`, and [`fire`](Self::fire) reports `true` once after the
/// deadline passes.
#[derive(Clone, Debug)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    /// `true` exactly once per schedule, at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
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

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
