//! Cancellable one-shot delay, polled from the frame loop.

use web_time::{Duration, Instant};

/// Settle time after a font family change before resampling again; web
/// fonts keep swapping in for a while after the family is set.
pub const FONT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// One-shot timer. Re-arming replaces the previous deadline.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SettleTimer {
    /// Disarmed timer with the given delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start (or restart) the delay from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once, on the first poll at or after the
    /// deadline, and disarms.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for SettleTimer {
    fn default() -> Self {
        Self::new(FONT_SETTLE_DELAY)
    }
}
