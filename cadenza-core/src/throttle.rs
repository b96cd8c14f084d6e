//! Leading-edge throttling for UI event handlers.

use std::time::{Duration, Instant};

/// Admits at most one call per configured interval, dropping the rest.
///
/// The first call fires immediately; calls arriving before the interval has
/// elapsed are dropped, not queued. Each instance keeps its own timing state,
/// so distinct throttles never interact.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    /// Create a throttle with the given minimum interval between calls.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Returns `true` when the call is admitted.
    pub fn try_fire(&mut self) -> bool {
        self.try_fire_at(Instant::now())
    }

    fn try_fire_at(&mut self, now: Instant) -> bool {
        match self.last_fired {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }
}
