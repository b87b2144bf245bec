//! Fixed-interval ticker for idle behaviour
//!
//! Converts elapsed wall time into a whole number of ticks. Leftover time is
//! carried to the next call; cancelling drops it so nothing fires after a
//! restart that belongs to the previous run.

use std::time::Duration;

/// Upper bound on ticks released by one `advance`, so a stalled host does not
/// replay minutes of rotation at once
pub const MAX_CATCH_UP_TICKS: u32 = 64;

#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    accumulated: Duration,
    active: bool,
}

impl TickScheduler {
    /// Create a stopped scheduler
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            active: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop ticking and discard partial progress toward the next tick
    pub fn cancel(&mut self) {
        self.active = false;
        self.accumulated = Duration::ZERO;
    }

    /// Feed elapsed time; returns how many ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.active || self.interval.is_zero() {
            return 0;
        }
        self.accumulated = self.accumulated.saturating_add(elapsed);
        let mut ticks = 0;
        while self.accumulated >= self.interval && ticks < MAX_CATCH_UP_TICKS {
            self.accumulated -= self.interval;
            ticks += 1;
        }
        if ticks == MAX_CATCH_UP_TICKS {
            self.accumulated = Duration::ZERO;
        }
        ticks
    }
}
