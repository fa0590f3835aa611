//! Injected time source and timer values
//!
//! Nothing in the simulation reads a wall clock. Every timed behavior gets
//! `now` passed in, so tests can step time by hand.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;

/// Monotonic milliseconds since the start of a run
pub type Millis = u64;

/// A started countdown: finished once `duration` has elapsed since `started_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub started_at: Millis,
    pub duration: Millis,
}

impl Timer {
    pub fn start(now: Millis, duration: Millis) -> Self {
        Self {
            started_at: now,
            duration,
        }
    }

    /// Time since the timer started (saturates at zero if `now` is earlier)
    #[inline]
    pub fn elapsed(&self, now: Millis) -> Millis {
        now.saturating_sub(self.started_at)
    }

    #[inline]
    pub fn is_finished(&self, now: Millis) -> bool {
        self.elapsed(now) >= self.duration
    }

    pub fn remaining(&self, now: Millis) -> Millis {
        self.duration.saturating_sub(self.elapsed(now))
    }
}

/// Fixed-step clock for driving the simulation at `TICKS_PER_SECOND`
///
/// Tracks whole milliseconds plus the fractional remainder so that exactly
/// 1000 ms pass every 60 ticks.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Millis,
    ticks: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> Millis {
        self.now
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one tick and return the new time
    pub fn advance(&mut self) -> Millis {
        self.ticks += 1;
        self.now = self.ticks * 1000 / u64::from(TICKS_PER_SECOND);
        self.now
    }
}
