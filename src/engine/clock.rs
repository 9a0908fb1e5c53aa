//! Virtual playback clock.
//!
//! The controller never reads wall time. Drivers (tokio, the TUI loop,
//! tests) push elapsed time in, which keeps playback deterministic.

use serde::{Deserialize, Serialize};

use crate::engine::PlaybackTime;

/// Monotonic virtual clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackClock {
    /// Current time.
    current: PlaybackTime,
    /// Number of times the clock moved forward.
    ticks: u64,
}

impl PlaybackClock {
    /// Create a clock at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: PlaybackTime::ZERO,
            ticks: 0,
        }
    }

    /// Get current time.
    #[must_use]
    pub const fn now(&self) -> PlaybackTime {
        self.current
    }

    /// Get how often the clock moved forward.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance by a duration in milliseconds.
    ///
    /// Returns the new time.
    pub fn advance_by(&mut self, millis: u64) -> PlaybackTime {
        self.advance_to(self.current.add_millis(millis))
    }

    /// Advance to `target`. Earlier targets leave the clock untouched.
    ///
    /// Returns the new time.
    pub fn advance_to(&mut self, target: PlaybackTime) -> PlaybackTime {
        if target > self.current {
            self.current = target;
            self.ticks += 1;
        }
        self.current
    }

    /// Calculate time until a deadline.
    #[must_use]
    pub const fn millis_until(&self, deadline: PlaybackTime) -> u64 {
        self.current.millis_until(deadline)
    }
}
