//! Core step-trace engine.
//!
//! Implements the generate-then-play split shared by every algorithm:
//! - Immutable steps recorded into a non-empty trace
//! - The trace generator seam implemented per algorithm
//! - A cancellable timer queue over a virtual clock
//! - The generic playback controller and its object-safe facade
//! - A tokio driver that plays a controller in real time

pub mod clock;
pub mod controller;
pub mod driver;
pub mod generator;
pub mod rng;
pub mod step;
pub mod timer;
pub mod visualizer;

use serde::{Deserialize, Serialize};

pub use clock::PlaybackClock;
pub use controller::{ParamOutcome, PlaybackController};
pub use driver::{DriverReport, PlaybackCommand, PlaybackDriver};
pub use generator::{AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator};
pub use rng::VizRng;
pub use step::{Outcome, Step, Trace, TraceRecorder};
pub use timer::{TimerHandle, TimerQueue};
pub use visualizer::Visualizer;

/// Playback time on the controller's virtual clock.
///
/// Millisecond resolution is all the animation needs; keeping it integral
/// makes timer ordering exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct PlaybackTime {
    /// Milliseconds since the clock was created.
    millis: u64,
}

impl PlaybackTime {
    /// Clock origin.
    pub const ZERO: Self = Self { millis: 0 };

    /// Create time from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Get time as milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Add a duration in milliseconds.
    #[must_use]
    pub const fn add_millis(self, millis: u64) -> Self {
        Self {
            millis: self.millis.saturating_add(millis),
        }
    }

    /// Milliseconds from `self` until `later`, zero if `later` is not after `self`.
    #[must_use]
    pub const fn millis_until(self, later: Self) -> u64 {
        later.millis.saturating_sub(self.millis)
    }
}

impl std::ops::Sub for PlaybackTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            millis: self.millis.saturating_sub(rhs.millis),
        }
    }
}

impl std::fmt::Display for PlaybackTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}
