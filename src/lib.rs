//! # algoviz
//!
//! Step-trace engine and playback controller for classical algorithm
//! visualizations.
//!
//! Every algorithm is run to completion up front and recorded as an
//! immutable trace of steps; a generic controller then plays that trace:
//! - Generate-then-play: a pure generator per algorithm, one controller for all
//! - Deterministic: same parameters and seed, structurally identical trace
//! - Bounded: configured limits keep every trace small enough to materialize
//!
//! ## Example
//!
//! ```rust
//! use algoviz::prelude::*;
//!
//! let config = VizConfig::default();
//! let mut viz = open("hanoi", &config).unwrap();
//! assert_eq!(viz.trace_len(), 9);
//!
//! viz.seek(usize::MAX);
//! assert_eq!(viz.result(), Some(&Outcome::Count(7)));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
)]

pub mod algorithms;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algorithms::{catalog, open};
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::engine::{
        AlgorithmInfo, ParamArgs, ParamOutcome, PlaybackController, Outcome, Step, Trace,
        TraceGenerator, Visualizer,
    };
    pub use crate::error::{VizError, VizResult};
}

/// Re-export for public API
pub use error::{VizError, VizResult};
