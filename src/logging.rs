//! Console logging.
//!
//! Compact `tracing` output on stderr so it never mixes with rendered
//! frames on stdout. `RUST_LOG` wins over the configured level; other
//! crates only get through at error level.

use tracing::{Level, Metadata};
use tracing_subscriber::{
    filter::{self, EnvFilter},
    fmt::writer::BoxMakeWriter,
    prelude::*,
};

use crate::error::{VizError, VizResult};

/// Build the filter: `RUST_LOG` if set, otherwise `default_level`.
///
/// # Errors
///
/// Returns error if neither directive parses.
pub fn env_filter(default_level: &str) -> VizResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| VizError::config(format!("invalid log level '{default_level}': {e}")))
}

fn own_crate_or_error(metadata: &Metadata<'_>) -> bool {
    metadata.level() <= &Level::ERROR
        || metadata
            .module_path()
            .unwrap_or_default()
            .starts_with("algoviz")
}

/// Install the global subscriber.
///
/// Calling it twice is harmless: the second install is ignored.
///
/// # Errors
///
/// Returns error if the level directive is invalid.
pub fn init_logging(default_level: &str) -> VizResult<()> {
    let console_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(BoxMakeWriter::new(std::io::stderr))
        .with_filter(filter::filter_fn(own_crate_or_error))
        .with_filter(env_filter(default_level)?);

    if tracing_subscriber::registry()
        .with(console_log)
        .try_init()
        .is_err()
    {
        tracing::debug!("logger already installed");
    }
    Ok(())
}
