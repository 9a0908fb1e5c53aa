//! algoviz CLI - step-by-step algorithm playback
//!
//! Command-line interface for listing, printing and playing traces.

use std::process::ExitCode;

use algoviz::cli::{load_config, run_cli, Args};
use algoviz::logging::init_logging;

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_logging(&config.logging.level) {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    run_cli(args, &config)
}
