//! CLI command handlers.
//!
//! Each handler returns an `ExitCode`; failures are reported on stderr.

use std::path::Path;
use std::process::ExitCode;

use tracing::{info, warn};

use crate::algorithms::{catalog, open};
use crate::config::VizConfig;
use crate::engine::controller::ParamOutcome;
use crate::engine::driver::PlaybackDriver;
use crate::engine::generator::ParamArgs;
use crate::engine::visualizer::Visualizer;
use crate::error::{VizError, VizResult};

use super::output::{print_catalog, print_help, print_step, print_version};
use super::{Args, Command};

/// Load the configuration named on the command line, or the defaults.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> VizResult<VizConfig> {
    match path {
        Some(path) => VizConfig::load(path),
        None => Ok(VizConfig::default()),
    }
}

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args, config: &VizConfig) -> ExitCode {
    match args.command {
        Command::List => list_algorithms(),
        Command::Show {
            algorithm,
            bindings,
            json,
        } => show_trace(&algorithm, &bindings, json, config),
        Command::Play {
            algorithm,
            bindings,
            speed,
        } => play_trace(&algorithm, &bindings, speed, config),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Open an algorithm and bind its parameters.
///
/// # Errors
///
/// Returns error for an unknown id or an unusable binding.
pub fn prepare(
    algorithm: &str,
    bindings: &ParamArgs,
    config: &VizConfig,
) -> VizResult<Box<dyn Visualizer>> {
    let mut viz = open(algorithm, config)?;
    if !bindings.is_empty() && viz.apply_args(bindings)? == ParamOutcome::RejectedWhilePlaying {
        warn!(algorithm, "parameters ignored while playing");
    }
    Ok(viz)
}

fn report_error(e: &VizError) -> ExitCode {
    eprintln!("Error: {e}");
    if e.is_user_input() {
        eprintln!("Run 'algoviz list' for algorithms and their parameters.");
    }
    ExitCode::from(1)
}

/// List the algorithm catalogue.
#[must_use]
pub fn list_algorithms() -> ExitCode {
    print_catalog(&catalog());
    ExitCode::SUCCESS
}

/// Print every step of one trace.
#[must_use]
pub fn show_trace(algorithm: &str, bindings: &ParamArgs, json: bool, config: &VizConfig) -> ExitCode {
    let mut viz = match prepare(algorithm, bindings, config) {
        Ok(viz) => viz,
        Err(e) => return report_error(&e),
    };
    info!(algorithm, steps = viz.trace_len(), "showing trace");

    if json {
        match viz.trace_json() {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(1);
            }
        }
        viz.seek(usize::MAX);
    } else {
        for index in 0..viz.trace_len() {
            viz.seek(index);
            print_step(&*viz);
        }
    }
    if viz.result().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

/// Play one trace in real time on a single-threaded tokio runtime.
#[must_use]
pub fn play_trace(
    algorithm: &str,
    bindings: &ParamArgs,
    speed: Option<u32>,
    config: &VizConfig,
) -> ExitCode {
    let mut viz = match prepare(algorithm, bindings, config) {
        Ok(viz) => viz,
        Err(e) => return report_error(&e),
    };
    if let Some(speed) = speed {
        viz.set_speed(speed);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::from(1);
        }
    };

    viz.toggle_play_pause();
    let report = runtime.block_on(PlaybackDriver::new(&mut *viz).run(print_step));

    info!(
        algorithm,
        frames = report.frames_rendered,
        cursor = report.final_cursor,
        "playback done"
    );
    if viz.result().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
