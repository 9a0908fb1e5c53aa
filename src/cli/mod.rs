//! CLI module for algoviz.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments
//! and a loaded configuration.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{list_algorithms, load_config, play_trace, prepare, run_cli, show_trace};
pub use output::{format_catalog, format_step, print_catalog, print_help, print_step, print_version};
