//! CLI output formatting.
//!
//! Formatting is split from printing so the text can be asserted on.

use crate::engine::generator::AlgorithmInfo;
use crate::engine::visualizer::Visualizer;

/// Print version information.
pub fn print_version() {
    match option_env!("ALGOVIZ_GIT_HASH") {
        Some(hash) => println!("algoviz {} ({hash})", env!("CARGO_PKG_VERSION")),
        None => println!("algoviz {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"algoviz - Step-by-step playback of classical algorithms

USAGE:
    algoviz [--config <file.yaml>] <COMMAND> [OPTIONS]

COMMANDS:
    list                        List the available algorithms

    show <algorithm>            Print every step of a trace
        --set <key=value>       Set a parameter (repeatable)
        --json                  Print the trace as JSON

    play <algorithm>            Play a trace in real time
        --set <key=value>       Set a parameter (repeatable)
        --speed <N>             Playback speed (higher is faster)

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    algoviz show hanoi --set num_disks=3
    algoviz show count-inversions --set input=8,4,2,1 --json
    algoviz play n-queens --set board_size=5 --speed 900

Set RUST_LOG=algoviz=debug to trace controller events on stderr.
"
    );
}

/// Format the catalogue as a table.
#[must_use]
pub fn format_catalog(infos: &[AlgorithmInfo]) -> String {
    let mut out = String::new();
    for info in infos {
        out.push_str(&format!(
            "  {:<20} {:<22} {}\n",
            info.id,
            info.category.label(),
            info.summary
        ));
        out.push_str(&format!(
            "  {:<20} params: {}\n",
            "",
            info.params.join(", ")
        ));
    }
    out
}

/// Print the catalogue.
pub fn print_catalog(infos: &[AlgorithmInfo]) {
    println!("Available algorithms:\n");
    print!("{}", format_catalog(infos));
    println!("\nUsage: algoviz show <algorithm> [--set key=value]...");
}

/// Format the current step of a visualizer.
#[must_use]
pub fn format_step(viz: &dyn Visualizer) -> String {
    let mut out = format!(
        "[{}/{}] {}\n",
        viz.cursor() + 1,
        viz.trace_len(),
        viz.message()
    );
    for line in viz.render_lines() {
        out.push_str("    ");
        out.push_str(&line);
        out.push('\n');
    }
    if let Some(result) = viz.result() {
        out.push_str(&format!("    result: {result}\n"));
    }
    out
}

/// Print the current step of a visualizer.
pub fn print_step(viz: &dyn Visualizer) {
    print!("{}", format_step(viz));
}
