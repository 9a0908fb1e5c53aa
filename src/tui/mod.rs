//! TUI module for algoviz.
//!
//! Reusable application state for the `algoviz-tui` binary. The terminal
//! I/O stays in the binary; key handling and clock ticks live here so they
//! can be tested without a terminal.

pub mod app;

pub use app::VizApp;

#[cfg(test)]
mod tests;
