//! Real-time playback driver.
//!
//! Sleeps on the tokio timer until the controller's next deadline, then
//! moves the controller's virtual clock to exactly that deadline. Commands
//! arrive over an mpsc channel; the real time spent waiting is fed to the
//! controller before each one is applied, so a command never pushes the
//! pending advance back.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::engine::visualizer::Visualizer;
use crate::engine::PlaybackTime;

/// Control input for a running driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    /// Play, pause, or play again.
    TogglePlayPause,
    /// Regenerate and stop.
    Reset,
    /// Change the speed.
    SetSpeed(u32),
    /// Pause and step forward.
    StepForward,
    /// Pause and step back.
    StepBackward,
    /// Jump to a step.
    Seek(usize),
    /// Stop the driver.
    Quit,
}

impl PlaybackCommand {
    /// Apply to a visualizer. Returns `false` for [`PlaybackCommand::Quit`].
    pub fn apply(self, viz: &mut dyn Visualizer) -> bool {
        match self {
            Self::TogglePlayPause => viz.toggle_play_pause(),
            Self::Reset => viz.reset(),
            Self::SetSpeed(speed) => viz.set_speed(speed),
            Self::StepForward => viz.step_forward(),
            Self::StepBackward => viz.step_backward(),
            Self::Seek(index) => viz.seek(index),
            Self::Quit => return false,
        }
        true
    }
}

/// Summary of a finished drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverReport {
    /// Times the render callback ran.
    pub frames_rendered: usize,
    /// Cursor when the driver returned.
    pub final_cursor: usize,
    /// Whether the cursor ended on the last step.
    pub reached_end: bool,
    /// Whether a `Quit` command ended the drive.
    pub quit: bool,
}

/// Plays a visualizer against the tokio clock.
pub struct PlaybackDriver<'a> {
    viz: &'a mut dyn Visualizer,
    commands: Option<mpsc::Receiver<PlaybackCommand>>,
}

impl<'a> PlaybackDriver<'a> {
    /// Drive without external commands; returns once playback stops.
    pub fn new(viz: &'a mut dyn Visualizer) -> Self {
        Self {
            viz,
            commands: None,
        }
    }

    /// Drive with a command channel; returns on `Quit` or when every sender
    /// is dropped and no timer is pending.
    pub fn with_commands(
        viz: &'a mut dyn Visualizer,
        commands: mpsc::Receiver<PlaybackCommand>,
    ) -> Self {
        Self {
            viz,
            commands: Some(commands),
        }
    }

    /// Run until finished, calling `render` once up front and after every
    /// change of cursor or play state.
    pub async fn run<F>(mut self, mut render: F) -> DriverReport
    where
        F: FnMut(&dyn Visualizer),
    {
        let mut frames_rendered = 0;
        let mut quit = false;
        let origin = Origin::new(self.viz.now());

        render(&*self.viz);
        frames_rendered += 1;
        info!(algorithm = self.viz.info().id, steps = self.viz.trace_len(), "playback started");

        loop {
            let deadline = self.viz.next_deadline();
            if deadline.is_none() && self.commands.is_none() {
                break;
            }

            let before = (self.viz.cursor(), self.viz.is_playing());
            let wake = deadline.map_or_else(Instant::now, |d| origin.instant_of(d));

            tokio::select! {
                () = tokio::time::sleep_until(wake), if deadline.is_some() => {
                    if let Some(deadline) = deadline {
                        self.viz.advance_clock_to(deadline);
                    }
                }
                command = next_command(&mut self.commands) => {
                    // Time spent waiting counts toward the pending advance.
                    self.viz.advance_clock_to(origin.elapsed());
                    match command {
                        Some(command) => {
                            debug!(?command, "playback command");
                            if !command.apply(&mut *self.viz) {
                                quit = true;
                                break;
                            }
                        }
                        None => {
                            self.commands = None;
                        }
                    }
                }
            }

            if (self.viz.cursor(), self.viz.is_playing()) != before {
                render(&*self.viz);
                frames_rendered += 1;
            }
        }

        let report = DriverReport {
            frames_rendered,
            final_cursor: self.viz.cursor(),
            reached_end: self.viz.cursor() + 1 == self.viz.trace_len(),
            quit,
        };
        info!(
            frames = report.frames_rendered,
            cursor = report.final_cursor,
            "playback finished"
        );
        report
    }
}

/// Maps the controller's virtual clock onto the tokio clock.
struct Origin {
    instant: Instant,
    virtual_start: PlaybackTime,
}

impl Origin {
    fn new(virtual_start: PlaybackTime) -> Self {
        Self {
            instant: Instant::now(),
            virtual_start,
        }
    }

    /// Real instant at which the virtual clock reads `at`.
    fn instant_of(&self, at: PlaybackTime) -> Instant {
        self.instant + Duration::from_millis(self.virtual_start.millis_until(at))
    }

    /// Virtual time corresponding to now.
    fn elapsed(&self) -> PlaybackTime {
        let millis = u64::try_from(self.instant.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.virtual_start.add_millis(millis)
    }
}

async fn next_command(
    commands: &mut Option<mpsc::Receiver<PlaybackCommand>>,
) -> Option<PlaybackCommand> {
    match commands {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
