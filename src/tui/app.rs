//! Playback TUI application state and logic.
//!
//! Terminal I/O is handled by the `algoviz-tui` binary; key handling,
//! algorithm switching and clock ticks live here so they can be tested
//! without a terminal.

use crossterm::event::KeyCode;
use tracing::debug;

use crate::algorithms::{open, ALGORITHM_IDS};
use crate::config::VizConfig;
use crate::engine::generator::ParamArgs;
use crate::engine::visualizer::Visualizer;
use crate::error::{VizError, VizResult};

/// Speed change per `+`/`-` key press.
pub const SPEED_STEP: u32 = 50;

/// Application state for the playback TUI.
pub struct VizApp {
    /// Controller of the selected algorithm.
    pub viz: Box<dyn Visualizer>,
    /// Position of the selected algorithm in [`ALGORITHM_IDS`].
    pub selected: usize,
    /// Frames drawn so far.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
    config: VizConfig,
}

impl VizApp {
    /// Open `algorithm` with its default parameters.
    ///
    /// # Errors
    ///
    /// Returns `VizError::UnknownAlgorithm` if the id is not in the catalogue.
    pub fn new(algorithm: &str, config: VizConfig) -> VizResult<Self> {
        let selected = ALGORITHM_IDS
            .iter()
            .position(|id| *id == algorithm)
            .ok_or_else(|| VizError::UnknownAlgorithm(algorithm.to_string()))?;
        let viz = open(algorithm, &config)?;
        Ok(Self {
            viz,
            selected,
            frame_count: 0,
            should_quit: false,
            config,
        })
    }

    /// Open `algorithm` and bind `args`.
    ///
    /// # Errors
    ///
    /// Returns error for an unknown id or an unusable binding.
    pub fn with_args(algorithm: &str, args: &ParamArgs, config: VizConfig) -> VizResult<Self> {
        let mut app = Self::new(algorithm, config)?;
        if !args.is_empty() {
            app.viz.apply_args(args)?;
        }
        Ok(app)
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.viz.toggle_play_pause(),
            KeyCode::Right | KeyCode::Char('l') => self.viz.step_forward(),
            KeyCode::Left | KeyCode::Char('h') => self.viz.step_backward(),
            KeyCode::Home => self.viz.seek(0),
            KeyCode::End => self.viz.seek(usize::MAX),
            KeyCode::Char('r') => self.viz.reset(),
            KeyCode::Char('+' | '=') => {
                let speed = self.viz.speed().saturating_add(SPEED_STEP);
                self.viz.set_speed(speed);
            }
            KeyCode::Char('-') => {
                let speed = self.viz.speed().saturating_sub(SPEED_STEP);
                self.viz.set_speed(speed);
            }
            KeyCode::Tab => self.select((self.selected + 1) % ALGORITHM_IDS.len()),
            KeyCode::BackTab => {
                self.select((self.selected + ALGORITHM_IDS.len() - 1) % ALGORITHM_IDS.len());
            }
            _ => {}
        }
    }

    /// Switch to the algorithm at `index`, keeping the current speed.
    fn select(&mut self, index: usize) {
        let speed = self.viz.speed();
        match open(ALGORITHM_IDS[index], &self.config) {
            Ok(mut viz) => {
                viz.set_speed(speed);
                self.viz = viz;
                self.selected = index;
                debug!(algorithm = ALGORITHM_IDS[index], "selected algorithm");
            }
            Err(e) => debug!(error = %e, "algorithm switch failed"),
        }
    }

    /// Feed wall-clock time to the controller.
    pub fn tick(&mut self, elapsed_ms: u64) {
        self.viz.advance_clock(elapsed_ms);
        self.frame_count += 1;
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// "RUNNING", "DONE" or "PAUSED".
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.viz.is_playing() {
            "RUNNING"
        } else if self.viz.cursor() + 1 == self.viz.trace_len() {
            "DONE"
        } else {
            "PAUSED"
        }
    }

    /// Playback progress in `0..=100`.
    #[must_use]
    pub fn progress_percent(&self) -> u16 {
        let last = self.viz.trace_len().saturating_sub(1);
        if last == 0 {
            return 100;
        }
        (self.viz.cursor() * 100 / last) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::step::Outcome;

    fn app(id: &str) -> VizApp {
        let config = VizConfig::builder()
            .replay_delay_ms(0)
            .build()
            .expect("config");
        VizApp::new(id, config).expect("app")
    }

    #[test]
    fn test_new_unknown_algorithm() {
        assert!(VizApp::new("bogosort", VizConfig::default()).is_err());
    }

    #[test]
    fn test_initial_state() {
        let app = app("hanoi");
        assert_eq!(app.selected, 0);
        assert_eq!(app.frame_count, 0);
        assert!(!app.should_quit());
        assert_eq!(app.status(), "PAUSED");
        assert_eq!(app.progress_percent(), 0);
    }

    #[test]
    fn test_play_until_done() {
        let mut app = app("hanoi");
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.status(), "RUNNING");
        for _ in 0..20 {
            app.tick(1000);
        }
        assert_eq!(app.status(), "DONE");
        assert_eq!(app.progress_percent(), 100);
        assert_eq!(app.viz.result(), Some(&Outcome::Count(7)));
        assert_eq!(app.frame_count, 20);
    }

    #[test]
    fn test_step_keys() {
        let mut app = app("hanoi");
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.viz.cursor(), 2);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.viz.cursor(), 1);
        app.handle_key(KeyCode::End);
        assert_eq!(app.viz.cursor(), 8);
        app.handle_key(KeyCode::Home);
        assert_eq!(app.viz.cursor(), 0);
    }

    #[test]
    fn test_speed_keys_clamp() {
        let mut app = app("hanoi");
        let start = app.viz.speed();
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.viz.speed(), start + SPEED_STEP);
        for _ in 0..100 {
            app.handle_key(KeyCode::Char('-'));
        }
        assert_eq!(app.viz.speed(), 50);
    }

    #[test]
    fn test_reset_key() {
        let mut app = app("fibonacci");
        app.handle_key(KeyCode::End);
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.viz.cursor(), 0);
        assert!(!app.viz.is_playing());
    }

    #[test]
    fn test_tab_cycles_catalogue() {
        let mut app = app("hanoi");
        app.handle_key(KeyCode::Char('+'));
        let speed = app.viz.speed();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.viz.info().id, ALGORITHM_IDS[1]);
        assert_eq!(app.viz.speed(), speed);
        app.handle_key(KeyCode::BackTab);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.viz.info().id, ALGORITHM_IDS[ALGORITHM_IDS.len() - 1]);
    }

    #[test]
    fn test_with_args() {
        let args: ParamArgs = [("board_size".to_string(), "6".to_string())]
            .into_iter()
            .collect();
        let mut app = VizApp::with_args("n-queens", &args, VizConfig::default()).expect("app");
        app.handle_key(KeyCode::End);
        assert_eq!(app.viz.result(), Some(&Outcome::Count(4)));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app("lcs");
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }
}
