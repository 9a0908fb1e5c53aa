//! Object-safe facade over [`PlaybackController`].
//!
//! The CLI, the TUI and the tokio driver work with `Box<dyn Visualizer>`
//! so they can hold any algorithm's controller without knowing its
//! parameter or frame types.

use crate::engine::controller::{ParamOutcome, PlaybackController};
use crate::engine::generator::{AlgorithmInfo, FrameView, ParamArgs, TraceGenerator};
use crate::engine::step::Outcome;
use crate::engine::PlaybackTime;
use crate::error::VizResult;

/// Type-erased playback controller.
pub trait Visualizer {
    /// Static description of the algorithm.
    fn info(&self) -> AlgorithmInfo;

    /// Cursor position.
    fn cursor(&self) -> usize;

    /// Number of steps in the active trace.
    fn trace_len(&self) -> usize;

    /// Whether the timer loop is running.
    fn is_playing(&self) -> bool;

    /// Current speed.
    fn speed(&self) -> u32;

    /// Message of the current step.
    fn message(&self) -> &str;

    /// Result carried by the current step.
    fn result(&self) -> Option<&Outcome>;

    /// Text rendering of the current frame.
    fn render_lines(&self) -> Vec<String>;

    /// Current parameters as JSON, for form binding.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    fn params_json(&self) -> VizResult<String>;

    /// Current step as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    fn step_json(&self) -> VizResult<String>;

    /// Whole trace as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    fn trace_json(&self) -> VizResult<String>;

    /// Bind string arguments and regenerate.
    ///
    /// # Errors
    ///
    /// Returns error if an argument is unknown or does not parse.
    fn apply_args(&mut self, args: &ParamArgs) -> VizResult<ParamOutcome>;

    /// Change the speed.
    fn set_speed(&mut self, speed: u32);

    /// Play, pause, or play again from the start.
    fn toggle_play_pause(&mut self);

    /// Regenerate and stop.
    fn reset(&mut self);

    /// Pause and step forward.
    fn step_forward(&mut self);

    /// Pause and step back.
    fn step_backward(&mut self);

    /// Jump to a step.
    fn seek(&mut self, index: usize);

    /// Feed elapsed time to the controller.
    fn advance_clock(&mut self, elapsed_ms: u64);

    /// Move the controller's clock to `target`.
    fn advance_clock_to(&mut self, target: PlaybackTime);

    /// Deadline of the pending timer.
    fn next_deadline(&self) -> Option<PlaybackTime>;

    /// Controller's virtual time.
    fn now(&self) -> PlaybackTime;
}

impl<G> Visualizer for PlaybackController<G>
where
    G: TraceGenerator,
    G::Frame: FrameView,
{
    fn info(&self) -> AlgorithmInfo {
        self.generator().info()
    }

    fn cursor(&self) -> usize {
        Self::cursor(self)
    }

    fn trace_len(&self) -> usize {
        Self::trace_len(self)
    }

    fn is_playing(&self) -> bool {
        Self::is_playing(self)
    }

    fn speed(&self) -> u32 {
        Self::speed(self)
    }

    fn message(&self) -> &str {
        &self.current_step().message
    }

    fn result(&self) -> Option<&Outcome> {
        self.current_step().result.as_ref()
    }

    fn render_lines(&self) -> Vec<String> {
        self.current_step().frame.render_lines()
    }

    fn params_json(&self) -> VizResult<String> {
        Ok(serde_json::to_string(self.params())?)
    }

    fn step_json(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self.current_step())?)
    }

    fn trace_json(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self.trace())?)
    }

    fn apply_args(&mut self, args: &ParamArgs) -> VizResult<ParamOutcome> {
        let params = self.generator().apply_args(self.params(), args)?;
        Ok(self.set_parameters(params))
    }

    fn set_speed(&mut self, speed: u32) {
        Self::set_speed(self, speed);
    }

    fn toggle_play_pause(&mut self) {
        Self::toggle_play_pause(self);
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn step_forward(&mut self) {
        Self::step_forward(self);
    }

    fn step_backward(&mut self) {
        Self::step_backward(self);
    }

    fn seek(&mut self, index: usize) {
        Self::seek(self, index);
    }

    fn advance_clock(&mut self, elapsed_ms: u64) {
        Self::advance_clock(self, elapsed_ms);
    }

    fn advance_clock_to(&mut self, target: PlaybackTime) {
        Self::advance_clock_to(self, target);
    }

    fn next_deadline(&self) -> Option<PlaybackTime> {
        Self::next_deadline(self)
    }

    fn now(&self) -> PlaybackTime {
        Self::now(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaybackConfig;
    use crate::engine::controller::test_support::Countdown;

    fn boxed() -> Box<dyn Visualizer> {
        Box::new(PlaybackController::new(Countdown, PlaybackConfig::default()))
    }

    fn args(pairs: &[(&str, &str)]) -> ParamArgs {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_facade_reads() {
        let viz = boxed();
        assert_eq!(viz.info().id, "countdown");
        assert_eq!(viz.cursor(), 0);
        assert_eq!(viz.trace_len(), 5);
        assert!(viz.result().is_none());
        assert_eq!(viz.render_lines(), vec!["value = 4".to_string()]);
        assert_eq!(viz.params_json().expect("json"), r#"{"start":4}"#);
    }

    #[test]
    fn test_facade_apply_args() {
        let mut viz = boxed();
        let outcome = viz.apply_args(&args(&[("start", "2")])).expect("apply");
        assert_eq!(outcome, ParamOutcome::Applied);
        assert_eq!(viz.trace_len(), 3);
        assert_eq!(viz.message(), "Start at 2");
    }

    #[test]
    fn test_facade_apply_args_rejects_unknown_key() {
        let mut viz = boxed();
        assert!(viz.apply_args(&args(&[("size", "2")])).is_err());
        assert_eq!(viz.trace_len(), 5);
    }

    #[test]
    fn test_facade_apply_args_while_playing() {
        let mut viz = boxed();
        viz.toggle_play_pause();
        let outcome = viz.apply_args(&args(&[("start", "2")])).expect("apply");
        assert_eq!(outcome, ParamOutcome::RejectedWhilePlaying);
    }

    #[test]
    fn test_facade_plays_to_result() {
        let mut viz = boxed();
        viz.toggle_play_pause();
        viz.advance_clock(60_000);
        assert!(!viz.is_playing());
        assert_eq!(viz.result(), Some(&Outcome::Count(4)));
        assert_eq!(viz.message(), "Lift-off");
    }

    #[test]
    fn test_facade_json_export() {
        let viz = boxed();
        let step = viz.step_json().expect("json");
        assert!(step.contains("\"index\": 0"));
        let trace = viz.trace_json().expect("json");
        assert!(trace.contains("Lift-off"));
    }
}
