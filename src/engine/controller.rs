//! Generic playback controller.
//!
//! Drives any [`TraceGenerator`] through a uniform lifecycle:
//! parameter change → regenerate → cursor 0 → timer-driven advance →
//! auto-stop at the last step.
//!
//! # Invariants
//!
//! 1. **Cursor bounds**: `0 <= cursor <= trace.len() - 1` after every operation
//! 2. **No stale advance**: a timer never fires against a trace other than
//!    the one active when it was scheduled (cancel-before-replace, plus an
//!    epoch check when a timer fires)
//! 3. **Auto-stop**: playback stops exactly when the cursor reaches the last
//!    step and never loops on its own

use tracing::debug;

use crate::config::PlaybackConfig;
use crate::engine::clock::PlaybackClock;
use crate::engine::generator::TraceGenerator;
use crate::engine::step::{Step, Trace};
use crate::engine::timer::{TimerHandle, TimerQueue};
use crate::engine::PlaybackTime;

/// Result of [`PlaybackController::set_parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamOutcome {
    /// Trace regenerated from the new parameters.
    Applied,
    /// Ignored because playback is running.
    RejectedWhilePlaying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    /// Move the cursor one step.
    Advance,
    /// Start playing after a "play again" regeneration.
    Resume,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledAction {
    epoch: u64,
    action: TimerAction,
}

/// Owns one trace, its cursor and the play/pause state.
pub struct PlaybackController<G: TraceGenerator> {
    generator: G,
    params: G::Params,
    trace: Trace<G::Frame>,
    cursor: usize,
    playing: bool,
    speed: u32,
    playback: PlaybackConfig,
    /// Bumped on every regeneration.
    epoch: u64,
    clock: PlaybackClock,
    timers: TimerQueue<ScheduledAction>,
    /// The single timer this controller may have outstanding.
    pending: Option<TimerHandle>,
}

impl<G: TraceGenerator> PlaybackController<G> {
    /// Create a controller with default parameters.
    #[must_use]
    pub fn new(generator: G, playback: PlaybackConfig) -> Self {
        Self::with_params(generator, G::Params::default(), playback)
    }

    /// Create a controller with explicit parameters.
    #[must_use]
    pub fn with_params(generator: G, params: G::Params, playback: PlaybackConfig) -> Self {
        let trace = generator.generate(&params);
        let speed = playback.clamp_speed(playback.default_speed);
        debug!(
            algorithm = generator.info().id,
            steps = trace.len(),
            "controller created"
        );
        Self {
            generator,
            params,
            trace,
            cursor: 0,
            playing: false,
            speed,
            playback,
            epoch: 0,
            clock: PlaybackClock::new(),
            timers: TimerQueue::new(),
            pending: None,
        }
    }

    // === Read surface ===

    /// Step at the cursor. Always defined.
    #[must_use]
    pub fn current_step(&self) -> &Step<G::Frame> {
        self.trace.clamped(self.cursor)
    }

    /// Cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the active trace.
    #[must_use]
    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }

    /// The active trace.
    #[must_use]
    pub const fn trace(&self) -> &Trace<G::Frame> {
        &self.trace
    }

    /// Whether the timer loop is running.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current speed.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Milliseconds between advances at the current speed.
    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.playback.delay_ms(self.speed)
    }

    /// Parameters the active trace was generated from.
    #[must_use]
    pub const fn params(&self) -> &G::Params {
        &self.params
    }

    /// The wrapped generator.
    #[must_use]
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Playback timing in effect.
    #[must_use]
    pub const fn playback_config(&self) -> &PlaybackConfig {
        &self.playback
    }

    /// Regeneration counter.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Virtual time.
    #[must_use]
    pub const fn now(&self) -> PlaybackTime {
        self.clock.now()
    }

    /// Deadline of the pending timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<PlaybackTime> {
        self.timers.next_deadline()
    }

    /// Whether the cursor sits on the final step.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.cursor == self.trace.last_index()
    }

    // === Write surface ===

    /// Replace the parameters and regenerate the trace.
    ///
    /// Rejected (no-op) while playing.
    pub fn set_parameters(&mut self, params: G::Params) -> ParamOutcome {
        if self.playing {
            debug!(
                algorithm = self.generator.info().id,
                "parameter change rejected while playing"
            );
            return ParamOutcome::RejectedWhilePlaying;
        }
        self.params = params;
        self.rebuild();
        ParamOutcome::Applied
    }

    /// Change the speed. Always accepted, clamped into the configured range.
    ///
    /// A pending advance keeps its deadline; the new delay applies from the
    /// next scheduled advance.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = self.playback.clamp_speed(speed);
    }

    /// Play, pause, or play again from the start when the trace is exhausted.
    pub fn toggle_play_pause(&mut self) {
        if self.at_end() && self.trace.len() > 1 {
            self.rebuild();
            if self.playback.replay_delay_ms == 0 {
                self.start();
            } else {
                self.schedule(TimerAction::Resume, self.playback.replay_delay_ms);
            }
            debug!(
                algorithm = self.generator.info().id,
                epoch = self.epoch,
                "replaying from start"
            );
            return;
        }

        if self.playing {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Regenerate with the current parameters and stop.
    pub fn reset(&mut self) {
        self.rebuild();
    }

    /// Pause and move one step forward.
    pub fn step_forward(&mut self) {
        self.pause();
        self.cursor = (self.cursor + 1).min(self.trace.last_index());
    }

    /// Pause and move one step back.
    pub fn step_backward(&mut self) {
        self.pause();
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Jump to `index`, clamped into range.
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.trace.last_index());
        if self.playing && self.at_end() {
            self.pause();
        }
    }

    /// The timer's action: move one step while playing, stop at the end.
    pub fn advance(&mut self) {
        if !self.playing {
            return;
        }
        let last = self.trace.last_index();
        if self.cursor < last {
            self.cursor += 1;
        }
        if self.cursor == last {
            self.pause();
            debug!(
                algorithm = self.generator.info().id,
                steps = self.trace.len(),
                "playback reached the end"
            );
        }
    }

    /// Move the virtual clock forward and fire every due timer.
    pub fn advance_clock(&mut self, elapsed_ms: u64) {
        let target = self.clock.now().add_millis(elapsed_ms);
        self.advance_clock_to(target);
    }

    /// Move the virtual clock to `target` and fire every due timer in order.
    pub fn advance_clock_to(&mut self, target: PlaybackTime) {
        while let Some((handle, deadline, scheduled)) = self.timers.pop_due(target) {
            self.clock.advance_to(deadline);
            if self.pending == Some(handle) {
                self.pending = None;
            }
            self.fire(scheduled);
        }
        self.clock.advance_to(target);
    }

    // === Internals ===

    fn rebuild(&mut self) {
        self.cancel_pending();
        self.trace = self.generator.generate(&self.params);
        self.epoch += 1;
        self.cursor = 0;
        self.playing = false;
        debug!(
            algorithm = self.generator.info().id,
            epoch = self.epoch,
            steps = self.trace.len(),
            "trace regenerated"
        );
    }

    fn start(&mut self) {
        self.cancel_pending();
        self.playing = true;
        self.schedule(TimerAction::Advance, self.delay_ms());
    }

    fn pause(&mut self) {
        self.playing = false;
        self.cancel_pending();
    }

    fn schedule(&mut self, action: TimerAction, delay_ms: u64) {
        self.cancel_pending();
        let deadline = self.clock.now().add_millis(delay_ms);
        let handle = self.timers.schedule(
            deadline,
            ScheduledAction {
                epoch: self.epoch,
                action,
            },
        );
        self.pending = Some(handle);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
    }

    fn fire(&mut self, scheduled: ScheduledAction) {
        if scheduled.epoch != self.epoch {
            debug!(
                scheduled = scheduled.epoch,
                active = self.epoch,
                "dropping stale timer"
            );
            return;
        }
        match scheduled.action {
            TimerAction::Advance => {
                self.advance();
                if self.playing {
                    self.schedule(TimerAction::Advance, self.delay_ms());
                }
            }
            TimerAction::Resume => self.start(),
        }
    }
}

impl<G: TraceGenerator + std::fmt::Debug> std::fmt::Debug for PlaybackController<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("generator", &self.generator)
            .field("params", &self.params)
            .field("cursor", &self.cursor)
            .field("trace_len", &self.trace.len())
            .field("playing", &self.playing)
            .field("speed", &self.speed)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{Countdown, CountdownParams};
    use super::*;

    fn playback() -> PlaybackConfig {
        PlaybackConfig {
            min_speed: 50,
            max_speed: 1000,
            default_speed: 500,
            replay_delay_ms: 100,
        }
    }

    fn controller(start: i64) -> PlaybackController<Countdown> {
        PlaybackController::with_params(Countdown, CountdownParams { start }, playback())
    }

    #[test]
    fn test_new_controller_is_idle() {
        let c = PlaybackController::new(Countdown, playback());
        assert_eq!(c.cursor(), 0);
        assert!(!c.is_playing());
        assert_eq!(c.speed(), 500);
        assert_eq!(c.trace_len(), 5);
        assert_eq!(
            c.current_step().message,
            "Configure a start value and press play"
        );
        assert!(c.next_deadline().is_none());
    }

    #[test]
    fn test_unvalidated_inverted_speed_range() {
        let inverted = PlaybackConfig {
            min_speed: 1000,
            max_speed: 50,
            ..playback()
        };
        let mut c = PlaybackController::new(Countdown, inverted);
        assert_eq!(c.speed(), 500);
        c.set_speed(1);
        assert_eq!(c.speed(), 50);
        assert_eq!(c.delay_ms(), 1000);
        c.toggle_play_pause();
        c.advance_clock(1000);
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_non_default_params_open_on_first_action() {
        let c = controller(2);
        assert_eq!(c.current_step().message, "Start at 2");
    }

    #[test]
    fn test_play_advances_on_delay() {
        let mut c = controller(3);
        c.toggle_play_pause();
        assert!(c.is_playing());
        assert_eq!(c.delay_ms(), 550);

        c.advance_clock(549);
        assert_eq!(c.cursor(), 0);
        c.advance_clock(1);
        assert_eq!(c.cursor(), 1);
        c.advance_clock(550);
        assert_eq!(c.cursor(), 2);
    }

    #[test]
    fn test_auto_stop_at_end() {
        let mut c = controller(3);
        c.toggle_play_pause();
        c.advance_clock(10_000);

        assert_eq!(c.cursor(), c.trace_len() - 1);
        assert!(!c.is_playing());
        assert!(c.next_deadline().is_none());
    }

    #[test]
    fn test_direct_advance_never_passes_end() {
        let mut c = controller(2);
        c.toggle_play_pause();
        for _ in 0..10 {
            c.advance();
            assert!(c.cursor() < c.trace_len());
            assert_eq!(c.is_playing(), !c.at_end());
        }
        assert!(c.at_end());
    }

    #[test]
    fn test_pause_cancels_pending_advance() {
        let mut c = controller(3);
        c.toggle_play_pause();
        c.toggle_play_pause();
        assert!(!c.is_playing());
        assert!(c.next_deadline().is_none());

        c.advance_clock(5_000);
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_set_parameters_rejected_while_playing() {
        let mut c = controller(3);
        c.toggle_play_pause();
        let before = c.trace().clone();

        assert_eq!(
            c.set_parameters(CountdownParams { start: 9 }),
            ParamOutcome::RejectedWhilePlaying
        );
        assert_eq!(c.trace(), &before);
        assert!(c.is_playing());
    }

    #[test]
    fn test_set_parameters_regenerates() {
        let mut c = controller(3);
        c.seek(2);
        assert_eq!(
            c.set_parameters(CountdownParams { start: 6 }),
            ParamOutcome::Applied
        );
        assert_eq!(c.cursor(), 0);
        assert!(!c.is_playing());
        assert_eq!(c.trace(), &Countdown.generate(&CountdownParams { start: 6 }));
    }

    #[test]
    fn test_speed_accepted_while_playing_without_moving_deadline() {
        let mut c = controller(5);
        c.toggle_play_pause();
        let deadline = c.next_deadline();

        c.set_speed(1000);
        assert_eq!(c.speed(), 1000);
        assert_eq!(c.next_deadline(), deadline);

        c.advance_clock(550);
        assert_eq!(c.cursor(), 1);
        assert_eq!(
            c.next_deadline(),
            Some(PlaybackTime::from_millis(550 + 50))
        );
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut c = controller(3);
        c.set_speed(1);
        assert_eq!(c.speed(), 50);
        c.set_speed(9_999);
        assert_eq!(c.speed(), 1000);
    }

    #[test]
    fn test_replay_from_end() {
        let mut c = controller(3);
        c.seek(99);
        assert!(c.at_end());
        let epoch = c.epoch();

        c.toggle_play_pause();
        assert_eq!(c.cursor(), 0);
        assert!(!c.is_playing());
        assert_eq!(c.epoch(), epoch + 1);

        c.advance_clock(100);
        assert!(c.is_playing());
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_replay_with_zero_delay_starts_immediately() {
        let mut config = playback();
        config.replay_delay_ms = 0;
        let mut c = PlaybackController::with_params(Countdown, CountdownParams { start: 3 }, config);
        c.seek(3);

        c.toggle_play_pause();
        assert!(c.is_playing());
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_single_step_trace_does_not_replay() {
        let mut c = controller(-1);
        assert_eq!(c.trace_len(), 1);
        let epoch = c.epoch();

        c.toggle_play_pause();
        assert_eq!(c.epoch(), epoch);
        assert!(c.is_playing());
        c.advance_clock(10_000);
        assert!(!c.is_playing());
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_set_parameters_during_resume_window_cancels_resume() {
        let mut c = controller(3);
        c.seek(3);
        c.toggle_play_pause();
        assert!(c.next_deadline().is_some());

        assert_eq!(
            c.set_parameters(CountdownParams { start: 2 }),
            ParamOutcome::Applied
        );
        assert!(c.next_deadline().is_none());
        c.advance_clock(1_000);
        assert!(!c.is_playing());
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut c = controller(4);
        c.reset();
        let first = c.trace().clone();
        c.reset();
        assert_eq!(c.trace(), &first);
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_reset_while_playing_stops() {
        let mut c = controller(4);
        c.toggle_play_pause();
        c.advance_clock(550);
        c.reset();
        assert!(!c.is_playing());
        assert_eq!(c.cursor(), 0);
        c.advance_clock(5_000);
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_step_forward_and_backward_pause() {
        let mut c = controller(3);
        c.toggle_play_pause();
        c.step_forward();
        assert!(!c.is_playing());
        assert_eq!(c.cursor(), 1);

        c.step_backward();
        c.step_backward();
        assert_eq!(c.cursor(), 0);

        for _ in 0..10 {
            c.step_forward();
        }
        assert!(c.at_end());
    }

    #[test]
    fn test_seek_to_end_while_playing_stops() {
        let mut c = controller(5);
        c.toggle_play_pause();
        c.seek(2);
        assert!(c.is_playing());
        c.seek(500);
        assert!(c.at_end());
        assert!(!c.is_playing());
    }

    #[test]
    fn test_stale_epoch_is_dropped() {
        let mut c = controller(3);
        c.toggle_play_pause();
        // Forge an advance belonging to an older trace.
        let stale = ScheduledAction {
            epoch: c.epoch() + 7,
            action: TimerAction::Advance,
        };
        c.fire(stale);
        assert_eq!(c.cursor(), 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::test_support::{Countdown, CountdownParams};
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Toggle,
        Reset,
        Forward,
        Backward,
        Seek(usize),
        Speed(u32),
        Params(i64),
        Clock(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Toggle),
            Just(Op::Reset),
            Just(Op::Forward),
            Just(Op::Backward),
            (0usize..20).prop_map(Op::Seek),
            (0u32..2000).prop_map(Op::Speed),
            (-2i64..12).prop_map(Op::Params),
            (0u64..3000).prop_map(Op::Clock),
        ]
    }

    proptest! {
        /// The cursor stays in range after any operation sequence.
        #[test]
        fn prop_cursor_in_range(ops in prop::collection::vec(op(), 0..60)) {
            let mut c = PlaybackController::new(Countdown, PlaybackConfig::default());
            for op in ops {
                match op {
                    Op::Toggle => c.toggle_play_pause(),
                    Op::Reset => c.reset(),
                    Op::Forward => c.step_forward(),
                    Op::Backward => c.step_backward(),
                    Op::Seek(i) => c.seek(i),
                    Op::Speed(s) => c.set_speed(s),
                    Op::Params(start) => { let _ = c.set_parameters(CountdownParams { start }); }
                    Op::Clock(ms) => c.advance_clock(ms),
                }
                prop_assert!(c.cursor() < c.trace_len());
                prop_assert!(c.current_step().index == c.cursor());
                if c.is_playing() && c.trace_len() > 1 {
                    prop_assert!(!c.at_end());
                }
            }
        }

        /// Regeneration is deterministic.
        #[test]
        fn prop_generation_deterministic(start in -3i64..30) {
            let params = CountdownParams { start };
            prop_assert_eq!(Countdown.generate(&params), Countdown.generate(&params));
        }
    }
}
