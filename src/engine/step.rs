//! Steps, traces and the recorder that builds them.
//!
//! A [`Trace`] is never empty and never partially built: the only ways to
//! obtain one are [`TraceRecorder::finish`], which appends a final step
//! carrying the terminal [`Outcome`], and [`Trace::invalid`], which yields a
//! single explanatory step for rejected input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal result of one algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// A count (moves, solutions, inversions, ...).
    Count(u64),
    /// A yes/no answer.
    Bool(bool),
    /// A single numeric answer (minimal cost, best value, ...).
    Value(i64),
    /// A computed sequence.
    Sequence(Vec<i64>),
    /// A computed string.
    Text(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Sequence(values) => {
                let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", joined.join(", "))
            }
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Immutable snapshot of one point in a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<F> {
    /// Position in the trace.
    pub index: usize,
    /// What happened at this step.
    pub message: String,
    /// Algorithm-specific state, owned by this step alone.
    pub frame: F,
    /// Terminal result; only set on the final step of an accepted run.
    pub result: Option<Outcome>,
}

/// Ordered, non-empty sequence of steps for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace<F> {
    steps: Vec<Step<F>>,
}

#[allow(clippy::len_without_is_empty)]
impl<F> Trace<F> {
    /// Single-step trace explaining why the input was rejected.
    #[must_use]
    pub fn invalid(message: impl Into<String>, frame: F) -> Self {
        Self {
            steps: vec![Step {
                index: 0,
                message: message.into(),
                frame,
                result: None,
            }],
        }
    }

    /// Number of steps (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Index of the final step.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Get the step at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step<F>> {
        self.steps.get(index)
    }

    /// Get the step at `index`, clamped into range.
    #[must_use]
    pub fn clamped(&self, index: usize) -> &Step<F> {
        &self.steps[index.min(self.last_index())]
    }

    /// First step.
    #[must_use]
    pub fn first(&self) -> &Step<F> {
        &self.steps[0]
    }

    /// Final step.
    #[must_use]
    pub fn last(&self) -> &Step<F> {
        &self.steps[self.last_index()]
    }

    /// Terminal result of the run, `None` for rejected input.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.last().result.as_ref()
    }

    /// All steps in order.
    #[must_use]
    pub fn steps(&self) -> &[Step<F>] {
        &self.steps
    }

    /// Iterate over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step<F>> {
        self.steps.iter()
    }
}

impl<'a, F> IntoIterator for &'a Trace<F> {
    type Item = &'a Step<F>;
    type IntoIter = std::slice::Iter<'a, Step<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps while a generator runs.
///
/// Frames are moved in, so every step owns its snapshot; generators clone
/// their working tables at each emission.
#[derive(Debug)]
pub struct TraceRecorder<F> {
    steps: Vec<Step<F>>,
}

impl<F> Default for TraceRecorder<F> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<F> TraceRecorder<F> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an intermediate step.
    pub fn emit(&mut self, message: impl Into<String>, frame: F) {
        let index = self.steps.len();
        self.steps.push(Step {
            index,
            message: message.into(),
            frame,
            result: None,
        });
    }

    /// Record the opening step.
    ///
    /// With default parameters the trace opens on an idle "configure and
    /// start" step; otherwise it opens on the first computational action.
    pub fn emit_opening(
        &mut self,
        at_defaults: bool,
        idle: impl Into<String>,
        first_action: impl Into<String>,
        frame: F,
    ) {
        if at_defaults {
            self.emit(idle, frame);
        } else {
            self.emit(first_action, frame);
        }
    }

    /// Number of steps recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append the final step carrying the terminal result and seal the trace.
    #[must_use]
    pub fn finish(mut self, message: impl Into<String>, frame: F, outcome: Outcome) -> Trace<F> {
        let index = self.steps.len();
        self.steps.push(Step {
            index,
            message: message.into(),
            frame,
            result: Some(outcome),
        });
        Trace { steps: self.steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_trace_has_one_step_without_result() {
        let trace = Trace::invalid("Please enter numbers", Vec::<i64>::new());
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.last_index(), 0);
        assert!(trace.outcome().is_none());
        assert_eq!(trace.first().message, "Please enter numbers");
    }

    #[test]
    fn test_recorder_indexes_and_result() {
        let mut rec = TraceRecorder::new();
        assert!(rec.is_empty());
        rec.emit("start", 0);
        rec.emit("middle", 1);
        let trace = rec.finish("done", 2, Outcome::Count(3));

        assert_eq!(trace.len(), 3);
        for (i, step) in trace.iter().enumerate() {
            assert_eq!(step.index, i);
        }
        assert!(trace.first().result.is_none());
        assert_eq!(trace.outcome(), Some(&Outcome::Count(3)));
    }

    #[test]
    fn test_finish_alone_yields_one_step() {
        let trace = TraceRecorder::new().finish("trivial", (), Outcome::Bool(true));
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.outcome(), Some(&Outcome::Bool(true)));
    }

    #[test]
    fn test_emit_opening_picks_message() {
        let mut idle = TraceRecorder::new();
        idle.emit_opening(true, "Configure and press play", "Compare 3 and 1", ());
        let mut busy = TraceRecorder::new();
        busy.emit_opening(false, "Configure and press play", "Compare 3 and 1", ());

        let idle = idle.finish("end", (), Outcome::Count(0));
        let busy = busy.finish("end", (), Outcome::Count(0));
        assert_eq!(idle.first().message, "Configure and press play");
        assert_eq!(busy.first().message, "Compare 3 and 1");
    }

    #[test]
    fn test_clamped_access() {
        let mut rec = TraceRecorder::new();
        rec.emit("a", 'a');
        let trace = rec.finish("b", 'b', Outcome::Value(1));
        assert_eq!(trace.clamped(0).frame, 'a');
        assert_eq!(trace.clamped(99).frame, 'b');
        assert!(trace.get(2).is_none());
    }

    #[test]
    fn test_steps_own_their_frames() {
        let mut table = vec![0, 0, 0];
        let mut rec = TraceRecorder::new();
        rec.emit("before", table.clone());
        table[1] = 7;
        let trace = rec.finish("after", table.clone(), Outcome::Value(7));

        assert_eq!(trace.first().frame, vec![0, 0, 0]);
        assert_eq!(trace.last().frame, vec![0, 7, 0]);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Count(7).to_string(), "7");
        assert_eq!(Outcome::Bool(false).to_string(), "false");
        assert_eq!(Outcome::Sequence(vec![1, 4, 8]).to_string(), "[1, 4, 8]");
        assert_eq!(Outcome::Text("BCBA".into()).to_string(), "\"BCBA\"");
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&Outcome::Count(6)).expect("serialize");
        assert_eq!(json, r#"{"kind":"count","value":6}"#);
        let back: Outcome = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Outcome::Count(6));
    }
}
