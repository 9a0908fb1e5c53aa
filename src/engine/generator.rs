//! Trace generator trait.
//!
//! Every algorithm implements [`TraceGenerator`]. This ensures:
//! - Pure generation (same parameters → structurally identical trace)
//! - Input validation inside the generator (rejected input becomes a
//!   one-step trace, never an error)
//! - Renderer independence (CLI and TUI consume the same frames)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::engine::step::Trace;
use crate::error::{VizError, VizResult};

/// String key/value parameter bindings coming from a text surface.
pub type ParamArgs = BTreeMap<String, String>;

/// Algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Plain recursion.
    Recursion,
    /// Divide and conquer.
    DivideAndConquer,
    /// Backtracking search.
    Backtracking,
    /// Dynamic programming.
    DynamicProgramming,
    /// Greedy methods.
    Greedy,
    /// Data-layout sketches.
    Storage,
}

impl Category {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recursion => "Recursion",
            Self::DivideAndConquer => "Divide & Conquer",
            Self::Backtracking => "Backtracking",
            Self::DynamicProgramming => "Dynamic Programming",
            Self::Greedy => "Greedy",
            Self::Storage => "Storage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static description of one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    /// Catalogue id (e.g. "n-queens").
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Algorithm family.
    pub category: Category,
    /// One-line description.
    pub summary: &'static str,
    /// Parameter keys accepted by [`TraceGenerator::apply_args`].
    pub params: &'static [&'static str],
}

/// Renders a frame as plain text lines.
pub trait FrameView {
    /// Lines describing the frame, top to bottom.
    fn render_lines(&self) -> Vec<String>;
}

/// MANDATORY trait for every algorithm.
///
/// # Example
///
/// ```ignore
/// impl TraceGenerator for HanoiGenerator {
///     type Params = HanoiParams;
///     type Frame = HanoiFrame;
///
///     fn generate(&self, params: &HanoiParams) -> Trace<HanoiFrame> {
///         let mut rec = TraceRecorder::new();
///         // ... emit a step at every decision point
///         rec.finish("Done", frame, Outcome::Count(moves))
///     }
///     // ... other methods
/// }
/// ```
pub trait TraceGenerator {
    /// Algorithm input.
    type Params: Clone + Debug + Default + PartialEq + Serialize;

    /// Per-step visualization state.
    type Frame: Clone + Debug + PartialEq + Serialize;

    /// Static description.
    fn info(&self) -> AlgorithmInfo;

    /// Run the algorithm to completion and record every step.
    ///
    /// Must return at least one step. Rejected input yields
    /// [`Trace::invalid`].
    fn generate(&self, params: &Self::Params) -> Trace<Self::Frame>;

    /// Bind string arguments onto a copy of `current`.
    ///
    /// # Errors
    ///
    /// Returns `VizError::InvalidParameter` for unknown keys or values that
    /// do not parse into the field's type. Range and content checks stay in
    /// [`TraceGenerator::generate`].
    fn apply_args(&self, current: &Self::Params, args: &ParamArgs) -> VizResult<Self::Params>;
}

/// Reject keys the generator does not know.
///
/// # Errors
///
/// Returns `VizError::InvalidParameter` naming the first unknown key.
pub fn reject_unknown(args: &ParamArgs, info: &AlgorithmInfo) -> VizResult<()> {
    match args.keys().find(|k| !info.params.contains(&k.as_str())) {
        Some(key) => Err(VizError::invalid_parameter(
            key.clone(),
            format!("{} accepts: {}", info.id, info.params.join(", ")),
        )),
        None => Ok(()),
    }
}

/// Parse an optional typed argument.
///
/// # Errors
///
/// Returns `VizError::InvalidParameter` if the value does not parse.
pub fn parse_arg<T: FromStr>(args: &ParamArgs, key: &str) -> VizResult<Option<T>> {
    args.get(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                VizError::invalid_parameter(
                    key,
                    format!("'{raw}' is not a valid {}", std::any::type_name::<T>()),
                )
            })
        })
        .transpose()
}

/// Get an optional string argument.
#[must_use]
pub fn text_arg(args: &ParamArgs, key: &str) -> Option<String> {
    args.get(key).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: AlgorithmInfo = AlgorithmInfo {
        id: "demo",
        name: "Demo",
        category: Category::Recursion,
        summary: "test",
        params: &["n", "label"],
    };

    fn args(pairs: &[(&str, &str)]) -> ParamArgs {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_reject_unknown_key() {
        let err = reject_unknown(&args(&[("size", "3")]), &INFO).unwrap_err();
        assert!(err.to_string().contains("size"));
        assert!(reject_unknown(&args(&[("n", "3"), ("label", "x")]), &INFO).is_ok());
    }

    #[test]
    fn test_parse_arg() {
        let a = args(&[("n", " 12 ")]);
        assert_eq!(parse_arg::<usize>(&a, "n").expect("parse"), Some(12));
        assert_eq!(parse_arg::<usize>(&a, "missing").expect("parse"), None);
    }

    #[test]
    fn test_parse_arg_rejects_garbage() {
        let err = parse_arg::<usize>(&args(&[("n", "three")]), "n").unwrap_err();
        assert!(matches!(err, VizError::InvalidParameter { .. }));
    }

    #[test]
    fn test_text_arg() {
        let a = args(&[("label", "ABC")]);
        assert_eq!(text_arg(&a, "label").as_deref(), Some("ABC"));
        assert!(text_arg(&a, "other").is_none());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::DynamicProgramming.to_string(), "Dynamic Programming");
        let json = serde_json::to_string(&Category::DivideAndConquer).expect("serialize");
        assert_eq!(json, "\"divide_and_conquer\"");
    }
}
