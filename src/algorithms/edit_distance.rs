//! Levenshtein edit distance.
//!
//! `table[i][j]` is the cheapest way to turn the first `i` characters of
//! the source into the first `j` characters of the target using unit-cost
//! insert, delete and replace.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::algorithms::input::format_row;
use crate::engine::generator::{
    reject_unknown, text_arg, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// Edit distance input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDistanceParams {
    /// String to transform.
    pub source: String,
    /// String to reach.
    pub target: String,
}

impl Default for EditDistanceParams {
    fn default() -> Self {
        Self {
            source: "kitten".to_string(),
            target: "sitting".to_string(),
        }
    }
}

/// One edit on the traceback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Characters already equal.
    Keep {
        /// The shared character.
        ch: char,
    },
    /// Replace a source character.
    Replace {
        /// Source character.
        from: char,
        /// Target character.
        to: char,
    },
    /// Insert a target character.
    Insert {
        /// Inserted character.
        ch: char,
    },
    /// Delete a source character.
    Delete {
        /// Deleted character.
        ch: char,
    },
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep { ch } => write!(f, "keep '{ch}'"),
            Self::Replace { from, to } => write!(f, "replace '{from}' with '{to}'"),
            Self::Insert { ch } => write!(f, "insert '{ch}'"),
            Self::Delete { ch } => write!(f, "delete '{ch}'"),
        }
    }
}

/// Edit distance visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditDistanceFrame {
    /// Source characters (rows).
    pub source: Vec<char>,
    /// Target characters (columns).
    pub target: Vec<char>,
    /// DP table.
    pub table: Vec<Vec<u32>>,
    /// Cell written or visited at this step.
    pub cell: Option<(usize, usize)>,
    /// Edits recovered by the traceback, in source order.
    pub ops: Vec<EditOp>,
}

impl FrameView for EditDistanceFrame {
    fn render_lines(&self) -> Vec<String> {
        let mut header: Vec<String> = vec![" ".into(), " ".into()];
        header.extend(self.target.iter().map(ToString::to_string));
        let mut lines = vec![format_row(&header, 2)];
        for (i, row) in self.table.iter().enumerate() {
            let label = if i == 0 {
                " ".to_string()
            } else {
                self.source.get(i - 1).map_or_else(String::new, ToString::to_string)
            };
            let mut cells = vec![label];
            cells.extend(row.iter().enumerate().map(|(j, v)| {
                if self.cell == Some((i, j)) {
                    format!("*{v}")
                } else {
                    v.to_string()
                }
            }));
            lines.push(format_row(&cells, 2));
        }
        if !self.ops.is_empty() {
            let ops: Vec<String> = self.ops.iter().map(ToString::to_string).collect();
            lines.push(ops.join(", "));
        }
        lines
    }
}

/// Edit distance generator.
#[derive(Debug, Clone)]
pub struct EditDistanceGenerator {
    max_len: usize,
}

impl EditDistanceGenerator {
    /// Create a generator accepting strings up to `max_len` characters.
    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl TraceGenerator for EditDistanceGenerator {
    type Params = EditDistanceParams;
    type Frame = EditDistanceFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "edit-distance",
            name: "Edit Distance",
            category: Category::DynamicProgramming,
            summary: "Fewest inserts, deletes and replacements turning one string into another",
            params: &["source", "target"],
        }
    }

    fn generate(&self, params: &EditDistanceParams) -> Trace<EditDistanceFrame> {
        let s: Vec<char> = params.source.trim().chars().collect();
        let t: Vec<char> = params.target.trim().chars().collect();
        if s.len() > self.max_len || t.len() > self.max_len {
            return Trace::invalid(
                format!("Strings may be at most {} characters", self.max_len),
                EditDistanceFrame::default(),
            );
        }

        let (m, n) = (s.len(), t.len());
        let mut table = vec![vec![0u32; n + 1]; m + 1];
        for (i, row) in table.iter_mut().enumerate() {
            row[0] = i as u32;
        }
        for (j, cell) in table[0].iter_mut().enumerate() {
            *cell = j as u32;
        }
        let mut frame = EditDistanceFrame {
            source: s.clone(),
            target: t.clone(),
            table,
            cell: None,
            ops: Vec::new(),
        };

        let mut rec = TraceRecorder::new();
        rec.emit_opening(
            *params == EditDistanceParams::default(),
            format!(
                "Press play to turn \"{}\" into \"{}\"",
                params.source.trim(),
                params.target.trim()
            ),
            "Seed row 0 with insert costs and column 0 with delete costs",
            frame.clone(),
        );

        for i in 1..=m {
            for j in 1..=n {
                let message = if s[i - 1] == t[j - 1] {
                    frame.table[i][j] = frame.table[i - 1][j - 1];
                    format!("'{}' = '{}': copy diagonal {}", s[i - 1], t[j - 1], frame.table[i][j])
                } else {
                    let replace = frame.table[i - 1][j - 1];
                    let delete = frame.table[i - 1][j];
                    let insert = frame.table[i][j - 1];
                    frame.table[i][j] = 1 + replace.min(delete).min(insert);
                    format!(
                        "'{}' ≠ '{}': 1 + min(replace {replace}, delete {delete}, insert {insert}) = {}",
                        s[i - 1],
                        t[j - 1],
                        frame.table[i][j]
                    )
                };
                frame.cell = Some((i, j));
                rec.emit(message, frame.clone());
            }
        }

        let (mut i, mut j) = (m, n);
        while i > 0 || j > 0 {
            let here = frame.table[i][j];
            let op = if i > 0 && j > 0 && s[i - 1] == t[j - 1] && here == frame.table[i - 1][j - 1] {
                i -= 1;
                j -= 1;
                EditOp::Keep { ch: s[i] }
            } else if i > 0 && j > 0 && here == frame.table[i - 1][j - 1] + 1 {
                i -= 1;
                j -= 1;
                EditOp::Replace { from: s[i], to: t[j] }
            } else if i > 0 && here == frame.table[i - 1][j] + 1 {
                i -= 1;
                EditOp::Delete { ch: s[i] }
            } else {
                j -= 1;
                EditOp::Insert { ch: t[j] }
            };
            frame.cell = Some((i, j));
            frame.ops.insert(0, op);
            if !matches!(op, EditOp::Keep { .. }) {
                rec.emit(format!("Edit: {op}"), frame.clone());
            }
        }

        frame.cell = None;
        let distance = frame.table[m][n];
        rec.finish(
            format!("Edit distance is {distance}"),
            frame,
            Outcome::Value(i64::from(distance)),
        )
    }

    fn apply_args(
        &self,
        current: &EditDistanceParams,
        args: &ParamArgs,
    ) -> VizResult<EditDistanceParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(source) = text_arg(args, "source") {
            next.source = source;
        }
        if let Some(target) = text_arg(args, "target") {
            next.target = target;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, target: &str) -> Trace<EditDistanceFrame> {
        EditDistanceGenerator::new(12).generate(&EditDistanceParams {
            source: source.to_string(),
            target: target.to_string(),
        })
    }

    fn apply(ops: &[EditOp]) -> String {
        ops.iter()
            .filter_map(|op| match op {
                EditOp::Keep { ch } | EditOp::Insert { ch } => Some(*ch),
                EditOp::Replace { to, .. } => Some(*to),
                EditOp::Delete { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_kitten_sitting() {
        let trace = EditDistanceGenerator::new(12).generate(&EditDistanceParams::default());
        assert_eq!(trace.outcome(), Some(&Outcome::Value(3)));
        let ops = &trace.last().frame.ops;
        assert_eq!(apply(ops), "sitting");
        let edits = ops.iter().filter(|op| !matches!(op, EditOp::Keep { .. })).count();
        assert_eq!(edits, 3);
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(run("", "abc").outcome(), Some(&Outcome::Value(3)));
        assert_eq!(run("abc", "").outcome(), Some(&Outcome::Value(3)));
        assert_eq!(run("", "").outcome(), Some(&Outcome::Value(0)));
    }

    #[test]
    fn test_identical() {
        let trace = run("same", "same");
        assert_eq!(trace.outcome(), Some(&Outcome::Value(0)));
        assert_eq!(apply(&trace.last().frame.ops), "same");
    }

    #[test]
    fn test_rejects_long() {
        let trace = run("abcdefghijklm", "a");
        assert_eq!(trace.len(), 1);
        assert!(trace.outcome().is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_ops_rebuild_target(a in "[ab]{0,6}", b in "[ab]{0,6}") {
                let trace = run(&a, &b);
                let ops = &trace.last().frame.ops;
                prop_assert_eq!(apply(ops), b);
                let edits = ops.iter().filter(|op| !matches!(op, EditOp::Keep { .. })).count() as i64;
                prop_assert_eq!(trace.outcome(), Some(&Outcome::Value(edits)));
            }
        }
    }
}
