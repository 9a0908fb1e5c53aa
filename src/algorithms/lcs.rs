//! Longest common subsequence.
//!
//! Fills the `(m+1) x (n+1)` table row by row, then walks back from the
//! bottom-right corner to read one longest subsequence.

use serde::{Deserialize, Serialize};

use crate::algorithms::input::format_row;
use crate::engine::generator::{
    reject_unknown, text_arg, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// LCS input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsParams {
    /// Row string.
    pub first: String,
    /// Column string.
    pub second: String,
}

impl Default for LcsParams {
    fn default() -> Self {
        Self {
            first: "ABCBDAB".to_string(),
            second: "BDCABA".to_string(),
        }
    }
}

/// LCS visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LcsFrame {
    /// Row string characters.
    pub first: Vec<char>,
    /// Column string characters.
    pub second: Vec<char>,
    /// DP table; `table[i][j]` is the LCS length of the prefixes.
    pub table: Vec<Vec<u32>>,
    /// Cell written or visited at this step.
    pub cell: Option<(usize, usize)>,
    /// Cells on the traceback path.
    pub path: Vec<(usize, usize)>,
    /// Subsequence read so far by the traceback.
    pub lcs: String,
}

impl FrameView for LcsFrame {
    fn render_lines(&self) -> Vec<String> {
        let mut header: Vec<String> = vec![" ".into(), " ".into()];
        header.extend(self.second.iter().map(ToString::to_string));
        let mut lines = vec![format_row(&header, 2)];
        for (i, row) in self.table.iter().enumerate() {
            let label = if i == 0 {
                " ".to_string()
            } else {
                self.first.get(i - 1).map_or_else(String::new, ToString::to_string)
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
        if !self.lcs.is_empty() {
            lines.push(format!("lcs {}", self.lcs));
        }
        lines
    }
}

/// LCS generator.
#[derive(Debug, Clone)]
pub struct LcsGenerator {
    max_len: usize,
}

impl LcsGenerator {
    /// Create a generator accepting strings up to `max_len` characters.
    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl TraceGenerator for LcsGenerator {
    type Params = LcsParams;
    type Frame = LcsFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "lcs",
            name: "Longest Common Subsequence",
            category: Category::DynamicProgramming,
            summary: "Longest sequence of characters appearing in order in both strings",
            params: &["first", "second"],
        }
    }

    fn generate(&self, params: &LcsParams) -> Trace<LcsFrame> {
        let a: Vec<char> = params.first.trim().chars().collect();
        let b: Vec<char> = params.second.trim().chars().collect();
        if a.is_empty() || b.is_empty() {
            return Trace::invalid("Please enter two non-empty strings", LcsFrame::default());
        }
        if a.len() > self.max_len || b.len() > self.max_len {
            return Trace::invalid(
                format!("Strings may be at most {} characters", self.max_len),
                LcsFrame::default(),
            );
        }

        let (m, n) = (a.len(), b.len());
        let mut frame = LcsFrame {
            first: a.clone(),
            second: b.clone(),
            table: vec![vec![0; n + 1]; m + 1],
            ..LcsFrame::default()
        };
        let mut rec = TraceRecorder::new();
        rec.emit_opening(
            *params == LcsParams::default(),
            "Press play to fill the LCS table",
            format!("Fill a {}x{} table, first row and column are 0", m + 1, n + 1),
            frame.clone(),
        );

        for i in 1..=m {
            for j in 1..=n {
                let (ca, cb) = (a[i - 1], b[j - 1]);
                let message = if ca == cb {
                    frame.table[i][j] = frame.table[i - 1][j - 1] + 1;
                    format!("'{ca}' matches: diagonal + 1 = {}", frame.table[i][j])
                } else {
                    let (up, left) = (frame.table[i - 1][j], frame.table[i][j - 1]);
                    frame.table[i][j] = up.max(left);
                    format!("'{ca}' ≠ '{cb}': max({up}, {left}) = {}", frame.table[i][j])
                };
                frame.cell = Some((i, j));
                rec.emit(message, frame.clone());
            }
        }

        let (mut i, mut j) = (m, n);
        let mut reversed = Vec::new();
        while i > 0 && j > 0 {
            frame.cell = Some((i, j));
            frame.path.push((i, j));
            if a[i - 1] == b[j - 1] {
                reversed.push(a[i - 1]);
                frame.lcs = reversed.iter().rev().collect();
                rec.emit(format!("Take '{}'", a[i - 1]), frame.clone());
                i -= 1;
                j -= 1;
            } else if frame.table[i - 1][j] >= frame.table[i][j - 1] {
                rec.emit("Move up", frame.clone());
                i -= 1;
            } else {
                rec.emit("Move left", frame.clone());
                j -= 1;
            }
        }

        frame.cell = None;
        let lcs = frame.lcs.clone();
        let message = if lcs.is_empty() {
            "No common characters".to_string()
        } else {
            format!("LCS is \"{lcs}\" (length {})", lcs.chars().count())
        };
        rec.finish(message, frame, Outcome::Text(lcs))
    }

    fn apply_args(&self, current: &LcsParams, args: &ParamArgs) -> VizResult<LcsParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(first) = text_arg(args, "first") {
            next.first = first;
        }
        if let Some(second) = text_arg(args, "second") {
            next.second = second;
        }
        Ok(next)
    }
}
