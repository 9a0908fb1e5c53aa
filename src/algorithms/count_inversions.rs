//! Inversion counting with merge sort.
//!
//! While merging two sorted halves, taking an element from the right half
//! means it is smaller than every element still waiting in the left half;
//! each of those is one inversion.

use serde::{Deserialize, Serialize};

use crate::algorithms::input::{format_list, parse_bounded_list};
use crate::engine::generator::{
    reject_unknown, text_arg, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// Inversion count input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InversionParams {
    /// Comma-separated integers.
    pub input: String,
}

impl Default for InversionParams {
    fn default() -> Self {
        Self {
            input: "8, 4, 2, 1".to_string(),
        }
    }
}

/// Inversion count visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InversionFrame {
    /// Working array; sorted segments appear as merges complete.
    pub array: Vec<i64>,
    /// Segment being processed, inclusive bounds.
    pub range: Option<(usize, usize)>,
    /// Left and right positions under comparison.
    pub comparing: Option<(usize, usize)>,
    /// Inversions found so far.
    pub inversions_count: u64,
}

impl FrameView for InversionFrame {
    fn render_lines(&self) -> Vec<String> {
        let cells: Vec<String> = self
            .array
            .iter()
            .enumerate()
            .map(|(i, v)| match self.comparing {
                Some((l, r)) if i == l || i == r => format!("[{v}]"),
                _ => v.to_string(),
            })
            .collect();
        let mut lines = vec![cells.join(" ")];
        if let Some((lo, hi)) = self.range {
            lines.push(format!("segment {lo}..={hi}"));
        }
        lines.push(format!("inversions {}", self.inversions_count));
        lines
    }
}

/// Merge-sort inversion counter.
#[derive(Debug, Clone)]
pub struct InversionGenerator {
    max_len: usize,
}

impl InversionGenerator {
    /// Create a generator accepting lists up to `max_len` long.
    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

struct MergeCounter {
    array: Vec<i64>,
    inversions: u64,
    rec: TraceRecorder<InversionFrame>,
}

impl MergeCounter {
    fn frame(&self, range: Option<(usize, usize)>, comparing: Option<(usize, usize)>) -> InversionFrame {
        InversionFrame {
            array: self.array.clone(),
            range,
            comparing,
            inversions_count: self.inversions,
        }
    }

    fn sort(&mut self, lo: usize, hi: usize) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let frame = self.frame(Some((lo, hi)), None);
        self.rec.emit(
            format!(
                "Split [{}] into [{}] and [{}]",
                format_list(&self.array[lo..=hi]),
                format_list(&self.array[lo..=mid]),
                format_list(&self.array[mid + 1..=hi])
            ),
            frame,
        );
        self.sort(lo, mid);
        self.sort(mid + 1, hi);
        self.merge(lo, mid, hi);
    }

    fn merge(&mut self, lo: usize, mid: usize, hi: usize) {
        let left = self.array[lo..=mid].to_vec();
        let right = self.array[mid + 1..=hi].to_vec();
        let mut merged = Vec::with_capacity(hi - lo + 1);
        let (mut i, mut j) = (0, 0);

        while i < left.len() && j < right.len() {
            let (l, r) = (left[i], right[j]);
            let comparing = Some((lo + i, mid + 1 + j));
            if l <= r {
                merged.push(l);
                i += 1;
                let frame = self.frame(Some((lo, hi)), comparing);
                self.rec.emit(format!("Compare {l} and {r}: take {l}"), frame);
            } else {
                let waiting = (left.len() - i) as u64;
                self.inversions += waiting;
                merged.push(r);
                j += 1;
                let frame = self.frame(Some((lo, hi)), comparing);
                self.rec.emit(
                    format!("Compare {l} and {r}: {r} is smaller than {waiting} left element(s), +{waiting} inversions"),
                    frame,
                );
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);

        self.array[lo..=hi].copy_from_slice(&merged);
        let frame = self.frame(Some((lo, hi)), None);
        self.rec
            .emit(format!("Merged into [{}]", format_list(&merged)), frame);
    }
}

impl TraceGenerator for InversionGenerator {
    type Params = InversionParams;
    type Frame = InversionFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "count-inversions",
            name: "Count Inversions",
            category: Category::DivideAndConquer,
            summary: "Count out-of-order pairs while merge sorting",
            params: &["input"],
        }
    }

    fn generate(&self, params: &InversionParams) -> Trace<InversionFrame> {
        let values = match parse_bounded_list(&params.input, self.max_len) {
            Ok(values) => values,
            Err(message) => return Trace::invalid(message, InversionFrame::default()),
        };

        let shown = format_list(&values);
        let hi = values.len() - 1;
        let mut counter = MergeCounter {
            array: values,
            inversions: 0,
            rec: TraceRecorder::new(),
        };
        let opening = counter.frame(Some((0, hi)), None);
        counter.rec.emit_opening(
            *params == InversionParams::default(),
            format!("Press play to count inversions in [{shown}]"),
            format!("Merge sort [{shown}] and count inversions"),
            opening,
        );

        counter.sort(0, hi);

        let total = counter.inversions;
        let last = counter.frame(None, None);
        counter.rec.finish(
            format!(
                "{total} inversions; sorted [{}]",
                format_list(&counter.array)
            ),
            last,
            Outcome::Count(total),
        )
    }

    fn apply_args(&self, current: &InversionParams, args: &ParamArgs) -> VizResult<InversionParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(input) = text_arg(args, "input") {
            next.input = input;
        }
        Ok(next)
    }
}
