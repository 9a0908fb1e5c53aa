//! 0/1 knapsack.

use serde::{Deserialize, Serialize};

use crate::algorithms::input::{format_list, format_row, parse_bounded_list};
use crate::engine::generator::{
    parse_arg, reject_unknown, text_arg, AlgorithmInfo, Category, FrameView, ParamArgs,
    TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// Knapsack input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackParams {
    /// Item weights, comma-separated.
    pub weights: String,
    /// Item values, same order as `weights`.
    pub values: String,
    /// Weight limit.
    pub capacity: usize,
}

impl Default for KnapsackParams {
    fn default() -> Self {
        Self {
            weights: "1, 3, 4, 5".to_string(),
            values: "1, 4, 5, 7".to_string(),
            capacity: 7,
        }
    }
}

/// Knapsack visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KnapsackFrame {
    /// Item weights.
    pub weights: Vec<i64>,
    /// Item values.
    pub values: Vec<i64>,
    /// `table[i][w]`: best value from the first `i` items within weight `w`.
    pub table: Vec<Vec<i64>>,
    /// Cell written or visited at this step.
    pub cell: Option<(usize, usize)>,
    /// Whether the item was taken at `cell`.
    pub took: bool,
    /// Items chosen by the traceback, 0-based.
    pub chosen: Vec<usize>,
}

impl FrameView for KnapsackFrame {
    fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.table.len() + 1);
        for (i, row) in self.table.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(w, v)| {
                    if self.cell == Some((i, w)) {
                        format!("*{v}")
                    } else {
                        v.to_string()
                    }
                })
                .collect();
            lines.push(format!("{i:>2}| {}", format_row(&cells, 3)));
        }
        if !self.chosen.is_empty() {
            let items: Vec<String> = self.chosen.iter().map(|i| (i + 1).to_string()).collect();
            lines.push(format!("items {}", items.join(", ")));
        }
        lines
    }
}

struct Items {
    weights: Vec<i64>,
    sizes: Vec<usize>,
    values: Vec<i64>,
}

/// Knapsack generator.
#[derive(Debug, Clone)]
pub struct KnapsackGenerator {
    max_items: usize,
    max_capacity: usize,
    max_cells: usize,
}

impl KnapsackGenerator {
    /// Create a generator with item, capacity and table-size bounds.
    #[must_use]
    pub const fn new(max_items: usize, max_capacity: usize, max_cells: usize) -> Self {
        Self {
            max_items,
            max_capacity,
            max_cells,
        }
    }

    fn validate(&self, params: &KnapsackParams) -> Result<Items, String> {
        let weights = parse_bounded_list(&params.weights, self.max_items)?;
        let values = parse_bounded_list(&params.values, self.max_items)?;
        if weights.len() != values.len() {
            return Err(format!(
                "{} weights but {} values",
                weights.len(),
                values.len()
            ));
        }
        let sizes = weights
            .iter()
            .map(|&w| usize::try_from(w).ok().filter(|&w| w > 0))
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(|| "Weights must be positive".to_string())?;
        if values.iter().any(|&v| v < 0) {
            return Err("Values must not be negative".to_string());
        }
        // Every table cell is bounded by the total value.
        if values.iter().try_fold(0_i64, |acc, &v| acc.checked_add(v)).is_none() {
            return Err("Values are too large: their total must fit in 64 bits".to_string());
        }
        if params.capacity > self.max_capacity {
            return Err(format!("Capacity may be at most {}", self.max_capacity));
        }
        let cells = (weights.len() + 1) * (params.capacity + 1);
        if cells > self.max_cells {
            return Err(format!(
                "Table of {cells} cells is too large (limit {})",
                self.max_cells
            ));
        }
        Ok(Items {
            weights,
            sizes,
            values,
        })
    }
}

impl TraceGenerator for KnapsackGenerator {
    type Params = KnapsackParams;
    type Frame = KnapsackFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "knapsack",
            name: "0/1 Knapsack",
            category: Category::DynamicProgramming,
            summary: "Most valuable set of items that fits the weight limit",
            params: &["weights", "values", "capacity"],
        }
    }

    fn generate(&self, params: &KnapsackParams) -> Trace<KnapsackFrame> {
        let Items {
            weights,
            sizes,
            values,
        } = match self.validate(params) {
            Ok(items) => items,
            Err(message) => return Trace::invalid(message, KnapsackFrame::default()),
        };

        let n = weights.len();
        let cap = params.capacity;
        let mut frame = KnapsackFrame {
            table: vec![vec![0; cap + 1]; n + 1],
            weights: weights.clone(),
            values: values.clone(),
            ..KnapsackFrame::default()
        };
        let mut rec = TraceRecorder::new();
        rec.emit_opening(
            *params == KnapsackParams::default(),
            format!(
                "Press play to pack weights [{}] into capacity {cap}",
                format_list(&weights)
            ),
            format!("Row 0 is 0: no items, no value (capacity {cap})"),
            frame.clone(),
        );

        for i in 1..=n {
            let (wi, vi) = (sizes[i - 1], values[i - 1]);
            for w in 0..=cap {
                let skip = frame.table[i - 1][w];
                let take = (wi <= w).then(|| frame.table[i - 1][w - wi] + vi);
                let (best, took, message) = match take {
                    Some(take) if take > skip => (
                        take,
                        true,
                        format!("Item {i} (w {wi}, v {vi}) at capacity {w}: take → {take}"),
                    ),
                    Some(take) => (
                        skip,
                        false,
                        format!("Item {i} at capacity {w}: skip {skip} ≥ take {take}"),
                    ),
                    None => (
                        skip,
                        false,
                        format!("Item {i} (w {wi}) does not fit capacity {w}: keep {skip}"),
                    ),
                };
                frame.table[i][w] = best;
                frame.cell = Some((i, w));
                frame.took = took;
                rec.emit(message, frame.clone());
            }
        }

        let mut w = cap;
        for i in (1..=n).rev() {
            if frame.table[i][w] != frame.table[i - 1][w] {
                frame.chosen.insert(0, i - 1);
                frame.cell = Some((i, w));
                frame.took = true;
                rec.emit(format!("Item {i} is in the best pack"), frame.clone());
                w -= sizes[i - 1];
            }
        }

        let best = frame.table[n][cap];
        frame.cell = None;
        frame.took = false;
        rec.finish(
            format!("Best value {best} within capacity {cap}"),
            frame,
            Outcome::Value(best),
        )
    }

    fn apply_args(&self, current: &KnapsackParams, args: &ParamArgs) -> VizResult<KnapsackParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(weights) = text_arg(args, "weights") {
            next.weights = weights;
        }
        if let Some(values) = text_arg(args, "values") {
            next.values = values;
        }
        if let Some(capacity) = parse_arg(args, "capacity")? {
            next.capacity = capacity;
        }
        Ok(next)
    }
}
