//! Subset sum by backtracking.
//!
//! Each number is first included, then excluded. Numbers are non-negative,
//! so a branch whose running sum would pass the target is pruned. The search
//! stops at the first subset that hits the target.

use serde::{Deserialize, Serialize};

use crate::algorithms::input::{format_list, parse_bounded_list};
use crate::engine::generator::{
    parse_arg, reject_unknown, text_arg, AlgorithmInfo, Category, FrameView, ParamArgs,
    TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// Subset sum input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetSumParams {
    /// Comma-separated non-negative integers.
    pub numbers: String,
    /// Sum to reach.
    pub target: i64,
}

impl Default for SubsetSumParams {
    fn default() -> Self {
        Self {
            numbers: "3, 4, 5".to_string(),
            target: 7,
        }
    }
}

/// Subset sum visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubsetSumFrame {
    /// Input numbers.
    pub numbers: Vec<i64>,
    /// Target sum.
    pub target: i64,
    /// Number currently being decided.
    pub index: Option<usize>,
    /// Positions included on the current branch.
    pub chosen: Vec<usize>,
    /// Sum of the chosen numbers.
    pub sum: i64,
    /// Subset that reached the target.
    pub found: Option<Vec<i64>>,
}

impl FrameView for SubsetSumFrame {
    fn render_lines(&self) -> Vec<String> {
        let cells: Vec<String> = self
            .numbers
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if self.chosen.contains(&i) {
                    format!("+{v}")
                } else if self.index == Some(i) {
                    format!("?{v}")
                } else {
                    v.to_string()
                }
            })
            .collect();
        let mut lines = vec![
            cells.join(" "),
            format!("sum {} / target {}", self.sum, self.target),
        ];
        if let Some(found) = &self.found {
            lines.push(format!("subset [{}]", format_list(found)));
        }
        lines
    }
}

/// Subset sum generator.
#[derive(Debug, Clone)]
pub struct SubsetSumGenerator {
    max_items: usize,
}

impl SubsetSumGenerator {
    /// Create a generator accepting up to `max_items` numbers.
    #[must_use]
    pub const fn new(max_items: usize) -> Self {
        Self { max_items }
    }
}

struct Search {
    numbers: Vec<i64>,
    target: i64,
    chosen: Vec<usize>,
    sum: i64,
    found: Option<Vec<i64>>,
    rec: TraceRecorder<SubsetSumFrame>,
}

impl Search {
    fn emit(&mut self, message: String, index: Option<usize>) {
        let frame = SubsetSumFrame {
            numbers: self.numbers.clone(),
            target: self.target,
            index,
            chosen: self.chosen.clone(),
            sum: self.sum,
            found: self.found.clone(),
        };
        self.rec.emit(message, frame);
    }

    fn subset(&self) -> Vec<i64> {
        self.chosen.iter().map(|&i| self.numbers[i]).collect()
    }

    fn search(&mut self, i: usize) -> bool {
        if self.sum == self.target {
            let subset = self.subset();
            self.found = Some(subset.clone());
            self.emit(
                format!("Sum {} reached with [{}]", self.target, format_list(&subset)),
                None,
            );
            return true;
        }
        if i == self.numbers.len() {
            self.emit(format!("No numbers left at sum {}", self.sum), None);
            return false;
        }

        let v = self.numbers[i];
        if self.sum.checked_add(v).is_some_and(|next| next <= self.target) {
            self.chosen.push(i);
            self.sum += v;
            self.emit(format!("Include {v}: sum = {}", self.sum), Some(i));
            if self.search(i + 1) {
                return true;
            }
            self.chosen.pop();
            self.sum -= v;
            self.emit(format!("Backtrack: drop {v}"), Some(i));
        } else {
            self.emit(
                format!("Including {v} would pass {}; prune", self.target),
                Some(i),
            );
        }

        self.emit(format!("Exclude {v}"), Some(i));
        self.search(i + 1)
    }
}

impl TraceGenerator for SubsetSumGenerator {
    type Params = SubsetSumParams;
    type Frame = SubsetSumFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "subset-sum",
            name: "Subset Sum",
            category: Category::Backtracking,
            summary: "Decide whether some subset of the numbers adds up to the target",
            params: &["numbers", "target"],
        }
    }

    fn generate(&self, params: &SubsetSumParams) -> Trace<SubsetSumFrame> {
        let numbers = match parse_bounded_list(&params.numbers, self.max_items) {
            Ok(numbers) => numbers,
            Err(message) => return Trace::invalid(message, SubsetSumFrame::default()),
        };
        if numbers.iter().any(|&v| v < 0) || params.target < 0 {
            return Trace::invalid(
                "Numbers and target must not be negative",
                SubsetSumFrame::default(),
            );
        }

        let shown = format_list(&numbers);
        let target = params.target;
        let mut search = Search {
            numbers,
            target,
            chosen: Vec::new(),
            sum: 0,
            found: None,
            rec: TraceRecorder::new(),
        };
        let opening = SubsetSumFrame {
            numbers: search.numbers.clone(),
            target,
            ..SubsetSumFrame::default()
        };
        search.rec.emit_opening(
            *params == SubsetSumParams::default(),
            format!("Press play to look for a subset of [{shown}] summing to {target}"),
            format!("Search subsets of [{shown}] for sum {target}"),
            opening,
        );

        let found = search.search(0);

        let last = SubsetSumFrame {
            numbers: search.numbers.clone(),
            target,
            index: None,
            chosen: search.chosen.clone(),
            sum: search.sum,
            found: search.found.clone(),
        };
        let message = if found {
            format!("A subset sums to {target}")
        } else {
            format!("No subset sums to {target}")
        };
        search.rec.finish(message, last, Outcome::Bool(found))
    }

    fn apply_args(&self, current: &SubsetSumParams, args: &ParamArgs) -> VizResult<SubsetSumParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(numbers) = text_arg(args, "numbers") {
            next.numbers = numbers;
        }
        if let Some(target) = parse_arg(args, "target")? {
            next.target = target;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(numbers: &str, target: i64) -> Trace<SubsetSumFrame> {
        SubsetSumGenerator::new(12).generate(&SubsetSumParams {
            numbers: numbers.to_string(),
            target,
        })
    }

    #[test]
    fn test_three_four_five_reaches_seven() {
        let trace = run("3, 4, 5", 7);
        assert_eq!(trace.outcome(), Some(&Outcome::Bool(true)));
        assert_eq!(trace.last().frame.found, Some(vec![3, 4]));
    }

    #[test]
    fn test_unreachable_target() {
        let trace = run("3, 4, 5", 6);
        assert_eq!(trace.outcome(), Some(&Outcome::Bool(false)));
        assert!(trace.last().frame.found.is_none());
    }

    #[test]
    fn test_zero_target_is_empty_subset() {
        let trace = run("3, 4", 0);
        assert_eq!(trace.outcome(), Some(&Outcome::Bool(true)));
        assert_eq!(trace.last().frame.found, Some(vec![]));
    }

    #[test]
    fn test_needs_backtracking() {
        let trace = run("5, 3, 4", 7);
        assert_eq!(trace.last().frame.found, Some(vec![3, 4]));
        assert!(trace.iter().any(|s| s.message.starts_with("Backtrack")));
    }

    #[test]
    fn test_sum_never_exceeds_target() {
        let trace = run("2, 9, 4, 6, 1", 12);
        assert!(trace.iter().all(|s| s.frame.sum <= 12));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(run("1, -2", 3).outcome().is_none());
        assert!(run("1, 2", -1).outcome().is_none());
        assert!(run("", 3).outcome().is_none());
        assert_eq!(run(&"1 ".repeat(13), 3).len(), 1);
    }

    #[test]
    fn test_huge_numbers_prune_instead_of_overflowing() {
        let trace = run(&format!("1, {}", i64::MAX), i64::MAX);
        assert_eq!(trace.outcome(), Some(&Outcome::Bool(true)));
        assert_eq!(trace.last().frame.found, Some(vec![i64::MAX]));
        assert!(trace.iter().any(|s| s.message.contains("prune")));

        let trace = run(&format!("{0}, {0}", i64::MAX), 5);
        assert_eq!(trace.outcome(), Some(&Outcome::Bool(false)));
    }

    #[test]
    fn test_apply_args() {
        let gen = SubsetSumGenerator::new(12);
        let args = [("target".to_string(), "9".to_string())].into_iter().collect();
        let next = gen.apply_args(&SubsetSumParams::default(), &args).expect("apply");
        assert_eq!(next.target, 9);
        assert_eq!(next.numbers, "3, 4, 5");

        let bad = [("target".to_string(), "nine".to_string())].into_iter().collect();
        assert!(gen.apply_args(&SubsetSumParams::default(), &bad).is_err());
    }
}
