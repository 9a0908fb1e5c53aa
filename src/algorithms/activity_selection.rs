//! Greedy activity selection on a seeded random instance.
//!
//! The instance comes from [`VizRng`], so the seed is part of the input and
//! the first step shows the generated activities before anything is sorted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::generator::{
    parse_arg, reject_unknown, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::rng::VizRng;
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

const LATEST_START: u32 = 20;
const LONGEST: u32 = 6;

/// Activity selection input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityParams {
    /// How many random activities to generate.
    pub count: usize,
    /// Seed for the instance.
    pub seed: u64,
}

impl Default for ActivityParams {
    fn default() -> Self {
        Self { count: 6, seed: 42 }
    }
}

/// One half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// 1-based id in generation order.
    pub id: u32,
    /// Start time.
    pub start: u32,
    /// Finish time.
    pub end: u32,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}, {})", self.id, self.start, self.end)
    }
}

/// Activity selection visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityFrame {
    /// Activities, in generation order until sorted.
    pub activities: Vec<Activity>,
    /// Whether `activities` is sorted by finish time.
    pub sorted: bool,
    /// Position being considered.
    pub considered: Option<usize>,
    /// Ids picked so far.
    pub selected: Vec<u32>,
    /// Finish time of the last pick.
    pub last_end: Option<u32>,
}

impl FrameView for ActivityFrame {
    fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .activities
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let bar: String = (0..LATEST_START + LONGEST)
                    .map(|t| if (a.start..a.end).contains(&t) { '=' } else { ' ' })
                    .collect();
                let mark = if self.selected.contains(&a.id) {
                    '*'
                } else if self.considered == Some(i) {
                    '>'
                } else {
                    ' '
                };
                format!("{mark}{:>3} |{bar}|", format!("#{}", a.id))
            })
            .collect();
        if let Some(end) = self.last_end {
            lines.push(format!("last finish {end}"));
        }
        lines
    }
}

/// Activity selection generator.
#[derive(Debug, Clone)]
pub struct ActivityGenerator {
    max_count: usize,
}

impl ActivityGenerator {
    /// Create a generator producing up to `max_count` activities.
    #[must_use]
    pub const fn new(max_count: usize) -> Self {
        Self { max_count }
    }
}

/// Draw `count` activities from `seed`.
#[must_use]
pub fn random_activities(count: usize, seed: u64) -> Vec<Activity> {
    let mut rng = VizRng::new(seed);
    (1..=count as u32)
        .map(|id| {
            let start = rng.gen_inclusive(0, LATEST_START - 1);
            let end = start + rng.gen_inclusive(1, LONGEST);
            Activity { id, start, end }
        })
        .collect()
}

impl TraceGenerator for ActivityGenerator {
    type Params = ActivityParams;
    type Frame = ActivityFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "activity-selection",
            name: "Activity Selection",
            category: Category::Greedy,
            summary: "Most non-overlapping activities, picking the earliest finish each time",
            params: &["count", "seed"],
        }
    }

    fn generate(&self, params: &ActivityParams) -> Trace<ActivityFrame> {
        if params.count == 0 || params.count > self.max_count {
            return Trace::invalid(
                format!("Activity count must be between 1 and {}", self.max_count),
                ActivityFrame::default(),
            );
        }

        let mut frame = ActivityFrame {
            activities: random_activities(params.count, params.seed),
            ..ActivityFrame::default()
        };
        let mut rec = TraceRecorder::new();
        rec.emit_opening(
            *params == ActivityParams::default(),
            format!(
                "Generated {} random activities (seed {}); press play to select",
                params.count, params.seed
            ),
            format!(
                "Generated {} random activities (seed {})",
                params.count, params.seed
            ),
            frame.clone(),
        );

        frame
            .activities
            .sort_by_key(|a| (a.end, a.start, a.id));
        frame.sorted = true;
        rec.emit("Sort by finish time", frame.clone());

        for i in 0..frame.activities.len() {
            let a = frame.activities[i];
            frame.considered = Some(i);
            let message = match frame.last_end {
                Some(end) if a.start < end => {
                    format!("Skip {a}: starts before {end}")
                }
                _ => {
                    frame.selected.push(a.id);
                    frame.last_end = Some(a.end);
                    format!("Select {a}")
                }
            };
            rec.emit(message, frame.clone());
        }

        frame.considered = None;
        let ids: Vec<i64> = frame.selected.iter().map(|&id| i64::from(id)).collect();
        rec.finish(
            format!("Selected {} activities", ids.len()),
            frame,
            Outcome::Sequence(ids),
        )
    }

    fn apply_args(&self, current: &ActivityParams, args: &ParamArgs) -> VizResult<ActivityParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(count) = parse_arg(args, "count")? {
            next.count = count;
        }
        if let Some(seed) = parse_arg(args, "seed")? {
            next.seed = seed;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(count: usize, seed: u64) -> Trace<ActivityFrame> {
        ActivityGenerator::new(20).generate(&ActivityParams { count, seed })
    }

    fn compatible(picked: &[Activity]) -> bool {
        let mut sorted = picked.to_vec();
        sorted.sort_by_key(|a| a.start);
        sorted.windows(2).all(|w| w[0].end <= w[1].start)
    }

    fn best_by_brute_force(all: &[Activity]) -> usize {
        (0u32..1 << all.len())
            .filter_map(|mask| {
                let picked: Vec<Activity> = all
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, a)| *a)
                    .collect();
                compatible(&picked).then_some(picked.len())
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_first_step_records_instance() {
        let trace = run(5, 7);
        let first = &trace.first().frame;
        assert_eq!(first.activities, random_activities(5, 7));
        assert!(!first.sorted);
        assert!(trace.first().message.starts_with("Generated 5"));
    }

    #[test]
    fn test_seed_determinism() {
        assert_eq!(run(8, 99), run(8, 99));
        assert_ne!(random_activities(8, 1), random_activities(8, 2));
    }

    #[test]
    fn test_activities_in_bounds() {
        for a in random_activities(20, 3) {
            assert!(a.start < LATEST_START);
            assert!(a.end > a.start && a.end - a.start <= LONGEST);
        }
    }

    #[test]
    fn test_selection_is_optimal() {
        for seed in 0..20 {
            let trace = run(8, seed);
            let frame = &trace.last().frame;
            let picked: Vec<Activity> = frame
                .activities
                .iter()
                .filter(|a| frame.selected.contains(&a.id))
                .copied()
                .collect();
            assert!(compatible(&picked), "seed {seed}");
            assert_eq!(picked.len(), best_by_brute_force(&frame.activities), "seed {seed}");
        }
    }

    #[test]
    fn test_outcome_lists_ids() {
        let trace = run(6, 42);
        let Some(Outcome::Sequence(ids)) = trace.outcome() else {
            panic!("expected a sequence");
        };
        let selected: Vec<i64> = trace.last().frame.selected.iter().map(|&i| i64::from(i)).collect();
        assert_eq!(ids, &selected);
        assert!(!ids.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(run(0, 1).outcome().is_none());
        assert!(run(21, 1).outcome().is_none());
    }
}
