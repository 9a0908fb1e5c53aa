//! Algorithm catalogue.
//!
//! Every algorithm is a [`TraceGenerator`]; [`open`] wraps one in a
//! [`PlaybackController`] bounded by the configured limits and hands it out
//! as a `Box<dyn Visualizer>`.

pub mod activity_selection;
pub mod coin_change;
pub mod count_inversions;
pub mod edit_distance;
pub mod fibonacci;
pub mod hanoi;
pub mod input;
pub mod knapsack;
pub mod lcs;
pub mod n_queens;
pub mod permutations;
pub mod row_column;
pub mod subset_sum;

use tracing::debug;

use crate::config::{PlaybackConfig, VizConfig};
use crate::engine::controller::PlaybackController;
use crate::engine::generator::{AlgorithmInfo, FrameView, TraceGenerator};
use crate::engine::visualizer::Visualizer;
use crate::error::{VizError, VizResult};

pub use activity_selection::ActivityGenerator;
pub use coin_change::CoinChangeGenerator;
pub use count_inversions::InversionGenerator;
pub use edit_distance::EditDistanceGenerator;
pub use fibonacci::FibonacciGenerator;
pub use hanoi::HanoiGenerator;
pub use knapsack::KnapsackGenerator;
pub use lcs::LcsGenerator;
pub use n_queens::QueensGenerator;
pub use permutations::PermutationGenerator;
pub use row_column::RowColumnGenerator;
pub use subset_sum::SubsetSumGenerator;

/// Catalogue ids, in display order.
pub const ALGORITHM_IDS: [&str; 12] = [
    "hanoi",
    "fibonacci",
    "count-inversions",
    "permutations",
    "n-queens",
    "subset-sum",
    "lcs",
    "edit-distance",
    "knapsack",
    "coin-change",
    "activity-selection",
    "row-column",
];

fn controller<G>(generator: G, playback: PlaybackConfig) -> Box<dyn Visualizer>
where
    G: TraceGenerator + 'static,
    G::Frame: FrameView,
{
    Box::new(PlaybackController::new(generator, playback))
}

/// Open a fresh controller for `id` at default parameters.
///
/// # Errors
///
/// Returns `VizError::UnknownAlgorithm` if no algorithm has this id.
pub fn open(id: &str, config: &VizConfig) -> VizResult<Box<dyn Visualizer>> {
    let limits = &config.limits;
    let playback = config.playback.clone();
    let viz = match id {
        "hanoi" => controller(HanoiGenerator::new(limits.max_disks), playback),
        "fibonacci" => controller(FibonacciGenerator::new(limits.max_fib), playback),
        "count-inversions" => controller(InversionGenerator::new(limits.max_array_len), playback),
        "permutations" => controller(PermutationGenerator::new(limits.max_text_len), playback),
        "n-queens" => controller(QueensGenerator::new(limits.max_board_size), playback),
        "subset-sum" => controller(
            SubsetSumGenerator::new(limits.max_subset_items.min(limits.max_array_len)),
            playback,
        ),
        "lcs" => controller(LcsGenerator::new(limits.max_string_len), playback),
        "edit-distance" => controller(EditDistanceGenerator::new(limits.max_string_len), playback),
        "knapsack" => controller(
            KnapsackGenerator::new(
                limits.max_array_len,
                limits.max_amount,
                limits.max_table_cells,
            ),
            playback,
        ),
        "coin-change" => controller(
            CoinChangeGenerator::new(limits.max_array_len, limits.max_amount),
            playback,
        ),
        "activity-selection" => controller(ActivityGenerator::new(limits.max_activities), playback),
        "row-column" => controller(RowColumnGenerator::new(limits.max_array_len), playback),
        other => return Err(VizError::UnknownAlgorithm(other.to_string())),
    };
    debug!(algorithm = id, steps = viz.trace_len(), "opened");
    Ok(viz)
}

/// Descriptions of every algorithm, in display order.
#[must_use]
pub fn catalog() -> Vec<AlgorithmInfo> {
    let config = VizConfig::default();
    ALGORITHM_IDS
        .iter()
        .filter_map(|id| open(id, &config).ok())
        .map(|viz| viz.info())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::step::Outcome;

    #[test]
    fn test_catalog_ids_match() {
        let ids: Vec<&str> = catalog().iter().map(|info| info.id).collect();
        assert_eq!(ids, ALGORITHM_IDS.to_vec());
    }

    #[test]
    fn test_open_unknown() {
        let err = open("bogosort", &VizConfig::default()).err().expect("unknown id");
        assert!(matches!(err, VizError::UnknownAlgorithm(ref id) if id == "bogosort"));
    }

    #[test]
    fn test_every_default_trace_completes() {
        let config = VizConfig::default();
        for id in ALGORITHM_IDS {
            let mut viz = open(id, &config).expect("open");
            assert!(viz.trace_len() >= 1, "{id}");
            assert_eq!(viz.cursor(), 0, "{id}");
            viz.seek(usize::MAX);
            assert!(viz.result().is_some(), "{id} must end with a result");
        }
    }

    #[test]
    fn test_limits_flow_into_generators() {
        let mut config = VizConfig::default();
        config.limits.max_board_size = 3;
        let mut viz = open("n-queens", &config).expect("open");
        let args = [("board_size".to_string(), "4".to_string())].into_iter().collect();
        viz.apply_args(&args).expect("apply");
        assert_eq!(viz.trace_len(), 1);
        assert!(viz.result().is_none());
    }

    #[test]
    fn test_scenario_outcomes() {
        let config = VizConfig::default();
        let cases = [
            ("hanoi", Outcome::Count(7)),
            ("count-inversions", Outcome::Count(6)),
            ("n-queens", Outcome::Count(2)),
            ("subset-sum", Outcome::Bool(true)),
        ];
        for (id, expected) in cases {
            let mut viz = open(id, &config).expect("open");
            viz.seek(usize::MAX);
            assert_eq!(viz.result(), Some(&expected), "{id}");
        }
    }
}
