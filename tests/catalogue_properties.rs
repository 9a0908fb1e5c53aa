//! Properties that hold for every catalogued algorithm.

use algoviz::algorithms::ALGORITHM_IDS;
use algoviz::prelude::*;
use proptest::prelude::*;

#[test]
fn every_default_trace_ends_with_a_result() {
    let config = VizConfig::default();
    for id in ALGORITHM_IDS {
        let mut viz = open(id, &config).unwrap();
        assert!(viz.trace_len() >= 2, "{id}");
        for index in 0..viz.trace_len() - 1 {
            viz.seek(index);
            assert!(viz.result().is_none(), "{id} step {index}");
        }
        viz.seek(usize::MAX);
        assert!(viz.result().is_some(), "{id}");
    }
}

#[test]
fn catalogue_matches_ids() {
    let ids: Vec<&str> = catalog().iter().map(|info| info.id).collect();
    assert_eq!(ids, ALGORITHM_IDS.to_vec());
}

#[test]
fn step_indices_are_sequential() {
    let config = VizConfig::default();
    for id in ALGORITHM_IDS {
        let viz = open(id, &config).unwrap();
        let trace: serde_json::Value = serde_json::from_str(&viz.trace_json().unwrap()).unwrap();
        let steps = trace["steps"].as_array().unwrap();
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step["index"].as_u64(), Some(i as u64), "{id}");
        }
    }
}

#[derive(Debug, Clone)]
enum Action {
    Toggle,
    Reset,
    Forward,
    Backward,
    Seek(usize),
    Speed(u32),
    Tick(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Toggle),
        Just(Action::Reset),
        Just(Action::Forward),
        Just(Action::Backward),
        (0usize..200).prop_map(Action::Seek),
        (0u32..2000).prop_map(Action::Speed),
        (0u64..3000).prop_map(Action::Tick),
    ]
}

proptest! {
    #[test]
    fn prop_generation_is_deterministic(index in 0usize..ALGORITHM_IDS.len()) {
        let config = VizConfig::default();
        let a = open(ALGORITHM_IDS[index], &config).unwrap();
        let b = open(ALGORITHM_IDS[index], &config).unwrap();
        prop_assert_eq!(a.trace_json().unwrap(), b.trace_json().unwrap());
    }

    #[test]
    fn prop_cursor_stays_in_range(
        index in 0usize..ALGORITHM_IDS.len(),
        actions in prop::collection::vec(action(), 1..40),
    ) {
        let mut viz = open(ALGORITHM_IDS[index], &VizConfig::default()).unwrap();
        for action in actions {
            match action {
                Action::Toggle => viz.toggle_play_pause(),
                Action::Reset => viz.reset(),
                Action::Forward => viz.step_forward(),
                Action::Backward => viz.step_backward(),
                Action::Seek(i) => viz.seek(i),
                Action::Speed(s) => viz.set_speed(s),
                Action::Tick(ms) => viz.advance_clock(ms),
            }
            prop_assert!(viz.cursor() < viz.trace_len());
            prop_assert!((50..=1000).contains(&viz.speed()));
            if viz.cursor() + 1 == viz.trace_len() && viz.trace_len() > 1 {
                prop_assert!(!viz.is_playing());
            }
        }
    }

    #[test]
    fn prop_reset_is_idempotent(index in 0usize..ALGORITHM_IDS.len(), seek in 0usize..100) {
        let mut viz = open(ALGORITHM_IDS[index], &VizConfig::default()).unwrap();
        viz.seek(seek);
        viz.reset();
        let once = (viz.cursor(), viz.is_playing(), viz.trace_json().unwrap());
        viz.reset();
        let twice = (viz.cursor(), viz.is_playing(), viz.trace_json().unwrap());
        prop_assert_eq!(once, twice);
    }
}
