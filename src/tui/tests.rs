//! Integration tests for TUI module.
//!
//! These drive whole sessions through `VizApp` the way the binary does.

use super::app::VizApp;
use crate::algorithms::ALGORITHM_IDS;
use crate::config::VizConfig;
use crossterm::event::KeyCode;

#[test]
fn test_session_lifecycle() {
    let config = VizConfig::builder()
        .replay_delay_ms(0)
        .build()
        .expect("config");
    let mut app = VizApp::new("count-inversions", config).expect("app");

    // Play to the end on 100ms ticks.
    app.handle_key(KeyCode::Char(' '));
    let mut ticks = 0;
    while app.viz.is_playing() && ticks < 1_000 {
        app.tick(100);
        ticks += 1;
    }
    assert_eq!(app.status(), "DONE");
    assert!(app.viz.result().is_some());

    // Space at the end plays again from the first step.
    app.handle_key(KeyCode::Char(' '));
    assert!(app.viz.is_playing());
    assert_eq!(app.viz.cursor(), 0);

    // Pause, step, quit.
    app.handle_key(KeyCode::Char(' '));
    assert_eq!(app.status(), "PAUSED");
    app.handle_key(KeyCode::Right);
    assert_eq!(app.viz.cursor(), 1);
    app.handle_key(KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn test_every_algorithm_reaches_a_result() {
    let mut app = VizApp::new(ALGORITHM_IDS[0], VizConfig::default()).expect("app");
    for id in ALGORITHM_IDS {
        assert_eq!(app.viz.info().id, id);
        app.handle_key(KeyCode::End);
        assert!(app.viz.result().is_some(), "{id}");
        assert_eq!(app.progress_percent(), 100);
        app.handle_key(KeyCode::Tab);
    }
    assert_eq!(app.selected, 0);
}
