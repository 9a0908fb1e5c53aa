//! YAML configuration files and the limits they impose.

use algoviz::prelude::*;
use std::io::Write;

fn write_config(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn empty_document_uses_defaults() {
    let file = write_config("{}\n");
    let config = VizConfig::load(file.path()).unwrap();
    assert_eq!(config, VizConfig::default());
}

#[test]
fn limits_flow_into_generators() {
    let file = write_config(
        "limits:
  max_disks: 4
  max_board_size: 5
",
    );
    let config = VizConfig::load(file.path()).unwrap();

    let mut hanoi = open("hanoi", &config).unwrap();
    let args: ParamArgs = [("num_disks".to_string(), "5".to_string())].into();
    hanoi.apply_args(&args).unwrap();
    assert_eq!(hanoi.trace_len(), 1);
    assert!(hanoi.message().contains("between 1 and 4"));

    let mut queens = open("n-queens", &config).unwrap();
    let args: ParamArgs = [("board_size".to_string(), "6".to_string())].into();
    queens.apply_args(&args).unwrap();
    assert!(queens.result().is_none());
}

#[test]
fn playback_section_sets_speed() {
    let file = write_config(
        "playback:
  min_speed: 10
  max_speed: 200
  default_speed: 150
",
    );
    let config = VizConfig::load(file.path()).unwrap();
    let mut viz = open("lcs", &config).unwrap();
    assert_eq!(viz.speed(), 150);
    viz.set_speed(1000);
    assert_eq!(viz.speed(), 200);
}

#[test]
fn inverted_speed_range_is_rejected() {
    let file = write_config(
        "playback:
  min_speed: 500
  max_speed: 100
",
    );
    assert!(matches!(
        VizConfig::load(file.path()),
        Err(VizError::Config { .. })
    ));
}

#[test]
fn out_of_range_limit_is_rejected() {
    let file = write_config(
        "limits:
  max_board_size: 40
",
    );
    assert!(matches!(
        VizConfig::load(file.path()),
        Err(VizError::Validation(_))
    ));
}

#[test]
fn unknown_key_is_rejected() {
    let file = write_config("playbak: {}\n");
    assert!(matches!(
        VizConfig::load(file.path()),
        Err(VizError::YamlParse(_))
    ));
}
