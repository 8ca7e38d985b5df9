use std::fs;

use brushograph::{load_config, run_analyze, run_optimize, Config, RunOptions, Urgency};
use tempfile::TempDir;

const PLOT: &str = "G21\nG90\nM8\nG0 Z5\n;Layer Green\nG0 X0 Y0 F1200\nG1 Z0\nG1 X100 Y0\nG1 X150 Y0\nG0 Z5\nG0 X0 Y10\nG1 Z0\nG1 X40 Y10\nG0 Z5\nM2\n";

fn write_plot(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("plot.gcode");
    fs::write(&path, PLOT).unwrap();
    path
}

#[test]
fn test_optimize_writes_output_and_report() {
    let dir = TempDir::new().unwrap();
    let input = write_plot(&dir);
    let output = dir.path().join("out.gcode");
    let report_path = dir.path().join("report.json");

    let mut options = RunOptions::new(&input);
    options.output = Some(output.clone());
    options.report_json = Some(report_path.clone());

    let outcome = run_optimize(&options, Config::default()).unwrap();
    assert_eq!(outcome.output_path, output);
    assert_eq!(outcome.read_stats.lines_read, 15);
    assert_eq!(outcome.report.total_length_mm, 190.0);

    // Stroke ends at 150 mm right before the rapid lift.
    assert_eq!(outcome.report.maintenance_events.len(), 1);
    assert_eq!(outcome.report.maintenance_events[0].urgency, Urgency::Good);
    assert_eq!(outcome.report.maintenance_events[0].line_number, 9);
    assert_eq!(outcome.report.pickup_counts["Color 1"], 2);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("; Color 1 picking sequence"));
    assert!(text.contains(";Layer Green"));
    assert_eq!(text.lines().count(), outcome.report.lines_written);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["total_length_mm"], 190.0);
    assert_eq!(json["maintenance_events"][0]["color"], "Color 1");
}

#[test]
fn test_cli_overrides_beat_config_values() {
    let dir = TempDir::new().unwrap();
    let input = write_plot(&dir);

    let mut options = RunOptions::new(&input);
    options.output = Some(dir.path().join("out.gcode"));
    options.distance_threshold = Some(1000.0);

    let mut config = Config::default();
    config.optimizer.distance_threshold = 10.0;

    let outcome = run_optimize(&options, config).unwrap();
    assert!(outcome.report.maintenance_events.is_empty());
    assert_eq!(outcome.report.residual_mm, 190.0);
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.gcode");

    let mut options = RunOptions::new(dir.path().join("missing.gcode"));
    options.output = Some(output.clone());

    let err = run_optimize(&options, Config::default()).unwrap_err();
    let core = err.downcast_ref::<brushograph::Error>().unwrap();
    assert!(core.is_input_read_error());
    assert!(!output.exists());
}

#[test]
fn test_invalid_override_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut options = RunOptions::new(write_plot(&dir));
    options.output = Some(dir.path().join("out.gcode"));
    options.force_multiplier = Some(0.5);

    assert!(run_optimize(&options, Config::default()).is_err());
    assert!(!dir.path().join("out.gcode").exists());
}

#[test]
fn test_config_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut config = Config::default();
    config.optimizer.aggressive = true;
    config.optimizer.distance_threshold = 42.0;
    config.save_to_file(&config_path).unwrap();

    let loaded = load_config(Some(&config_path)).unwrap();
    assert!(loaded.optimizer.aggressive);
    assert_eq!(loaded.optimizer.distance_threshold, 42.0);

    assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
}

#[test]
fn test_analyze_counts_structure() {
    let dir = TempDir::new().unwrap();
    let analysis = run_analyze(&write_plot(&dir), 0.0).unwrap();
    assert_eq!(analysis.total_lines, 15);
    // The first lift is followed by a layer label, not a reposition.
    assert_eq!(analysis.drawing_areas, 1);
    assert_eq!(analysis.lift_moves, 3);
    assert_eq!(analysis.contact_moves, 2);
    assert_eq!(analysis.reposition_moves, 2);
    assert_eq!(analysis.malformed_moves, 0);
}
