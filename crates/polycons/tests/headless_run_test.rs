//! # Headless Run Tests
//!
//! The whole bootstrap with a manual clock: config in, stats and a PPM out.
//!
//! Run with: cargo test --package polycons --test headless_run_test

use std::collections::VecDeque;
use std::path::PathBuf;

use polycons::{run_with, AppError, PolyconsConfig};
use polycons_core::{CountedScheduler, FrameScheduler, LoopError, ManualClock};

/// Moves the clock by one scripted gap per frame.
struct ScriptedHost {
    clock: ManualClock,
    gaps: VecDeque<f64>,
}

impl FrameScheduler for ScriptedHost {
    fn wait_for_frame(&mut self) -> bool {
        match self.gaps.pop_front() {
            Some(gap) => {
                self.clock.advance(gap);
                true
            }
            None => false,
        }
    }
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("polycons-{}-{name}", std::process::id()))
}

fn small_config() -> PolyconsConfig {
    PolyconsConfig::from_toml_str(
        r#"
        [world]
        node_count = 12
        width = 120.0
        height = 80.0
        line_threshold = 60.0
        "#,
    )
    .unwrap()
}

/// Test: a scripted run steps the world and writes the final frame.
#[test]
fn test_headless_run_writes_snapshot() {
    let mut config = small_config();
    let snapshot = scratch_file("snapshot.ppm");
    config.output.snapshot = Some(snapshot.clone());

    let clock = ManualClock::new(0.0);
    let host = ScriptedHost {
        clock: clock.clone(),
        // 10 frames of 42ms = 25.2 steps.
        gaps: std::iter::repeat(0.042).take(10).collect(),
    };

    let summary = run_with(&config, clock, host).unwrap();

    assert_eq!(summary.driver.frames, 10);
    assert_eq!(summary.driver.steps, 25);
    assert_eq!(summary.render.clears, 25);
    assert_eq!(summary.render.nodes_drawn, 25 * 12);
    assert_eq!(summary.snapshot.as_deref(), Some(snapshot.as_path()));

    let bytes = std::fs::read(&snapshot).unwrap();
    let header = b"P6\n120 80\n255\n";
    assert!(bytes.starts_with(header));
    assert_eq!(bytes.len(), header.len() + 120 * 80 * 3);
    // Some ink on a white page.
    assert!(bytes[header.len()..].iter().any(|b| *b < 255));

    std::fs::remove_file(&snapshot).ok();
}

/// Test: no frames from the host means no steps and no error.
#[test]
fn test_empty_run() {
    let summary = run_with(
        &small_config(),
        ManualClock::new(0.0),
        CountedScheduler::new(0),
    )
    .unwrap();
    assert_eq!(summary.driver.frames, 0);
    assert_eq!(summary.render.clears, 0);
    assert!(summary.snapshot.is_none());
}

/// Test: a bad step is reported before anything runs.
#[test]
fn test_invalid_timing() {
    let mut config = small_config();
    config.timing.fixed_step = 0.0;
    let err = run_with(&config, ManualClock::new(0.0), CountedScheduler::new(5)).unwrap_err();
    assert!(matches!(err, AppError::Loop(LoopError::InvalidStep(_))));
}

/// Test: a bad world is reported as a simulation error.
#[test]
fn test_invalid_world() {
    let mut config = small_config();
    config.world.min_radius = 10.0;
    let err = run_with(&config, ManualClock::new(0.0), CountedScheduler::new(5)).unwrap_err();
    assert!(matches!(err, AppError::Simulation(_)));
}

/// Test: an unwritable snapshot path surfaces as a snapshot error.
#[test]
fn test_unwritable_snapshot() {
    let mut config = small_config();
    config.output.snapshot = Some(PathBuf::from("/definitely/not/here/frame.ppm"));
    let err = run_with(&config, ManualClock::new(0.0), CountedScheduler::new(1)).unwrap_err();
    assert!(matches!(err, AppError::Snapshot { .. }));
}

/// Test: a TOML file on disk drives the same run.
#[test]
fn test_config_file_drives_run() {
    let path = scratch_file("config.toml");
    std::fs::write(
        &path,
        "[timing]\nfixed_step = 0.01\n\n[world]\nnode_count = 3\nwidth = 50.0\nheight = 50.0\n",
    )
    .unwrap();
    let config = PolyconsConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let clock = ManualClock::new(0.0);
    let host = ScriptedHost {
        clock: clock.clone(),
        gaps: [0.025, 0.021].into_iter().collect(),
    };
    let summary = run_with(&config, clock, host).unwrap();

    assert_eq!(summary.driver.steps, 4);
    assert_eq!(summary.render.nodes_drawn, 12);
}
