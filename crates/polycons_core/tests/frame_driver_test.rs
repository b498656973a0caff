//! # Frame Driver Integration Tests
//!
//! Drives the full loop with a manual clock and a scripted host that moves
//! the clock by a chosen gap before every frame.
//!
//! Run with: cargo test --package polycons_core --test frame_driver_test

use std::collections::VecDeque;

use polycons_core::gateway::mock::{
    Call, CallLog, MockWorld, RecordingRenderer, RecordingSimulation,
};
use polycons_core::{
    CountedScheduler, DriverEvent, DriverStatus, FrameDriver, FrameScheduler, LoopError,
    LoopTiming, ManualClock, StopSignal,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STEP: f64 = 1.0 / 60.0;

fn timing() -> LoopTiming {
    LoopTiming {
        fixed_step: STEP,
        max_frame_delta: 1.0,
    }
}

/// Host that advances the clock by the next scripted gap on every frame.
struct ScriptedHost {
    clock: ManualClock,
    gaps: VecDeque<f64>,
    frames_requested: usize,
}

impl ScriptedHost {
    fn new(clock: ManualClock, gaps: impl IntoIterator<Item = f64>) -> Self {
        Self {
            clock,
            gaps: gaps.into_iter().collect(),
            frames_requested: 0,
        }
    }
}

impl FrameScheduler for ScriptedHost {
    fn wait_for_frame(&mut self) -> bool {
        self.frames_requested += 1;
        match self.gaps.pop_front() {
            Some(gap) => {
                self.clock.advance(gap);
                true
            }
            None => false,
        }
    }
}

/// Test: 50ms at 60Hz is exactly three steps.
#[test]
fn test_fifty_ms_runs_three_steps() {
    let clock = ManualClock::new(0.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let mut driver = FrameDriver::new(
        timing(),
        clock.clone(),
        ScriptedHost::new(clock, [0.05]),
        RecordingSimulation::new(log.clone()),
        RecordingRenderer::new(log.clone()),
        &mut world,
    )
    .unwrap();

    let stats = driver.start().unwrap();

    assert_eq!(stats.frames, 1);
    assert_eq!(stats.steps, 3);
    let residual = driver.loop_state().accumulator();
    assert!((residual - (0.05 - 3.0 * STEP)).abs() < 1e-12);
    assert!(residual >= 0.0 && residual < STEP);

    drop(driver);
    assert_eq!(world.steps, 3);
    assert!((world.elapsed - 3.0 * STEP).abs() < 1e-12);
    assert_eq!(log.count(|c| matches!(c, Call::Advance(dt) if *dt == STEP)), 3);
}

/// Test: advance fails on the second of three steps.
#[test]
fn test_simulation_failure_mid_frame_halts_driver() {
    let clock = ManualClock::new(0.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let mut driver = FrameDriver::new(
        timing(),
        clock.clone(),
        ScriptedHost::new(clock, [0.05, 0.05, 0.05]),
        RecordingSimulation::new(log.clone()).fail_advance_on(2),
        RecordingRenderer::new(log.clone()),
        &mut world,
    )
    .unwrap();
    let events = driver.events();

    let err = driver.start().unwrap_err();

    assert!(matches!(err, LoopError::Simulation(_)));
    assert_eq!(driver.status(), DriverStatus::Halted);
    assert_eq!(driver.stats().steps, 1);
    assert_eq!(driver.stats().frames, 0);

    // Exactly one full cycle, then the failing advance, then nothing.
    assert_eq!(
        log.calls(),
        vec![
            Call::Advance(STEP),
            Call::FetchGeometry(1),
            Call::Clear,
            Call::DrawLines(1),
            Call::DrawNodes(1),
            Call::Advance(STEP),
        ]
    );

    let events: Vec<_> = events.try_iter().collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], DriverEvent::Started);
    assert!(matches!(events[1], DriverEvent::Failed(LoopError::Simulation(_))));

    // No resume after a fatal error.
    assert_eq!(driver.start().unwrap_err(), LoopError::Halted);
    assert_eq!(driver.tick().unwrap_err(), LoopError::Halted);
    assert_eq!(log.calls().len(), 6);

    drop(driver);
    assert_eq!(world.steps, 1);
}

/// Test: the host is not asked for another frame after a failure.
#[test]
fn test_failure_stops_resubmission() {
    let clock = ManualClock::new(0.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let mut host = ScriptedHost::new(clock.clone(), [0.02, 0.02, 0.02, 0.02]);
    {
        let mut driver = FrameDriver::new(
            timing(),
            clock,
            &mut host,
            RecordingSimulation::new(log.clone()),
            RecordingRenderer::new(log.clone()).fail_nodes_on(2),
            &mut world,
        )
        .unwrap();

        let err = driver.start().unwrap_err();
        assert!(matches!(err, LoopError::Render(_)));
    }

    // Frame 1 runs one step; frame 2 runs one more and its draw_nodes fails.
    assert_eq!(host.frames_requested, 2);
    assert_eq!(host.gaps.len(), 2);
}

/// Test: lines are drawn before nodes in every step, and every step runs the
/// full advance → fetch → clear → lines → nodes sequence.
#[test]
fn test_draw_order_in_every_step() {
    let clock = ManualClock::new(0.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let gaps = [0.016, 0.034, 0.0, 0.1, 0.017, 0.2];
    let mut driver = FrameDriver::new(
        timing(),
        clock.clone(),
        ScriptedHost::new(clock, gaps),
        RecordingSimulation::new(log.clone()),
        RecordingRenderer::new(log.clone()),
        &mut world,
    )
    .unwrap();

    let stats = driver.start().unwrap();
    let calls = log.calls();

    assert!(stats.steps > 0);
    assert_eq!(calls.len() as u64, stats.steps * 5);
    for (i, chunk) in calls.chunks(5).enumerate() {
        let n = i as u64 + 1;
        assert_eq!(
            chunk,
            &[
                Call::Advance(STEP),
                Call::FetchGeometry(n),
                Call::Clear,
                Call::DrawLines(n),
                Call::DrawNodes(n),
            ]
        );
    }
}

/// Test: steps and residual add up to the total elapsed time.
#[test]
fn test_total_steps_match_elapsed_time() {
    let gaps = [0.004, 0.013, 0.021, 0.0166, 0.05, 0.0007, 0.033];
    let total: f64 = gaps.iter().sum();

    let clock = ManualClock::new(3.5);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let mut driver = FrameDriver::new(
        timing(),
        clock.clone(),
        ScriptedHost::new(clock, gaps),
        RecordingSimulation::new(log.clone()),
        RecordingRenderer::new(log),
        &mut world,
    )
    .unwrap();

    let stats = driver.start().unwrap();
    let residual = driver.loop_state().accumulator();

    assert_eq!(stats.frames, gaps.len() as u64);
    assert_eq!(stats.steps, (total / STEP).floor() as u64);
    assert!((residual - total % STEP).abs() < 1e-9);
}

/// Test: randomized gaps keep the accumulator in [0, step) after every frame.
#[test]
fn test_accumulator_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let clock = ManualClock::new(0.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let mut driver = FrameDriver::new(
        timing(),
        clock.clone(),
        CountedScheduler::new(0),
        RecordingSimulation::new(log.clone()),
        RecordingRenderer::new(log),
        &mut world,
    )
    .unwrap();

    let mut credited = 0.0;
    for _ in 0..2_000 {
        let gap: f64 = rng.gen_range(0.0..0.1);
        clock.advance(gap);
        let report = driver.tick().unwrap();
        credited += report.delta;

        let acc = driver.loop_state().accumulator();
        assert!(acc >= 0.0, "accumulator went negative: {acc}");
        assert!(acc < STEP, "accumulator {acc} not below one step");
        assert!((report.residual - acc).abs() < f64::EPSILON);
    }

    let stats = *driver.stats();
    let consumed = stats.steps as f64 * STEP + driver.loop_state().accumulator();
    assert!((consumed - credited).abs() < 1e-9);
}

/// Test: a frame with no elapsed time does nothing.
#[test]
fn test_zero_elapsed_frame_is_idempotent() {
    let clock = ManualClock::new(0.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let mut driver = FrameDriver::new(
        timing(),
        clock.clone(),
        CountedScheduler::new(0),
        RecordingSimulation::new(log.clone()),
        RecordingRenderer::new(log.clone()),
        &mut world,
    )
    .unwrap();

    clock.advance(0.01);
    driver.tick().unwrap();
    let before = driver.loop_state().accumulator();
    let calls_before = log.calls().len();

    for _ in 0..10 {
        let report = driver.tick().unwrap();
        assert_eq!(report.steps, 0);
    }

    assert!((driver.loop_state().accumulator() - before).abs() < f64::EPSILON);
    assert_eq!(log.calls().len(), calls_before);
}

/// Test: a stall of 10x the cap runs at most one capped burst.
#[test]
fn test_long_stall_is_bounded() {
    let max_frame_delta = 0.26;
    let timing = LoopTiming {
        fixed_step: STEP,
        max_frame_delta,
    };
    let clock = ManualClock::new(0.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let mut driver = FrameDriver::new(
        timing,
        clock.clone(),
        ScriptedHost::new(clock, [10.0 * max_frame_delta]),
        RecordingSimulation::new(log.clone()),
        RecordingRenderer::new(log),
        &mut world,
    )
    .unwrap();

    let stats = driver.start().unwrap();

    assert!(u64::from(stats.max_steps_in_frame) <= (max_frame_delta / STEP).floor() as u64);
    assert_eq!(stats.clamped_frames, 1);
    assert!(driver.loop_state().accumulator() < STEP);
}

/// Test: a backwards clock jump credits nothing.
#[test]
fn test_backwards_clock_is_ignored() {
    let clock = ManualClock::new(50.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let mut driver = FrameDriver::new(
        timing(),
        clock.clone(),
        CountedScheduler::new(0),
        RecordingSimulation::new(log.clone()),
        RecordingRenderer::new(log),
        &mut world,
    )
    .unwrap();

    clock.set(10.0);
    let report = driver.tick().unwrap();
    assert_eq!(report.steps, 0);
    assert!(report.delta.abs() < f64::EPSILON);

    // Time resumes from the new reading.
    clock.advance(0.05);
    assert_eq!(driver.tick().unwrap().steps, 3);
}

/// Test: a stop requested from another handle ends the run cleanly.
#[test]
fn test_stop_signal_between_frames() {
    struct StopOnThird {
        clock: ManualClock,
        frames: u32,
        stop: StopSignal,
    }

    impl FrameScheduler for StopOnThird {
        fn wait_for_frame(&mut self) -> bool {
            self.frames += 1;
            self.clock.advance(STEP * 1.4);
            if self.frames == 3 {
                self.stop.stop();
            }
            true
        }
    }

    let clock = ManualClock::new(0.0);
    let log = CallLog::new();
    let mut world = MockWorld::default();
    let stop = StopSignal::new();
    let mut driver = FrameDriver::new(
        timing(),
        clock.clone(),
        StopOnThird {
            clock,
            frames: 0,
            stop: stop.clone(),
        },
        RecordingSimulation::new(log.clone()),
        RecordingRenderer::new(log),
        &mut world,
    )
    .unwrap()
    .with_stop_signal(stop.clone());
    let events = driver.events();

    let stats = driver.start().unwrap();

    // The stop lands while waiting for frame 3, so only two frames ran.
    assert!(stop.is_stopped());
    assert_eq!(stats.frames, 2);
    assert_eq!(stats.steps, 2);
    assert_eq!(driver.status(), DriverStatus::Stopped);
    assert_eq!(
        events.try_iter().last(),
        Some(DriverEvent::Stopped { frames: 2 })
    );
}
