//! # Frame Driver
//!
//! Bridges the accumulator to the host's display-refresh cadence.
//!
//! ## Frame Lifecycle
//!
//! ```text
//! start()
//!   │  publish Started
//!   ▼
//! ┌─► stop requested? ──yes──► publish Stopped, return stats
//! │   │ no
//! │   ▼
//! │   scheduler.wait_for_frame() ──false──► publish Stopped, return stats
//! │   │ true
//! │   ▼
//! │   tick(): clock.now() → FixedStepLoop::frame → run_step per step
//! │   │ ok                         │ err
//! └───┘                            ▼
//!                          status = Halted, publish Failed(err), return err
//! ```
//!
//! A halted driver stays halted. Restarting means building a new driver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use polycons_shared::constants::DRIVER_EVENT_CAPACITY;

use crate::accumulator::{FixedStepLoop, LoopTiming};
use crate::clock::ClockSource;
use crate::cycle::run_step;
use crate::error::LoopError;
use crate::gateway::{RenderGateway, SimulationGateway};

// ============================================================================
// HOST SCHEDULING
// ============================================================================

/// Host display-refresh facility.
pub trait FrameScheduler {
    /// Yields until the host wants the next frame.
    ///
    /// Returns `false` when the host will not produce more frames.
    fn wait_for_frame(&mut self) -> bool;
}

impl<K: FrameScheduler + ?Sized> FrameScheduler for &mut K {
    fn wait_for_frame(&mut self) -> bool {
        (**self).wait_for_frame()
    }
}

/// Yields a fixed number of frames back to back.
#[derive(Clone, Copy, Debug)]
pub struct CountedScheduler {
    remaining: u64,
}

impl CountedScheduler {
    /// Scheduler that produces `frames` frames.
    #[must_use]
    pub const fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }

    /// Frames still to come.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameScheduler for CountedScheduler {
    fn wait_for_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Paces frames to a target refresh rate on a native host.
///
/// Sleeps for most of the gap, then spin-waits the last half millisecond.
#[derive(Clone, Debug)]
pub struct PacedScheduler {
    frame_duration: Duration,
    last_frame: Option<Instant>,
    remaining: Option<u64>,
}

impl PacedScheduler {
    /// Scheduler ticking `fps` times per second, forever.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            last_frame: None,
            remaining: None,
        }
    }

    /// Stops after `frames` frames.
    #[must_use]
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    /// Target gap between frames.
    #[must_use]
    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

impl FrameScheduler for PacedScheduler {
    fn wait_for_frame(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }

        if let Some(last) = self.last_frame {
            let deadline = last + self.frame_duration;
            let now = Instant::now();
            if deadline > now {
                let wait = deadline - now;
                if wait > Duration::from_micros(1000) {
                    std::thread::sleep(wait - Duration::from_micros(500));
                }
                while Instant::now() < deadline {
                    std::hint::spin_loop();
                }
            }
        }
        self.last_frame = Some(Instant::now());
        true
    }
}

// ============================================================================
// STOP SIGNAL & EVENTS
// ============================================================================

/// Cloneable request to stop the driver before its next frame.
///
/// The request latches: it holds until [`StopSignal::reset`].
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    /// Creates an un-triggered signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the driver to stop. Safe from any thread.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether a stop was requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Withdraws a stop request so the driver can be started again.
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::Release);
    }
}

/// Lifecycle notifications published by the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum DriverEvent {
    /// `start` entered its frame loop.
    Started,
    /// The loop ended without error.
    Stopped {
        /// Frames completed over the driver's lifetime.
        frames: u64,
    },
    /// A fatal error halted the loop.
    Failed(LoopError),
}

/// Where the driver is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverStatus {
    /// Built, never started.
    Idle,
    /// Inside `start`.
    Running,
    /// Left `start` cleanly. May be started again; a latched
    /// [`StopSignal`] must be reset first or `start` returns at once.
    Stopped,
    /// Stopped by a fatal error; every further frame is refused.
    Halted,
}

// ============================================================================
// STATISTICS
// ============================================================================

/// What one frame did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame index.
    pub frame: u64,
    /// Seconds credited to the accumulator.
    pub delta: f64,
    /// Whether the gap was clamped to `max_frame_delta`.
    pub clamped: bool,
    /// Steps run.
    pub steps: u32,
    /// Accumulator left over.
    pub residual: f64,
}

/// Running totals over the driver's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Frames completed.
    pub frames: u64,
    /// Simulation steps fully completed.
    pub steps: u64,
    /// Frames whose gap was clamped.
    pub clamped_frames: u64,
    /// Most steps run in one frame.
    pub max_steps_in_frame: u32,
}

impl DriverStats {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.steps += u64::from(report.steps);
        self.max_steps_in_frame = self.max_steps_in_frame.max(report.steps);
        if report.clamped {
            self.clamped_frames += 1;
        }
    }
}

// ============================================================================
// DRIVER
// ============================================================================

/// Owns the loop state and drives it once per host frame.
///
/// The world is borrowed from the caller for the driver's lifetime and only
/// ever handed to the gateways.
pub struct FrameDriver<'w, C, K, S, R>
where
    S: SimulationGateway,
{
    clock: C,
    scheduler: K,
    simulation: S,
    renderer: R,
    world: &'w mut S::World,
    state: FixedStepLoop,
    status: DriverStatus,
    stats: DriverStats,
    stop: StopSignal,
    events_tx: Sender<DriverEvent>,
    events_rx: Receiver<DriverEvent>,
}

impl<'w, C, K, S, R> FrameDriver<'w, C, K, S, R>
where
    C: ClockSource,
    K: FrameScheduler,
    S: SimulationGateway,
    R: RenderGateway<S::World, S::Geometry>,
{
    /// Builds a driver. The first clock sample is taken here.
    ///
    /// # Errors
    ///
    /// [`LoopError::InvalidStep`] / [`LoopError::InvalidFrameDelta`] for bad
    /// timing.
    pub fn new(
        timing: LoopTiming,
        mut clock: C,
        scheduler: K,
        simulation: S,
        renderer: R,
        world: &'w mut S::World,
    ) -> Result<Self, LoopError> {
        let state = FixedStepLoop::new(timing, clock.now())?;
        let (events_tx, events_rx) = crossbeam_channel::bounded(DRIVER_EVENT_CAPACITY);

        Ok(Self {
            clock,
            scheduler,
            simulation,
            renderer,
            world,
            state,
            status: DriverStatus::Idle,
            stats: DriverStats::default(),
            stop: StopSignal::new(),
            events_tx,
            events_rx,
        })
    }

    /// Shares `stop` with the driver instead of its own fresh signal.
    #[must_use]
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Runs frames until the scheduler runs dry, a stop is requested, or a
    /// gateway fails.
    ///
    /// # Errors
    ///
    /// The fatal [`LoopError`] that halted the loop, or [`LoopError::Halted`]
    /// if the driver had already halted.
    pub fn start(&mut self) -> Result<DriverStats, LoopError> {
        if self.status == DriverStatus::Halted {
            return Err(LoopError::Halted);
        }

        self.status = DriverStatus::Running;
        self.publish(DriverEvent::Started);
        tracing::info!(
            fixed_step = self.state.fixed_step(),
            max_frame_delta = self.state.max_frame_delta(),
            "frame driver started"
        );

        while !self.stop.is_stopped() && self.scheduler.wait_for_frame() {
            // A stop may arrive while waiting for the host.
            if self.stop.is_stopped() {
                break;
            }
            self.tick()?;
        }

        self.status = DriverStatus::Stopped;
        self.publish(DriverEvent::Stopped {
            frames: self.stats.frames,
        });
        tracing::info!(
            frames = self.stats.frames,
            steps = self.stats.steps,
            clamped_frames = self.stats.clamped_frames,
            "frame driver stopped"
        );
        Ok(self.stats)
    }

    /// Runs exactly one frame against the current clock reading.
    ///
    /// # Errors
    ///
    /// The gateway error that halted the loop, or [`LoopError::Halted`].
    pub fn tick(&mut self) -> Result<FrameReport, LoopError> {
        if self.status == DriverStatus::Halted {
            return Err(LoopError::Halted);
        }

        let now = self.clock.now();
        let simulation = &mut self.simulation;
        let renderer = &mut self.renderer;
        let world = &mut *self.world;
        let mut completed: u32 = 0;

        let result = self.state.frame(now, |dt| {
            run_step(&mut *simulation, &mut *renderer, &mut *world, dt)?;
            completed += 1;
            tracing::trace!(step = completed, dt, "step complete");
            Ok::<(), LoopError>(())
        });

        match result {
            Ok(outcome) => {
                let report = FrameReport {
                    frame: self.stats.frames,
                    delta: outcome.delta,
                    clamped: outcome.clamped,
                    steps: outcome.steps,
                    residual: outcome.residual,
                };
                if report.clamped {
                    tracing::warn!(
                        frame = report.frame,
                        credited = report.delta,
                        "frame gap exceeded max_frame_delta, dropping the excess"
                    );
                }
                tracing::debug!(
                    frame = report.frame,
                    delta = report.delta,
                    steps = report.steps,
                    residual = report.residual,
                    "frame"
                );
                self.stats.record(&report);
                Ok(report)
            }
            Err(err) => {
                self.stats.steps += u64::from(completed);
                self.status = DriverStatus::Halted;
                tracing::error!(
                    frame = self.stats.frames,
                    completed_steps = completed,
                    error = %err,
                    "frame driver halted"
                );
                self.publish(DriverEvent::Failed(err.clone()));
                Err(err)
            }
        }
    }

    /// Publishes `event`, evicting the oldest unread events while the
    /// channel is full. The newest event always lands.
    fn publish(&self, mut event: DriverEvent) {
        loop {
            match self.events_tx.try_send(event) {
                Ok(()) | Err(TrySendError::Disconnected(_)) => return,
                Err(TrySendError::Full(rejected)) => {
                    if let Ok(evicted) = self.events_rx.try_recv() {
                        tracing::debug!(
                            ?evicted,
                            "driver event channel full, oldest event evicted"
                        );
                    }
                    event = rejected;
                }
            }
        }
    }

    /// Handle that stops the driver before its next frame.
    #[must_use]
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Receiver for lifecycle events.
    #[must_use]
    pub fn events(&self) -> Receiver<DriverEvent> {
        self.events_rx.clone()
    }

    /// Lifecycle status.
    #[must_use]
    pub const fn status(&self) -> DriverStatus {
        self.status
    }

    /// Running totals.
    #[must_use]
    pub const fn stats(&self) -> &DriverStats {
        &self.stats
    }

    /// Accumulator state.
    #[must_use]
    pub const fn loop_state(&self) -> &FixedStepLoop {
        &self.state
    }

    /// The world as the driver sees it.
    #[must_use]
    pub fn world(&self) -> &S::World {
        &*self.world
    }

    /// The render gateway.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The simulation gateway.
    #[must_use]
    pub const fn simulation(&self) -> &S {
        &self.simulation
    }
}
