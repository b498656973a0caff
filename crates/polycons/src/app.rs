//! # Bootstrap
//!
//! ```text
//! PolyconsConfig
//!   ├─► HostClock::detect(timing.clock)
//!   ├─► WorldSimulation::create_world(world)   (world owned here)
//!   ├─► FramebufferRenderer::for_world(world)
//!   ├─► PacedScheduler(target_fps, max_frames)
//!   └─► FrameDriver::start() ─► drain events ─► write snapshot
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use polycons_core::{
    ClockSource, DriverEvent, DriverStats, FrameDriver, FrameScheduler, HostClock, LoopTiming,
    PacedScheduler, SimulationGateway,
};
use polycons_render::{Framebuffer, FramebufferRenderer, RenderStats};
use polycons_shared::PolyconsConfig;
use polycons_world::WorldSimulation;

use crate::error::{AppError, AppResult};

/// What a finished run did.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Frame loop totals.
    pub driver: DriverStats,
    /// Drawing totals.
    pub render: RenderStats,
    /// Where the last frame was written, if anywhere.
    pub snapshot: Option<PathBuf>,
}

/// Runs with the host clock and a paced scheduler, as configured.
///
/// # Errors
///
/// Any [`AppError`] from setup, the frame loop or the snapshot.
pub fn run(config: &PolyconsConfig) -> AppResult<RunSummary> {
    let clock = HostClock::detect(config.timing.clock)?;
    tracing::info!(
        high_resolution = clock.is_high_resolution(),
        "clock source selected"
    );

    let mut scheduler = PacedScheduler::new(config.timing.target_fps);
    if let Some(frames) = config.timing.max_frames {
        scheduler = scheduler.with_frame_limit(frames);
    }
    tracing::info!(
        target_fps = config.timing.target_fps,
        max_frames = ?config.timing.max_frames,
        "frame scheduler ready"
    );

    run_with(config, clock, scheduler)
}

/// Runs with an injected clock and scheduler.
///
/// # Errors
///
/// Any [`AppError`] from setup, the frame loop or the snapshot.
pub fn run_with<C, K>(config: &PolyconsConfig, clock: C, scheduler: K) -> AppResult<RunSummary>
where
    C: ClockSource,
    K: FrameScheduler,
{
    let timing = LoopTiming::from(&config.timing);
    let mut simulation = WorldSimulation::new();
    let mut world = simulation.create_world(&config.world)?;
    let renderer = FramebufferRenderer::for_world(&config.world)?;

    let mut driver = FrameDriver::new(timing, clock, scheduler, simulation, renderer, &mut world)?;
    let events = driver.events();
    let result = driver.start();

    for event in events.try_iter() {
        log_event(&event);
    }
    let stats = result?;

    let snapshot = match &config.output.snapshot {
        Some(path) => {
            write_snapshot(driver.renderer().surface(), path)?;
            tracing::info!(path = %path.display(), "snapshot written");
            Some(path.clone())
        }
        None => None,
    };

    Ok(RunSummary {
        driver: stats,
        render: driver.renderer().stats(),
        snapshot,
    })
}

fn log_event(event: &DriverEvent) {
    match event {
        DriverEvent::Started => tracing::debug!("driver event: started"),
        DriverEvent::Stopped { frames } => tracing::debug!(frames, "driver event: stopped"),
        DriverEvent::Failed(err) => tracing::debug!(error = %err, "driver event: failed"),
    }
}

/// Writes `surface` to `path` as PPM.
///
/// # Errors
///
/// [`AppError::Snapshot`] on any I/O failure.
pub fn write_snapshot(surface: &Framebuffer, path: &Path) -> AppResult<()> {
    let to_error = |source| AppError::Snapshot {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    surface.write_ppm(BufWriter::new(file)).map_err(to_error)
}
