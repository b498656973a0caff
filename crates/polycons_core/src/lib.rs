//! # POLYCONS Core
//!
//! Fixed-timestep frame driver sitting between a clock, a stateful
//! simulation and a stateful drawing surface.
//!
//! ## Frame Timeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ host refresh ─► FrameScheduler::wait_for_frame()                  │
//! │                  │                                               │
//! │                  ▼                                               │
//! │          ClockSource::now()                                      │
//! │                  │                                               │
//! │                  ▼                                               │
//! │   FixedStepLoop: delta = clamp(now - last, 0, max_frame_delta)   │
//! │                  accumulator += delta                            │
//! │                  while accumulator >= fixed_step:                │
//! │                     accumulator -= fixed_step                    │
//! │                     ┌──────────── step cycle ───────────────┐    │
//! │                     │ advance → fetch → clear → lines → nodes│    │
//! │                     └────────────────────────────────────────┘    │
//! │                  last = now                                      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Architecture Rules
//!
//! 1. **Clamp before accumulate** - one stalled frame credits at most
//!    `max_frame_delta`
//! 2. **Residual carried exactly** - the accumulator always ends a frame
//!    in `[0, fixed_step)`
//! 3. **Fatal means fatal** - any gateway error halts the driver for good

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod accumulator;
pub mod clock;
pub mod cycle;
pub mod driver;
pub mod error;
pub mod gateway;

pub use accumulator::{FixedStepLoop, FrameOutcome, LoopTiming};
pub use clock::{ClockSample, ClockSource, HostClock, InstantClock, ManualClock, WallClock};
pub use driver::{
    CountedScheduler, DriverEvent, DriverStats, DriverStatus, FrameDriver, FrameReport,
    FrameScheduler, PacedScheduler, StopSignal,
};
pub use error::{LoopError, LoopResult, RenderError, SimulationError};
pub use gateway::{RenderGateway, SimulationGateway};
