//! # POLYCONS
//!
//! Bootstrap for the fixed-timestep node/line animation: loads the
//! configuration, installs logging, picks a clock, creates the world and the
//! drawing surface, and hands them to the frame driver.
//!
//! ## Crates
//!
//! - `polycons_shared`: constants, `Vec2`, TOML configuration
//! - `polycons_core`: clock, accumulator, gateways, frame driver
//! - `polycons_world`: the simulation
//! - `polycons_render`: the software drawing surface
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = polycons::PolyconsConfig::load("polycons.toml")?;
//! polycons::init_telemetry(&config.logging)?;
//! let summary = polycons::run(&config)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod app;
pub mod error;
pub mod telemetry;

pub use app::{run, run_with, write_snapshot, RunSummary};
pub use error::{AppError, AppResult};
pub use polycons_shared::PolyconsConfig;
pub use telemetry::init_telemetry;
