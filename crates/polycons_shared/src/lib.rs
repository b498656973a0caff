//! # POLYCONS Shared
//!
//! Common types used by the frame loop, the simulation and the renderer.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on another POLYCONS crate. It holds:
//! - `constants`: default timing and world tuning values
//! - `math`: the plain `Vec2` used for node positions and velocities
//! - `config`: the TOML configuration read once at startup

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod math;

pub use config::{
    ClockPreference, ConfigError, LoggingConfig, OutputConfig, PolyconsConfig, TimingConfig,
    WorldConfig,
};
pub use constants::{DEFAULT_FIXED_STEP, DEFAULT_MAX_FRAME_DELTA, DEFAULT_TARGET_FPS};
pub use math::Vec2;
