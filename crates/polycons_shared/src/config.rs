//! # Startup Configuration
//!
//! Read once from a TOML file before the frame loop starts. Every section
//! falls back to the defaults in [`crate::constants`], so an empty file is a
//! valid configuration.
//!
//! ```toml
//! [timing]
//! fixed_step = 0.016666666666666666
//! max_frame_delta = 1.0
//! clock = "auto"
//!
//! [world]
//! node_count = 40
//! line_threshold = 150.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_FIXED_STEP, DEFAULT_LINE_THRESHOLD, DEFAULT_MAX_FRAME_DELTA, DEFAULT_MAX_RADIUS,
    DEFAULT_MAX_STRENGTH, DEFAULT_MAX_VELOCITY, DEFAULT_MIN_RADIUS, DEFAULT_MIN_VELOCITY,
    DEFAULT_NODE_COUNT, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, DEFAULT_TARGET_FPS,
    DEFAULT_WORLD_SEED,
};

/// Errors raised while loading the startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which host time source the frame loop samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPreference {
    /// High resolution where the platform has it, wall clock otherwise.
    #[default]
    Auto,
    /// Monotonic high-resolution clock only.
    HighResolution,
    /// Wall clock (coarser, clamped to never run backwards).
    WallClock,
}

/// Frame loop timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fixed simulation step in seconds.
    pub fixed_step: f64,
    /// Max elapsed seconds credited per display frame.
    pub max_frame_delta: f64,
    /// Clock source selection.
    pub clock: ClockPreference,
    /// Refresh rate of the native frame scheduler.
    pub target_fps: u32,
    /// Stop after this many frames. `None` runs until stopped.
    pub max_frames: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_step: DEFAULT_FIXED_STEP,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            clock: ClockPreference::Auto,
            target_fps: DEFAULT_TARGET_FPS,
            max_frames: None,
        }
    }
}

/// Parameters handed to the simulation when the world is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Strength scale of the strongest line.
    pub max_strength: f64,
    /// Distance beyond which nodes are not connected.
    pub line_threshold: f64,
    /// Lower bound of each velocity component.
    pub min_velocity: f64,
    /// Upper bound of each velocity component.
    pub max_velocity: f64,
    /// Smallest node radius.
    pub min_radius: f64,
    /// Largest node radius.
    pub max_radius: f64,
    /// RNG seed; the same seed always yields the same world.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            max_strength: DEFAULT_MAX_STRENGTH,
            line_threshold: DEFAULT_LINE_THRESHOLD,
            min_velocity: DEFAULT_MIN_VELOCITY,
            max_velocity: DEFAULT_MAX_VELOCITY,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            seed: DEFAULT_WORLD_SEED,
        }
    }
}

/// Where the headless runner writes its output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// PPM file receiving the last rendered frame.
    pub snapshot: Option<PathBuf>,
}

/// Log filter used when `RUST_LOG` is not set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive, e.g. `info` or `polycons_core=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete startup configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyconsConfig {
    /// Frame loop timing.
    pub timing: TimingConfig,
    /// Simulation parameters.
    pub world: WorldConfig,
    /// Output locations.
    pub output: OutputConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl PolyconsConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text cannot be parsed or validated.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that no downstream constructor owns.
    ///
    /// Step and delta bounds are left to the frame loop, world ranges to the
    /// simulation, so each reports its own error kind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero refresh rate, a zero frame
    /// limit or an empty log filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.target_fps == 0 {
            return Err(ConfigError::Invalid("timing.target_fps must be > 0".into()));
        }
        if self.timing.max_frames == Some(0) {
            return Err(ConfigError::Invalid("timing.max_frames must be > 0".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".into()));
        }
        Ok(())
    }
}
