//! Top-level error type for the bootstrap.

use std::path::PathBuf;

use polycons_core::{LoopError, RenderError, SimulationError};
use polycons_shared::ConfigError;
use thiserror::Error;

/// Everything that can stop a run.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The frame loop failed to start or halted.
    #[error(transparent)]
    Loop(#[from] LoopError),

    /// The world could not be created.
    #[error("failed to create world: {0}")]
    Simulation(#[from] SimulationError),

    /// The drawing surface could not be created.
    #[error("failed to create surface: {0}")]
    Render(#[from] RenderError),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize telemetry: {0}")]
    Telemetry(String),

    /// The final frame could not be written.
    #[error("failed to write snapshot {path}: {source}")]
    Snapshot {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for bootstrap operations.
pub type AppResult<T> = Result<T, AppError>;
