//! # Frame Loop Error Types
//!
//! Every variant is fatal to the loop. Nothing here is retried.

use thiserror::Error;

/// Failure reported by a simulation gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SimulationError {
    message: String,
}

impl SimulationError {
    /// Creates a simulation error with a human readable reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The reason given by the simulation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by a render gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    /// Creates a render error with a human readable reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The reason given by the renderer.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that stop the frame loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoopError {
    /// No usable time source at construction.
    #[error("no usable clock source: {0}")]
    ClockUnavailable(String),

    /// The fixed step is zero, negative or not finite.
    #[error("fixed step must be a positive, finite number of seconds (got {0})")]
    InvalidStep(f64),

    /// The per-frame delta cap is zero, negative or not finite.
    #[error("max frame delta must be a positive, finite number of seconds (got {0})")]
    InvalidFrameDelta(f64),

    /// The simulation failed to advance or to produce geometry.
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// The renderer failed to clear or draw.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// The driver already stopped on a fatal error and cannot resume.
    #[error("frame driver halted by an earlier fatal error")]
    Halted,
}

/// Result type for frame loop operations.
pub type LoopResult<T> = Result<T, LoopError>;
