//! Logging bootstrap (`tracing` + `tracing-subscriber`).
//!
//! `RUST_LOG` wins when set; otherwise `[logging] level` from the config.

use polycons_shared::LoggingConfig;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Installs the global fmt subscriber.
///
/// # Errors
///
/// [`AppError::Telemetry`] for an unparsable filter or if a global
/// subscriber is already installed.
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = env_filter(config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))?;

    tracing::info!(target: "telemetry", level = %config.level, "telemetry initialized");
    Ok(())
}

/// Filter from `RUST_LOG` if set and non-empty, else from `config.level`.
///
/// # Errors
///
/// [`AppError::Telemetry`] if the chosen directives do not parse.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, AppError> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => parse_filter(&directives),
        _ => parse_filter(&config.level),
    }
}

fn parse_filter(directives: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(directives)
        .map_err(|e| AppError::Telemetry(format!("invalid log filter {directives:?}: {e}")))
}
