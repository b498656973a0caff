//! # POLYCONS Headless Runner
//!
//! Runs the animation against the software framebuffer and optionally saves
//! the last frame.
//!
//! ```bash
//! polycons                 # ./polycons.toml if present, else defaults
//! polycons my_config.toml
//! RUST_LOG=polycons_core=debug polycons
//! ```

use std::path::Path;
use std::process::ExitCode;

use polycons::{AppError, PolyconsConfig};

const DEFAULT_CONFIG: &str = "polycons.toml";

fn load_config() -> Result<PolyconsConfig, AppError> {
    match std::env::args_os().nth(1) {
        Some(path) => Ok(PolyconsConfig::load(path)?),
        None if Path::new(DEFAULT_CONFIG).exists() => Ok(PolyconsConfig::load(DEFAULT_CONFIG)?),
        None => Ok(PolyconsConfig::default()),
    }
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("polycons: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = polycons::init_telemetry(&config.logging) {
        eprintln!("polycons: {e}");
        return ExitCode::FAILURE;
    }

    match polycons::run(&config) {
        Ok(summary) => {
            tracing::info!(
                frames = summary.driver.frames,
                steps = summary.driver.steps,
                clamped_frames = summary.driver.clamped_frames,
                lines_drawn = summary.render.lines_drawn,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
