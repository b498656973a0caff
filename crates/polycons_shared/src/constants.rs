//! # Timing & World Constants
//!
//! Defaults used when the configuration file leaves a value out.

// =============================================================================
// TIMING
// =============================================================================

/// Simulation step duration in seconds (60 Hz).
pub const DEFAULT_FIXED_STEP: f64 = 1.0 / 60.0;

/// Upper bound on elapsed time credited to the accumulator in one frame.
///
/// A backgrounded tab or a debugger pause produces one long gap; anything
/// beyond this is dropped instead of replayed as a burst of catch-up steps.
pub const DEFAULT_MAX_FRAME_DELTA: f64 = 1.0;

/// Refresh rate the native frame scheduler paces itself to.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Capacity of the driver's event channel.
pub const DRIVER_EVENT_CAPACITY: usize = 64;

// =============================================================================
// WORLD
// =============================================================================

/// Number of nodes spawned in a fresh world.
pub const DEFAULT_NODE_COUNT: usize = 40;

/// Surface width in pixels.
pub const DEFAULT_SURFACE_WIDTH: f64 = 800.0;

/// Surface height in pixels.
pub const DEFAULT_SURFACE_HEIGHT: f64 = 600.0;

/// Strength scale of a line between two coincident nodes.
pub const DEFAULT_MAX_STRENGTH: f64 = 100.0;

/// Distance at which two nodes stop being connected.
pub const DEFAULT_LINE_THRESHOLD: f64 = 150.0;

/// Lower bound of each velocity component (pixels per second).
pub const DEFAULT_MIN_VELOCITY: f64 = -100.0;

/// Upper bound of each velocity component (pixels per second).
pub const DEFAULT_MAX_VELOCITY: f64 = 100.0;

/// Smallest node radius in pixels.
pub const DEFAULT_MIN_RADIUS: f64 = 1.0;

/// Largest node radius in pixels.
pub const DEFAULT_MAX_RADIUS: f64 = 3.0;

/// Seed for the world's deterministic RNG.
pub const DEFAULT_WORLD_SEED: u64 = 0x5EED;
