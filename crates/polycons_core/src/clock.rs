//! # Clock Sources
//!
//! Monotonic time in seconds for the frame loop.
//!
//! - [`InstantClock`]: high resolution, backed by `Instant`
//! - [`WallClock`]: degraded source backed by `SystemTime`, clamped so it
//!   never runs backwards within one run
//! - [`HostClock`]: whichever of the two the platform supports
//! - [`ManualClock`]: moved by hand, for tests and deterministic replays

use std::sync::Arc;

// std panics on `Instant::now()` / `SystemTime::now()` on wasm32-unknown-unknown.
#[cfg(not(target_arch = "wasm32"))]
use std::time::{Instant, SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use polycons_shared::ClockPreference;

use crate::error::LoopError;

/// A point in time, in seconds. Only differences between samples matter.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ClockSample(f64);

impl ClockSample {
    /// Wraps a reading in seconds.
    #[must_use]
    pub const fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// The reading in seconds.
    #[must_use]
    pub const fn as_secs(self) -> f64 {
        self.0
    }

    /// Seconds from `earlier` to `self`. Negative if the clock misbehaved.
    #[must_use]
    pub fn elapsed_since(self, earlier: Self) -> f64 {
        self.0 - earlier.0
    }
}

/// Monotonic time provider.
pub trait ClockSource {
    /// Current time. Never less than a previous reading from the same source.
    fn now(&mut self) -> ClockSample;
}

impl<C: ClockSource + ?Sized> ClockSource for Box<C> {
    fn now(&mut self) -> ClockSample {
        (**self).now()
    }
}

/// High-resolution monotonic clock, zeroed at construction.
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    /// Starts a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for InstantClock {
    fn now(&mut self) -> ClockSample {
        ClockSample(self.origin.elapsed().as_secs_f64())
    }
}

/// Wall-clock fallback.
///
/// Readings are relative to the first one so they keep sub-millisecond
/// precision in an `f64`. A wall clock may be stepped backwards by the OS;
/// such readings are held at the last value instead.
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    origin: f64,
    last: f64,
}

impl WallClock {
    /// Probes the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::ClockUnavailable`] if the system time cannot be
    /// read relative to the Unix epoch.
    pub fn new() -> Result<Self, LoopError> {
        let origin = Self::read().ok_or_else(|| {
            LoopError::ClockUnavailable("system time is before the Unix epoch".into())
        })?;
        Ok(Self { origin, last: 0.0 })
    }

    fn read() -> Option<f64> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|d| d.as_secs_f64())
    }
}

impl ClockSource for WallClock {
    fn now(&mut self) -> ClockSample {
        if let Some(reading) = Self::read() {
            self.last = self.last.max(reading - self.origin);
        }
        ClockSample(self.last)
    }
}

/// The clock the host actually has.
#[derive(Clone, Copy, Debug)]
pub enum HostClock {
    /// Monotonic high-resolution clock.
    HighResolution(InstantClock),
    /// Coarser wall clock.
    Wall(WallClock),
}

impl HostClock {
    /// Picks a clock according to `preference`.
    ///
    /// `Auto` and `HighResolution` both take [`InstantClock`], which every
    /// target provides (wasm32 through `web-time`, i.e. `performance.now()`).
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::ClockUnavailable`] if the wall clock is requested
    /// and cannot be read.
    pub fn detect(preference: ClockPreference) -> Result<Self, LoopError> {
        match preference {
            ClockPreference::Auto | ClockPreference::HighResolution => {
                Ok(Self::HighResolution(InstantClock::new()))
            }
            ClockPreference::WallClock => {
                tracing::debug!("wall clock requested, using the degraded source");
                WallClock::new().map(Self::Wall)
            }
        }
    }

    /// True for the high-resolution source.
    #[must_use]
    pub const fn is_high_resolution(&self) -> bool {
        matches!(self, Self::HighResolution(_))
    }
}

impl ClockSource for HostClock {
    fn now(&mut self) -> ClockSample {
        match self {
            Self::HighResolution(clock) => clock.now(),
            Self::Wall(clock) => clock.now(),
        }
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle while the
/// driver owns another. Monotonicity is NOT enforced: tests use
/// [`ManualClock::set`] to inject clock anomalies.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<Mutex<f64>>,
}

impl ManualClock {
    /// Creates a clock reading `start` seconds.
    #[must_use]
    pub fn new(start: f64) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        *self.now.lock() += secs;
    }

    /// Jumps the clock to `secs`.
    pub fn set(&self, secs: f64) {
        *self.now.lock() = secs;
    }

    /// Current reading without going through [`ClockSource`].
    #[must_use]
    pub fn get(&self) -> f64 {
        *self.now.lock()
    }
}

impl ClockSource for ManualClock {
    fn now(&mut self) -> ClockSample {
        ClockSample(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_clock_is_monotonic() {
        let mut clock = InstantClock::new();
        let mut last = clock.now();
        for _ in 0..1000 {
            let now = clock.now();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_wall_clock_starts_near_zero_and_never_decreases() {
        let mut clock = WallClock::new().unwrap();
        let first = clock.now();
        assert!(first.as_secs() >= 0.0);
        assert!(first.as_secs() < 1.0);

        let mut last = first;
        for _ in 0..1000 {
            let now = clock.now();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_detect_respects_preference() {
        let clock = HostClock::detect(ClockPreference::WallClock).unwrap();
        assert!(!clock.is_high_resolution());

        let clock = HostClock::detect(ClockPreference::HighResolution).unwrap();
        assert!(clock.is_high_resolution());

        let clock = HostClock::detect(ClockPreference::Auto).unwrap();
        assert!(clock.is_high_resolution());
    }

    #[test]
    fn test_manual_clock_handles_share_time() {
        let handle = ManualClock::new(10.0);
        let mut owned = handle.clone();

        assert!((owned.now().as_secs() - 10.0).abs() < f64::EPSILON);
        handle.advance(0.5);
        assert!((owned.now().as_secs() - 10.5).abs() < f64::EPSILON);
        handle.set(3.0);
        assert!((owned.now().as_secs() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_elapsed_since() {
        let a = ClockSample::from_secs(1.25);
        let b = ClockSample::from_secs(2.0);
        assert!((b.elapsed_since(a) - 0.75).abs() < f64::EPSILON);
        assert!(a.elapsed_since(b) < 0.0);
    }

    #[test]
    fn test_boxed_clock() {
        let handle = ManualClock::new(4.0);
        let mut boxed: Box<dyn ClockSource> = Box::new(handle.clone());
        assert!((boxed.now().as_secs() - 4.0).abs() < f64::EPSILON);
    }
}
