//! # Timestep Accumulator
//!
//! Turns variable display-frame gaps into a whole number of fixed simulation
//! steps.
//!
//! ## Design
//!
//! Per frame:
//! 1. `delta = clamp(now - last, 0, max_frame_delta)` - clamped BEFORE it
//!    is accumulated, so a long stall costs at most one capped burst
//! 2. `accumulator += delta`
//! 3. while `accumulator >= fixed_step`: subtract one step, run one step
//! 4. `last = now`
//!
//! The accumulator leaves every frame in `[0, fixed_step)`; the fractional
//! remainder is carried into the next frame instead of being rounded away.

use crate::clock::ClockSample;
use crate::error::LoopError;

/// Step size and per-frame credit cap, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopTiming {
    /// Fixed simulation step.
    pub fixed_step: f64,
    /// Max elapsed time credited per frame.
    pub max_frame_delta: f64,
}

impl LoopTiming {
    /// Rejects non-positive or non-finite values.
    ///
    /// # Errors
    ///
    /// [`LoopError::InvalidStep`] or [`LoopError::InvalidFrameDelta`].
    pub fn validate(&self) -> Result<(), LoopError> {
        if !(self.fixed_step.is_finite() && self.fixed_step > 0.0) {
            return Err(LoopError::InvalidStep(self.fixed_step));
        }
        if !(self.max_frame_delta.is_finite() && self.max_frame_delta > 0.0) {
            return Err(LoopError::InvalidFrameDelta(self.max_frame_delta));
        }
        Ok(())
    }
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            fixed_step: polycons_shared::DEFAULT_FIXED_STEP,
            max_frame_delta: polycons_shared::DEFAULT_MAX_FRAME_DELTA,
        }
    }
}

impl From<&polycons_shared::TimingConfig> for LoopTiming {
    fn from(config: &polycons_shared::TimingConfig) -> Self {
        Self {
            fixed_step: config.fixed_step,
            max_frame_delta: config.max_frame_delta,
        }
    }
}

/// What one frame did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutcome {
    /// Seconds credited to the accumulator (after clamping).
    pub delta: f64,
    /// Whether the raw gap exceeded `max_frame_delta`.
    pub clamped: bool,
    /// Steps run this frame.
    pub steps: u32,
    /// Accumulator left for the next frame.
    pub residual: f64,
}

/// Fixed-timestep bookkeeping.
///
/// Created once with the first clock sample and an empty accumulator, then
/// fed one sample per display frame.
#[derive(Clone, Debug)]
pub struct FixedStepLoop {
    /// Most recent clock sample.
    last_sample: ClockSample,
    /// Unconsumed simulation time.
    accumulator: f64,
    /// Step duration.
    fixed_step: f64,
    /// Per-frame credit cap.
    max_frame_delta: f64,
}

impl FixedStepLoop {
    /// Creates the loop state.
    ///
    /// # Errors
    ///
    /// [`LoopError::InvalidStep`] / [`LoopError::InvalidFrameDelta`] for bad
    /// timing values.
    pub fn new(timing: LoopTiming, first_sample: ClockSample) -> Result<Self, LoopError> {
        timing.validate()?;
        Ok(Self {
            last_sample: first_sample,
            accumulator: 0.0,
            fixed_step: timing.fixed_step,
            max_frame_delta: timing.max_frame_delta,
        })
    }

    /// Runs one frame: credits the time since the last sample, then calls
    /// `step` once per whole fixed step with the step duration.
    ///
    /// The first error from `step` stops the frame immediately; later steps
    /// are not attempted and `last_sample` is left untouched.
    ///
    /// # Errors
    ///
    /// Whatever `step` returns.
    pub fn frame<E, F>(&mut self, now: ClockSample, step: F) -> Result<FrameOutcome, E>
    where
        F: FnMut(f64) -> Result<(), E>,
    {
        let (delta, clamped) = self.credit(now);
        let steps = self.drain(step)?;
        self.last_sample = now;

        Ok(FrameOutcome {
            delta,
            clamped,
            steps,
            residual: self.accumulator,
        })
    }

    /// Adds the clamped gap since the last sample to the accumulator.
    ///
    /// `f64::max`/`min` rather than `clamp`: a NaN gap becomes 0.
    fn credit(&mut self, now: ClockSample) -> (f64, bool) {
        let raw = now.elapsed_since(self.last_sample);
        let delta = raw.max(0.0).min(self.max_frame_delta);
        if raw < 0.0 {
            tracing::trace!(raw, "clock went backwards, crediting nothing");
        }
        self.accumulator += delta;
        (delta, raw > self.max_frame_delta)
    }

    /// Consumes whole steps from the accumulator.
    ///
    /// # Errors
    ///
    /// Whatever `step` returns; the failing step's time is already consumed.
    pub fn drain<E, F>(&mut self, mut step: F) -> Result<u32, E>
    where
        F: FnMut(f64) -> Result<(), E>,
    {
        let mut steps = 0;
        while self.accumulator >= self.fixed_step {
            self.accumulator -= self.fixed_step;
            step(self.fixed_step)?;
            steps += 1;
        }
        Ok(steps)
    }

    /// Unconsumed simulation time.
    #[inline]
    #[must_use]
    pub const fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Most recent clock sample.
    #[inline]
    #[must_use]
    pub const fn last_sample(&self) -> ClockSample {
        self.last_sample
    }

    /// Step duration in seconds.
    #[inline]
    #[must_use]
    pub const fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    /// Per-frame credit cap in seconds.
    #[inline]
    #[must_use]
    pub const fn max_frame_delta(&self) -> f64 {
        self.max_frame_delta
    }
}
