//! # Gateway Contracts
//!
//! The frame loop never looks inside the world or the drawing surface. It
//! reaches them only through these two traits.
//!
//! ```text
//! Core defines:              Collaborator implements:
//! ┌────────────────────┐     ┌────────────────────────┐
//! │ SimulationGateway  │ ←── │ polycons_world         │
//! │ RenderGateway      │ ←── │ polycons_render        │
//! └────────────────────┘     └────────────────────────┘
//! ```

use crate::error::{RenderError, SimulationError};

// ============================================================================
// SIMULATION
// ============================================================================

/// Capability interface to the external simulation.
pub trait SimulationGateway {
    /// Parameters consumed once by [`SimulationGateway::create_world`].
    type Config;
    /// Simulation state. Owned by whoever created it, borrowed by the driver.
    type World;
    /// Per-step drawable snapshot.
    type Geometry;

    /// Builds a world from its startup parameters.
    ///
    /// # Errors
    ///
    /// [`SimulationError`] if the parameters are unusable.
    fn create_world(&mut self, config: &Self::Config) -> Result<Self::World, SimulationError>;

    /// Advances `world` by `dt` seconds. Synchronous.
    ///
    /// # Errors
    ///
    /// [`SimulationError`]; the frame loop halts.
    fn advance(&mut self, world: &mut Self::World, dt: f64) -> Result<(), SimulationError>;

    /// Snapshot of what should be drawn right now.
    ///
    /// # Errors
    ///
    /// [`SimulationError`]; the frame loop halts.
    fn fetch_geometry(&mut self, world: &Self::World) -> Result<Self::Geometry, SimulationError>;
}

// ============================================================================
// RENDER
// ============================================================================

/// Capability interface to the drawing surface, which the implementor owns.
///
/// Per step the loop calls `clear`, then `draw_lines`, then `draw_nodes`.
/// Lines go first so nodes cover them where they overlap.
pub trait RenderGateway<W: ?Sized, G: ?Sized> {
    /// Clears the whole surface.
    ///
    /// # Errors
    ///
    /// [`RenderError`]; the frame loop halts.
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Paints the line geometry of one step.
    ///
    /// # Errors
    ///
    /// [`RenderError`]; the frame loop halts.
    fn draw_lines(&mut self, geometry: &G) -> Result<(), RenderError>;

    /// Paints the world's nodes.
    ///
    /// # Errors
    ///
    /// [`RenderError`]; the frame loop halts.
    fn draw_nodes(&mut self, world: &W) -> Result<(), RenderError>;
}

// ============================================================================
// MOCK IMPLEMENTATIONS (For Testing)
// ============================================================================

/// Recording gateways that log every call into one shared, ordered log.
pub mod mock {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::{RenderGateway, SimulationGateway};
    use crate::error::{RenderError, SimulationError};

    /// One gateway call.
    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        /// `create_world`.
        CreateWorld,
        /// `advance` with its step.
        Advance(f64),
        /// `fetch_geometry`; carries the world's step count at fetch time.
        FetchGeometry(u64),
        /// `clear`.
        Clear,
        /// `draw_lines`; carries the geometry's step count.
        DrawLines(u64),
        /// `draw_nodes`; carries the world's step count.
        DrawNodes(u64),
    }

    /// Shared, ordered call log.
    #[derive(Clone, Debug, Default)]
    pub struct CallLog {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl CallLog {
        /// Creates an empty log.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, call: Call) {
            self.calls.lock().push(call);
        }

        /// Copy of every call so far.
        #[must_use]
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        /// Number of logged calls matching `predicate`.
        pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
            self.calls.lock().iter().filter(|c| predicate(c)).count()
        }

        /// Forgets everything logged so far.
        pub fn clear(&self) {
            self.calls.lock().clear();
        }
    }

    /// World used by [`RecordingSimulation`].
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct MockWorld {
        /// Completed `advance` calls.
        pub steps: u64,
        /// Sum of all `dt` values seen.
        pub elapsed: f64,
    }

    /// Geometry used by [`RecordingSimulation`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MockGeometry {
        /// The world's step count when the geometry was fetched.
        pub generation: u64,
    }

    /// Simulation gateway that records calls and fails on request.
    #[derive(Debug, Default)]
    pub struct RecordingSimulation {
        log: CallLog,
        advance_calls: usize,
        fail_advance_on: Option<usize>,
        fetch_calls: usize,
        fail_fetch_on: Option<usize>,
    }

    impl RecordingSimulation {
        /// Creates a simulation logging into `log`.
        #[must_use]
        pub fn new(log: CallLog) -> Self {
            Self {
                log,
                ..Self::default()
            }
        }

        /// Makes the `n`-th `advance` call (1-based) fail.
        #[must_use]
        pub fn fail_advance_on(mut self, n: usize) -> Self {
            self.fail_advance_on = Some(n);
            self
        }

        /// Makes the `n`-th `fetch_geometry` call (1-based) fail.
        #[must_use]
        pub fn fail_fetch_on(mut self, n: usize) -> Self {
            self.fail_fetch_on = Some(n);
            self
        }
    }

    impl SimulationGateway for RecordingSimulation {
        type Config = ();
        type World = MockWorld;
        type Geometry = MockGeometry;

        fn create_world(&mut self, _config: &()) -> Result<MockWorld, SimulationError> {
            self.log.push(Call::CreateWorld);
            Ok(MockWorld::default())
        }

        fn advance(&mut self, world: &mut MockWorld, dt: f64) -> Result<(), SimulationError> {
            self.advance_calls += 1;
            self.log.push(Call::Advance(dt));
            if self.fail_advance_on == Some(self.advance_calls) {
                return Err(SimulationError::new(format!(
                    "advance #{} failed",
                    self.advance_calls
                )));
            }
            world.steps += 1;
            world.elapsed += dt;
            Ok(())
        }

        fn fetch_geometry(&mut self, world: &MockWorld) -> Result<MockGeometry, SimulationError> {
            self.fetch_calls += 1;
            self.log.push(Call::FetchGeometry(world.steps));
            if self.fail_fetch_on == Some(self.fetch_calls) {
                return Err(SimulationError::new(format!(
                    "fetch #{} failed",
                    self.fetch_calls
                )));
            }
            Ok(MockGeometry {
                generation: world.steps,
            })
        }
    }

    /// Render gateway that records calls and fails on request.
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        log: CallLog,
        clears: usize,
        fail_clear_on: Option<usize>,
        node_draws: usize,
        fail_nodes_on: Option<usize>,
    }

    impl RecordingRenderer {
        /// Creates a renderer logging into `log`.
        #[must_use]
        pub fn new(log: CallLog) -> Self {
            Self {
                log,
                ..Self::default()
            }
        }

        /// Makes the `n`-th `clear` call (1-based) fail.
        #[must_use]
        pub fn fail_clear_on(mut self, n: usize) -> Self {
            self.fail_clear_on = Some(n);
            self
        }

        /// Makes the `n`-th `draw_nodes` call (1-based) fail.
        #[must_use]
        pub fn fail_nodes_on(mut self, n: usize) -> Self {
            self.fail_nodes_on = Some(n);
            self
        }
    }

    impl RenderGateway<MockWorld, MockGeometry> for RecordingRenderer {
        fn clear(&mut self) -> Result<(), RenderError> {
            self.clears += 1;
            self.log.push(Call::Clear);
            if self.fail_clear_on == Some(self.clears) {
                return Err(RenderError::new(format!("clear #{} failed", self.clears)));
            }
            Ok(())
        }

        fn draw_lines(&mut self, geometry: &MockGeometry) -> Result<(), RenderError> {
            self.log.push(Call::DrawLines(geometry.generation));
            Ok(())
        }

        fn draw_nodes(&mut self, world: &MockWorld) -> Result<(), RenderError> {
            self.node_draws += 1;
            self.log.push(Call::DrawNodes(world.steps));
            if self.fail_nodes_on == Some(self.node_draws) {
                return Err(RenderError::new(format!(
                    "draw_nodes #{} failed",
                    self.node_draws
                )));
            }
            Ok(())
        }
    }
}
