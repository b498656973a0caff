//! # Simulation Gateway
//!
//! Connects [`World`] to the frame driver.
//!
//! ```text
//! create_world(config) ─► validate ─► ChaCha8(seed) ─► World::random
//! advance(world, dt)   ─► World::step_nodes(dt)
//! fetch_geometry(world)─► World::calculate_lines()
//! ```

use polycons_core::{SimulationError, SimulationGateway};
use polycons_shared::WorldConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::line::Line;
use crate::world::World;

/// [`SimulationGateway`] over the node/line [`World`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WorldSimulation {
    steps: u64,
}

impl WorldSimulation {
    /// Creates the gateway.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: 0 }
    }

    /// Steps advanced so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Rejects parameters that would produce an empty or degenerate world.
    ///
    /// # Errors
    ///
    /// [`SimulationError`] naming the first bad field.
    pub fn validate(config: &WorldConfig) -> Result<(), SimulationError> {
        if config.node_count == 0 {
            return Err(SimulationError::new("world.node_count must be > 0"));
        }
        positive("world.width", config.width)?;
        positive("world.height", config.height)?;
        samplable("world.width", config.width)?;
        samplable("world.height", config.height)?;
        positive("world.max_strength", config.max_strength)?;
        positive("world.line_threshold", config.line_threshold)?;
        ordered(
            "world.min_velocity",
            config.min_velocity,
            "world.max_velocity",
            config.max_velocity,
        )?;
        ordered(
            "world.min_radius",
            config.min_radius,
            "world.max_radius",
            config.max_radius,
        )?;
        if config.min_radius < 0.0 {
            return Err(SimulationError::new("world.min_radius must be >= 0"));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::new(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

fn ordered(lo_name: &str, lo: f64, hi_name: &str, hi: f64) -> Result<(), SimulationError> {
    if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
        return Err(SimulationError::new(format!(
            "{lo_name} ({lo}) must be finite and <= {hi_name} ({hi})"
        )));
    }
    samplable(&format!("{lo_name}..={hi_name}"), hi - lo)
}

/// `rand` scales a float range by slightly more than its width and panics if
/// that overflows.
fn samplable(name: &str, width: f64) -> Result<(), SimulationError> {
    if (width * 2.0).is_finite() {
        Ok(())
    } else {
        Err(SimulationError::new(format!(
            "{name} spans {width}, too wide to sample"
        )))
    }
}

impl SimulationGateway for WorldSimulation {
    type Config = WorldConfig;
    type World = World;
    type Geometry = Vec<Line>;

    fn create_world(&mut self, config: &WorldConfig) -> Result<World, SimulationError> {
        Self::validate(config)?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = World::random(&mut rng, config);
        tracing::info!(
            nodes = world.nodes().len(),
            width = config.width,
            height = config.height,
            seed = config.seed,
            "world created"
        );
        Ok(world)
    }

    fn advance(&mut self, world: &mut World, dt: f64) -> Result<(), SimulationError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimulationError::new(format!("invalid step duration {dt}")));
        }
        world.step_nodes(dt);
        self.steps += 1;
        Ok(())
    }

    fn fetch_geometry(&mut self, world: &World) -> Result<Vec<Line>, SimulationError> {
        Ok(world.calculate_lines())
    }
}
