//! One simulation-advance-and-render cycle.

use crate::error::LoopError;
use crate::gateway::{RenderGateway, SimulationGateway};

/// Runs one fixed step: advance, fetch, clear, draw lines, draw nodes.
///
/// The order is fixed. Each call finishes before the next begins and the
/// first failure ends the cycle; there is no partial-step recovery.
///
/// # Errors
///
/// [`LoopError::Simulation`] or [`LoopError::Render`] from the failing call.
pub fn run_step<S, R>(
    simulation: &mut S,
    renderer: &mut R,
    world: &mut S::World,
    dt: f64,
) -> Result<(), LoopError>
where
    S: SimulationGateway,
    R: RenderGateway<S::World, S::Geometry>,
{
    simulation.advance(world, dt)?;
    let geometry = simulation.fetch_geometry(world)?;

    renderer.clear()?;
    // Lines first so nodes are painted over them.
    renderer.draw_lines(&geometry)?;
    renderer.draw_nodes(world)?;
    Ok(())
}
