//! # POLYCONS World
//!
//! The reference simulation driven by `polycons_core`: a field of nodes
//! bouncing inside a rectangle, linked by lines that fade out with distance.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same [`WorldConfig`] seed always yields the same
//!    world, and stepping is pure arithmetic
//! 2. **Opaque to the loop**: the frame driver only sees
//!    [`WorldSimulation`] through `SimulationGateway`
//! 3. **Fresh geometry per step**: lines are recomputed from node positions
//!    and never cached
//!
//! ## Example
//!
//! ```rust,ignore
//! use polycons_core::SimulationGateway;
//! use polycons_world::{WorldConfig, WorldSimulation};
//!
//! let mut simulation = WorldSimulation::new();
//! let mut world = simulation.create_world(&WorldConfig::default())?;
//! simulation.advance(&mut world, 1.0 / 60.0)?;
//! let lines = simulation.fetch_geometry(&world)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod line;
pub mod node;
pub mod simulation;
pub mod world;

pub use line::Line;
pub use node::Node;
pub use polycons_shared::WorldConfig;
pub use simulation::WorldSimulation;
pub use world::World;
