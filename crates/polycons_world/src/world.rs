//! # World State
//!
//! Owns every node plus the line parameters. Created once by the bootstrap
//! collaborator and then only borrowed.

use polycons_shared::{Vec2, WorldConfig};
use rand::Rng;

use crate::line::Line;
use crate::node::Node;

/// Nodes, surface bounds and line parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    nodes: Vec<Node>,
    bounds: Vec2,
    max_strength: f64,
    line_threshold: f64,
}

impl World {
    /// Creates a world from explicit nodes.
    #[must_use]
    pub fn new(nodes: Vec<Node>, bounds: Vec2, max_strength: f64, line_threshold: f64) -> Self {
        Self {
            nodes,
            bounds,
            max_strength,
            line_threshold,
        }
    }

    /// Creates `config.node_count` random nodes.
    ///
    /// The config must already be validated.
    pub fn random(rng: &mut (impl Rng + ?Sized), config: &WorldConfig) -> Self {
        let bounds = Vec2::new(config.width, config.height);
        let velocity = (config.min_velocity, config.max_velocity);
        let radius = (config.min_radius, config.max_radius);

        let nodes = (0..config.node_count)
            .map(|_| Node::random(rng, bounds, velocity, radius))
            .collect();

        Self::new(nodes, bounds, config.max_strength, config.line_threshold)
    }

    /// Advances every node by `dt` seconds.
    pub fn step_nodes(&mut self, dt: f64) {
        let bounds = self.bounds;
        self.nodes.iter_mut().for_each(|n| n.step(dt, bounds));
    }

    /// Lines for every unordered pair of nodes within the threshold.
    #[must_use]
    pub fn calculate_lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        for (i, start) in self.nodes.iter().enumerate() {
            for end in &self.nodes[i + 1..] {
                if let Some(line) =
                    Line::try_new(start, end, self.max_strength, self.line_threshold)
                {
                    lines.push(line);
                }
            }
        }
        lines
    }

    /// All nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Surface size the nodes bounce inside.
    #[must_use]
    pub const fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Strength scale of lines.
    #[must_use]
    pub const fn max_strength(&self) -> f64 {
        self.max_strength
    }

    /// Distance at which lines disappear.
    #[must_use]
    pub const fn line_threshold(&self) -> f64 {
        self.line_threshold
    }
}
