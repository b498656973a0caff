//! Bouncing nodes.

use polycons_shared::Vec2;
use rand::Rng;

/// A point with a velocity and a drawn radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    position: Vec2,
    velocity: Vec2,
    radius: f64,
}

impl Node {
    /// Creates a node.
    #[must_use]
    pub const fn new(position: Vec2, velocity: Vec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Random node inside `[0, bounds.x) × [0, bounds.y)`.
    ///
    /// Velocity components and radius are drawn uniformly from the inclusive
    /// ranges. Callers validate the ranges first; an empty range panics in
    /// `rand`.
    pub fn random(
        rng: &mut (impl Rng + ?Sized),
        bounds: Vec2,
        velocity: (f64, f64),
        radius: (f64, f64),
    ) -> Self {
        let position = Vec2::new(rng.gen_range(0.0..bounds.x), rng.gen_range(0.0..bounds.y));
        let velocity = Vec2::new(
            rng.gen_range(velocity.0..=velocity.1),
            rng.gen_range(velocity.0..=velocity.1),
        );
        let radius = rng.gen_range(radius.0..=radius.1);
        Self::new(position, velocity, radius)
    }

    /// Moves the node by `dt` seconds inside `bounds`.
    ///
    /// A velocity component flips when the node touches the matching edge,
    /// before the move is applied.
    pub fn step(&mut self, dt: f64, bounds: Vec2) {
        let x = self.position.x;
        if x <= self.radius || x > bounds.x - self.radius {
            self.velocity.x = -self.velocity.x;
        }

        let y = self.position.y;
        if y <= self.radius || y > bounds.y - self.radius {
            self.velocity.y = -self.velocity.y;
        }

        self.position += self.velocity * dt;
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Drawn radius.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }
}
