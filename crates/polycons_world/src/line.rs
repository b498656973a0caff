//! # Proximity Lines
//!
//! Two nodes closer than the line threshold are joined by a line whose
//! alpha fades from 255 (touching) to nothing (at the threshold).
//!
//! ```text
//! adjusted = max - max * distance / threshold      (None if < 0)
//! alpha    = min(adjusted, max) * 255 / max        (truncated, None if 0)
//! ```

use std::num::NonZeroU8;

use polycons_shared::Vec2;

use crate::node::Node;

/// A line between two node centres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    start: Vec2,
    end: Vec2,
    strength: NonZeroU8,
}

impl Line {
    /// Alpha (1..=255) for two nodes `distance` apart.
    ///
    /// `max` scales the strength; `threshold` is the distance at which the
    /// line disappears. Returns `None` at or beyond the threshold.
    #[must_use]
    pub fn strength_alpha(distance: f64, max: f64, threshold: f64) -> Option<NonZeroU8> {
        let adjusted = max - (max * distance / threshold);
        if adjusted.is_nan() || adjusted < 0.0 {
            return None;
        }
        let scaled = adjusted.min(max) * 255.0 / max;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let alpha = scaled as u8;
        NonZeroU8::new(alpha)
    }

    /// Line between `start` and `end`, if they are close enough.
    ///
    /// Nodes sharing a position produce no line.
    #[must_use]
    pub fn try_new(start: &Node, end: &Node, max_strength: f64, threshold: f64) -> Option<Self> {
        let (a, b) = (start.position(), end.position());
        if a == b {
            return None;
        }
        let strength = Self::strength_alpha(a.distance(b), max_strength, threshold)?;
        Some(Self {
            start: a,
            end: b,
            strength,
        })
    }

    /// Start point.
    #[must_use]
    pub const fn start(&self) -> Vec2 {
        self.start
    }

    /// End point.
    #[must_use]
    pub const fn end(&self) -> Vec2 {
        self.end
    }

    /// Both end points.
    #[must_use]
    pub const fn endpoints(&self) -> (Vec2, Vec2) {
        (self.start, self.end)
    }

    /// Alpha of the stroke.
    #[must_use]
    pub const fn strength(&self) -> NonZeroU8 {
        self.strength
    }

    /// Alpha as an opacity in `(0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        f64::from(self.strength.get()) / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(distance: f64) -> Option<u8> {
        Line::strength_alpha(distance, 100.0, 100.0).map(NonZeroU8::get)
    }

    #[test]
    fn test_strength_alpha_halfway() {
        assert_eq!(alpha(50.0), Some(255 / 2));
    }

    #[test]
    fn test_strength_alpha_quarters() {
        assert_eq!(alpha(75.0), Some(255 / 4));
        assert_eq!(alpha(25.0), Some(191));
    }

    #[test]
    fn test_strength_alpha_edges() {
        assert_eq!(alpha(0.0), Some(255));
        assert_eq!(alpha(100.0), None);
        assert_eq!(alpha(150.0), None);
        assert_eq!(alpha(f64::NAN), None);
    }

    #[test]
    fn test_strength_alpha_uses_threshold_not_max() {
        // Default world: max 100, threshold 150.
        let a = Line::strength_alpha(75.0, 100.0, 150.0).map(NonZeroU8::get);
        assert_eq!(a, Some(127));
    }

    #[test]
    fn test_coincident_nodes_have_no_line() {
        let a = Node::new(Vec2::new(5.0, 5.0), Vec2::ZERO, 1.0);
        let b = Node::new(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0), 2.0);
        assert!(Line::try_new(&a, &b, 100.0, 150.0).is_none());
    }

    #[test]
    fn test_try_new_keeps_endpoints() {
        let a = Node::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 1.0);
        let b = Node::new(Vec2::new(30.0, 40.0), Vec2::ZERO, 1.0);
        let line = Line::try_new(&a, &b, 100.0, 100.0).unwrap();
        assert_eq!(line.endpoints(), (a.position(), b.position()));
        assert_eq!(line.strength().get(), 127);
        assert!((line.opacity() - 127.0 / 255.0).abs() < 1e-12);
    }
}
