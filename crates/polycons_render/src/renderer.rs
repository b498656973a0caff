//! # Framebuffer Render Gateway
//!
//! Paints the polycons scene the way a 2D canvas would: white background,
//! black lines whose alpha is the line strength, solid black node discs.

use polycons_core::{RenderError, RenderGateway};
use polycons_shared::WorldConfig;
use polycons_world::{Line, World};

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

/// Background colour after `clear`.
pub const BACKGROUND: Rgba = Rgba::WHITE;

/// Ink used for lines (alpha replaced per line) and nodes.
pub const INK: Rgba = Rgba::BLACK;

/// Drawing counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// `clear` calls.
    pub clears: u64,
    /// Lines stroked.
    pub lines_drawn: u64,
    /// Node discs filled.
    pub nodes_drawn: u64,
}

/// [`RenderGateway`] that owns a [`Framebuffer`].
#[derive(Clone, Debug)]
pub struct FramebufferRenderer {
    surface: Framebuffer,
    stats: RenderStats,
}

impl FramebufferRenderer {
    /// Creates a renderer with a cleared `width × height` surface.
    ///
    /// # Errors
    ///
    /// [`RenderError`] for a zero-sized surface.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        Ok(Self {
            surface: Framebuffer::new(width, height, BACKGROUND)?,
            stats: RenderStats::default(),
        })
    }

    /// Creates a renderer sized to the world's surface, rounded up.
    ///
    /// # Errors
    ///
    /// [`RenderError`] if the size is not a positive number of pixels that
    /// fits in a `u32`.
    pub fn for_world(config: &WorldConfig) -> Result<Self, RenderError> {
        Self::new(
            surface_dim("width", config.width)?,
            surface_dim("height", config.height)?,
        )
    }

    /// The drawing surface.
    #[must_use]
    pub const fn surface(&self) -> &Framebuffer {
        &self.surface
    }

    /// Gives up the drawing surface.
    #[must_use]
    pub fn into_surface(self) -> Framebuffer {
        self.surface
    }

    /// Drawing counters.
    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }
}

fn surface_dim(name: &str, value: f64) -> Result<u32, RenderError> {
    let px = value.ceil();
    if !(px.is_finite() && px >= 1.0 && px <= f64::from(u32::MAX)) {
        return Err(RenderError::new(format!(
            "surface {name} {value} is not a usable pixel size"
        )));
    }
    // Range checked above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(px as u32)
}

impl RenderGateway<World, Vec<Line>> for FramebufferRenderer {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.surface.clear(BACKGROUND);
        self.stats.clears += 1;
        Ok(())
    }

    fn draw_lines(&mut self, geometry: &Vec<Line>) -> Result<(), RenderError> {
        for line in geometry {
            let (start, end) = line.endpoints();
            self.surface
                .stroke_line(start, end, INK.with_alpha(line.strength().get()));
        }
        self.stats.lines_drawn += geometry.len() as u64;
        Ok(())
    }

    fn draw_nodes(&mut self, world: &World) -> Result<(), RenderError> {
        for node in world.nodes() {
            let p = node.position();
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(RenderError::new(format!(
                    "node at non-finite position ({}, {})",
                    p.x, p.y
                )));
            }
            self.surface.fill_circle(p, node.radius(), INK);
        }
        self.stats.nodes_drawn += world.nodes().len() as u64;
        Ok(())
    }
}
