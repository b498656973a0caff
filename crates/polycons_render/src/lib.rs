//! # POLYCONS Render
//!
//! A CPU framebuffer standing in for a browser canvas, plus the render
//! gateway that paints a `polycons_world::World` onto it.
//!
//! ## Draw Order Per Step
//!
//! ```text
//! clear (white) ─► lines (black, alpha = line strength) ─► nodes (black discs)
//! ```
//!
//! Nodes are painted last so they sit on top of the lines.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod framebuffer;
pub mod renderer;

pub use color::Rgba;
pub use framebuffer::Framebuffer;
pub use renderer::{FramebufferRenderer, RenderStats};
