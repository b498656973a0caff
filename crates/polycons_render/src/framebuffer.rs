//! # Framebuffer
//!
//! Row-major RGBA pixels with the three primitives the polycons scene
//! needs: clear, stroked line and filled disc. All drawing alpha-blends and
//! silently clips to the surface.

use std::io::{self, Write};

use polycons_core::RenderError;
use polycons_shared::Vec2;

use crate::color::Rgba;

/// Longest line, in DDA steps, that is rasterized at all.
pub const MAX_LINE_STEPS: f64 = 65_536.0;

/// CPU drawing surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Framebuffer {
    /// Allocates a `width × height` surface filled with `fill`.
    ///
    /// # Errors
    ///
    /// [`RenderError`] for a zero-sized or unaddressable surface.
    pub fn new(width: u32, height: u32, fill: Rgba) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::new(format!(
                "surface must not be empty, got {width}x{height}"
            )));
        }
        let len = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| RenderError::new(format!("surface {width}x{height} is too large")))?;

        Ok(Self {
            width,
            height,
            pixels: vec![fill; len],
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, if inside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(i64::from(x), i64::from(y)).map(|i| self.pixels[i])
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fills the whole surface with `color`, ignoring what was there.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        usize::try_from(y * i64::from(self.width) + x).ok()
    }

    /// Blends `color` into one pixel. Off-surface writes are dropped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = self.pixels[i].blend_over(color);
        }
    }

    /// Strokes a one-pixel line from `start` to `end` (DDA).
    ///
    /// Each covered pixel is blended once. Lines longer than
    /// [`MAX_LINE_STEPS`] are skipped.
    pub fn stroke_line(&mut self, start: Vec2, end: Vec2, color: Rgba) {
        if !(start.x.is_finite() && start.y.is_finite() && end.x.is_finite() && end.y.is_finite())
        {
            return;
        }
        let delta = end - start;
        let steps = delta.x.abs().max(delta.y.abs()).ceil();
        if steps > MAX_LINE_STEPS {
            tracing::trace!(steps, "line too long, skipped");
            return;
        }

        // In [0, MAX_LINE_STEPS].
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = steps as u64;
        let inc = if count == 0 {
            Vec2::ZERO
        } else {
            delta * (1.0 / steps)
        };

        let mut last = None;
        let mut p = start;
        for _ in 0..=count {
            let px = to_pixel(p);
            if last != Some(px) {
                self.blend_pixel(px.0, px.1, color);
                last = Some(px);
            }
            p += inc;
        }
    }

    /// Fills a disc of `radius` around `center`.
    ///
    /// A pixel is covered when its centre lies inside the disc. A disc too
    /// small to cover any pixel centre still paints the pixel under `center`.
    pub fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
            return;
        }
        let r = radius.max(0.0);
        let (x0, y0) = to_pixel(center - Vec2::new(r, r));
        let (x1, y1) = to_pixel(center + Vec2::new(r, r));
        let r2 = r * r;

        let mut painted = false;
        for y in y0.max(0)..=y1.min(i64::from(self.height) - 1) {
            for x in x0.max(0)..=x1.min(i64::from(self.width) - 1) {
                #[allow(clippy::cast_precision_loss)]
                let centre = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if (centre - center).length_squared() <= r2 {
                    self.blend_pixel(x, y, color);
                    painted = true;
                }
            }
        }

        if !painted {
            let (x, y) = to_pixel(center);
            self.blend_pixel(x, y, color);
        }
    }

    /// Writes the surface as a binary PPM (P6). Alpha is dropped.
    ///
    /// # Errors
    ///
    /// Any I/O error from `out`.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            rgb.extend_from_slice(&[px.r, px.g, px.b]);
        }
        out.write_all(&rgb)?;
        out.flush()
    }
}

/// Pixel containing `p`. Saturates far outside the surface.
#[allow(clippy::cast_possible_truncation)]
fn to_pixel(p: Vec2) -> (i64, i64) {
    (p.x.floor() as i64, p.y.floor() as i64)
}
