//! 8-bit RGBA pixels.

use bytemuck::{Pod, Zeroable};

/// One pixel, straight (non-premultiplied) alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba {
    /// Creates a pixel.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Same colour, different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Paints `src` over `self`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn blend_over(self, src: Self) -> Self {
        let sa = u32::from(src.a);
        let inv = 255 - sa;
        // Weighted mean of two u8 values, so the result fits in a u8.
        let mix = |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * inv + 127) / 255) as u8;
        Self {
            r: mix(src.r, self.r),
            g: mix(src.g, self.g),
            b: mix(src.b, self.b),
            a: mix(255, self.a),
        }
    }
}
