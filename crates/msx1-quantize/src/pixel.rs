//! Pixel layout accessors
//!
//! The engine is generic over the in-memory layout of a pixel. Anything that
//! can hand out and accept an [`Rgb`] value can be quantized in place; extra
//! channels (alpha) are left untouched.

use crate::color::Rgb;

/// Read/write access to the color channels of a pixel.
pub trait Pixel: Copy {
    /// The pixel's color channels.
    fn rgb(&self) -> Rgb;

    /// Overwrite the color channels, keeping any other channel as-is.
    fn set_rgb(&mut self, color: Rgb);
}

impl Pixel for Rgb {
    #[inline]
    fn rgb(&self) -> Rgb {
        *self
    }

    #[inline]
    fn set_rgb(&mut self, color: Rgb) {
        *self = color;
    }
}

/// 8-bit RGBA pixel in R, G, B, A byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to a byte array [R, G, B, A].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    #[inline]
    fn from(b: [u8; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }
}

impl Pixel for Rgba {
    #[inline]
    fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    #[inline]
    fn set_rgb(&mut self, color: Rgb) {
        self.r = color.r;
        self.g = color.g;
        self.b = color.b;
    }
}

/// 8-bit pixel in B, G, R, A byte order, as used by most video hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bgra {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgra {
    #[inline]
    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }
}

impl Pixel for Bgra {
    #[inline]
    fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    #[inline]
    fn set_rgb(&mut self, color: Rgb) {
        self.r = color.r;
        self.g = color.g;
        self.b = color.b;
    }
}
