//! Per-pixel preprocessing chain.

use super::lut::Lut;
use super::options::PreprocessOptions;
use super::sharpen::sharpen_buffer;
use crate::color::{hsb_to_rgb, rgb_to_hsb, Rgb};
use crate::pixel::Pixel;

/// Applies [`PreprocessOptions`] and an optional [`Lut`] to pixels.
///
/// The per-pixel order is fixed: LUT remap, posterize, then the HSB
/// adjustments (hue, saturation, gamma, highlight). Sharpening is a buffer
/// operation and runs before all of them in [`Preprocessor::process`].
///
/// # Example
///
/// ```
/// use msx1_quantize::{PreprocessOptions, Preprocessor, Rgb};
///
/// let pre = Preprocessor::new(PreprocessOptions::new().posterize(2), None);
/// assert_eq!(pre.apply(Rgb::new(100, 140, 255)), Rgb::new(0, 255, 255));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Preprocessor<'a> {
    options: PreprocessOptions,
    lut: Option<&'a Lut>,
}

impl<'a> Preprocessor<'a> {
    pub fn new(options: PreprocessOptions, lut: Option<&'a Lut>) -> Self {
        Self { options, lut }
    }

    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Run the per-pixel stages on one color.
    pub fn apply(&self, color: Rgb) -> Rgb {
        let mut c = match self.lut {
            Some(lut) => lut.apply(color),
            None => color,
        };

        let opts = &self.options;
        if opts.posterizes() {
            c = Rgb::new(
                posterize_channel(c.r, opts.posterize),
                posterize_channel(c.g, opts.posterize),
                posterize_channel(c.b, opts.posterize),
            );
        }

        if !opts.has_adjustments() {
            return c;
        }

        let mut hsb = rgb_to_hsb(c.r, c.g, c.b);

        if opts.hue != 0.0 {
            hsb.h += opts.hue / 360.0;
        }
        if opts.saturation > 0.0 {
            hsb.s *= 1.0 + 0.25 * opts.saturation;
        }
        if opts.gamma > 0.0 {
            hsb.v = hsb.v.powf(1.0 + 0.2 * opts.gamma);
        }
        if opts.highlight > 0.0 && hsb.v > 0.5 {
            let t = ((hsb.v - 0.5) / 0.5 * (1.0 + 0.3 * opts.highlight)).clamp(0.0, 1.0);
            hsb.v = 0.5 + 0.5 * t;
        }

        hsb_to_rgb(hsb.h, hsb.s, hsb.v)
    }

    /// Sharpen the buffer, then run the per-pixel stages on every pixel.
    pub fn process<P: Pixel>(&self, pixels: &mut [P], width: usize, height: usize) {
        sharpen_buffer(pixels, width, height, self.options.sharpen);
        for p in pixels.iter_mut() {
            let c = self.apply(p.rgb());
            p.set_rgb(c);
        }
    }
}

/// Snap one channel to `levels` evenly spaced steps across `0..=255`.
///
/// `levels <= 1` returns the value unchanged.
pub fn posterize_channel(v: u8, levels: u8) -> u8 {
    if levels <= 1 {
        return v;
    }
    let scale = (levels - 1) as f32;
    let q = (v as f32 / 255.0 * scale).round() / scale;
    (q * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}
