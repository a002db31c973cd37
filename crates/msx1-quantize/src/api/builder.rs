//! Quantizer builder -- the primary entry point for the crate.
//!
//! [`Quantizer`] owns every setting (including a loaded LUT) and runs the
//! full pipeline: preprocess, per-pixel quantization, then the 8-dot pass.

use std::path::Path;

use super::error::QuantizeError;
use super::region::Region;
use crate::eight_dot::{EightDotMode, EightDotSolver, ATTR_CELL_HEIGHT};
use crate::palette::{ColorSystem, HsbWeights, PaletteCatalog};
use crate::pixel::Pixel;
use crate::preprocess::{Lut, LutError, PreprocessOptions, Preprocessor};
use crate::quantize::{DistanceMetric, PixelQuantizer, QuantizeConfig};

/// High-level MSX quantizer.
///
/// Configuration methods consume and return `self`; the quantize methods
/// take `&self`, so one builder can process any number of images.
///
/// # Example
///
/// ```
/// use msx1_quantize::{EightDotMode, PaletteCatalog, ColorSystem, Quantizer, Rgb};
///
/// let quantizer = Quantizer::new()
///     .dither(false)
///     .eight_dot(EightDotMode::Best1);
///
/// let mut pixels = vec![Rgb::new(200, 40, 40); 16 * 8];
/// quantizer.quantize_image(&mut pixels, 16, 8).unwrap();
///
/// let basic = PaletteCatalog::global().basic(ColorSystem::Msx1);
/// assert!(pixels.iter().all(|p| basic.contains(p)));
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    color_system: ColorSystem,
    dither: bool,
    dark_dither: bool,
    direct_palette: bool,
    metric: DistanceMetric,
    preprocess: PreprocessOptions,
    lut: Option<Lut>,
    eight_dot: EightDotMode,
    cell_height: usize,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Quantizer {
    /// Dithering on, RGB distance, no preprocessing, no 8-dot pass.
    pub fn new() -> Self {
        let config = QuantizeConfig::new();
        Self {
            color_system: config.color_system,
            dither: config.dither,
            dark_dither: config.dark_dither,
            direct_palette: config.direct_palette,
            metric: config.metric,
            preprocess: config.preprocess,
            lut: None,
            eight_dot: config.eight_dot,
            cell_height: ATTR_CELL_HEIGHT,
        }
    }

    #[inline]
    pub fn color_system(mut self, system: ColorSystem) -> Self {
        self.color_system = system;
        self
    }

    #[inline]
    pub fn dither(mut self, enabled: bool) -> Self {
        self.dither = enabled;
        self
    }

    #[inline]
    pub fn dark_dither(mut self, enabled: bool) -> Self {
        self.dark_dither = enabled;
        self
    }

    /// Emit extended palette colors directly (preview only; skips the 8-dot
    /// pass).
    #[inline]
    pub fn direct_palette(mut self, enabled: bool) -> Self {
        self.direct_palette = enabled;
        self
    }

    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Shorthand for `.metric(DistanceMetric::Hsb(weights))`.
    #[inline]
    pub fn hsb_weights(self, weights: HsbWeights) -> Self {
        self.metric(DistanceMetric::Hsb(weights))
    }

    #[inline]
    pub fn preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    #[inline]
    pub fn lut(mut self, lut: Option<Lut>) -> Self {
        self.lut = lut;
        self
    }

    /// Load a LUT file and install it. On error nothing is installed.
    pub fn load_lut(self, path: impl AsRef<Path>) -> Result<Self, LutError> {
        let lut = Lut::load(path)?;
        Ok(self.lut(Some(lut)))
    }

    #[inline]
    pub fn eight_dot(mut self, mode: EightDotMode) -> Self {
        self.eight_dot = mode;
        self
    }

    /// Attribute cell height for AttrBest and PenaltyBest (default 8).
    #[inline]
    pub fn cell_height(mut self, rows: usize) -> Self {
        self.cell_height = rows.max(1);
        self
    }

    /// The immutable per-image configuration, borrowing the installed LUT.
    pub fn config(&self) -> QuantizeConfig<'_> {
        QuantizeConfig::new()
            .color_system(self.color_system)
            .dither(self.dither)
            .dark_dither(self.dark_dither)
            .direct_palette(self.direct_palette)
            .metric(self.metric)
            .preprocess(self.preprocess)
            .lut(self.lut.as_ref())
            .eight_dot(self.eight_dot)
    }

    /// Quantize a row-major `width x height` image in place.
    ///
    /// Applies the full pipeline:
    /// 1. Preprocess (sharpen, LUT, posterize, HSB adjustments)
    /// 2. Quantize every pixel at its image coordinate
    /// 3. Enforce the 8-dot constraint, if a mode is selected
    pub fn quantize_image<P: Pixel>(
        &self,
        pixels: &mut [P],
        width: usize,
        height: usize,
    ) -> Result<(), QuantizeError> {
        let expected = width * height;
        if pixels.len() < expected {
            return Err(QuantizeError::BufferTooSmall {
                expected,
                found: pixels.len(),
            });
        }
        self.run(&mut pixels[..expected], width, height, (0, 0));
        Ok(())
    }

    /// Quantize the part of a `width x height` image covered by `region`.
    ///
    /// With dithering on, the region is first widened to 8-pixel block
    /// boundaries. AttrBest and PenaltyBest also widen it to whole attribute
    /// cells, vertically as well. Dither tiles are evaluated at image
    /// coordinates, so the result matches what [`Quantizer::quantize_image`]
    /// produces for those pixels, apart from sharpening, which sees only the
    /// region. Returns the region that was actually written.
    pub fn quantize_region<P: Pixel>(
        &self,
        pixels: &mut [P],
        width: usize,
        height: usize,
        region: Region,
    ) -> Result<Region, QuantizeError> {
        let expected = width * height;
        if pixels.len() < expected {
            return Err(QuantizeError::BufferTooSmall {
                expected,
                found: pixels.len(),
            });
        }

        let mut region = if self.dither {
            region.align_to_blocks(width, height)
        } else {
            region.clamp_to(width, height)
        };
        if self.config().runs_eight_dot() && self.eight_dot.uses_cells() {
            region = region
                .align_to_blocks(width, height)
                .align_to_cells(self.cell_height, width, height);
        }
        if region.is_empty() {
            return Ok(region);
        }

        let (left, top) = (region.left as usize, region.top as usize);
        let (w, h) = (region.width(), region.height());
        let mut scratch: Vec<P> = pixels
            .chunks_exact(width)
            .skip(top)
            .take(h)
            .flat_map(|row| row[left..left + w].iter().copied())
            .collect();

        self.run(&mut scratch, w, h, (region.left, region.top));

        for (dst, src) in pixels
            .chunks_exact_mut(width)
            .skip(top)
            .zip(scratch.chunks_exact(w))
        {
            dst[left..left + w].copy_from_slice(src);
        }
        Ok(region)
    }

    fn run<P: Pixel>(&self, pixels: &mut [P], width: usize, height: usize, origin: (i32, i32)) {
        if width == 0 || height == 0 {
            return;
        }
        let config = self.config();
        tracing::debug!(
            width,
            height,
            mode = ?config.mode(),
            metric = %config.metric,
            color_system = %config.color_system,
            eight_dot = %config.eight_dot,
            "Quantizing image"
        );

        if !config.preprocess.is_identity() || config.lut.is_some() {
            Preprocessor::new(config.preprocess, config.lut).process(pixels, width, height);
        }

        let quantizer = PixelQuantizer::new(PaletteCatalog::global(), config);
        for (y, row) in pixels.chunks_exact_mut(width).enumerate() {
            let gy = origin.1.saturating_add(y as i32);
            for (x, p) in row.iter_mut().enumerate() {
                let gx = origin.0.saturating_add(x as i32);
                p.set_rgb(quantizer.quantize(p.rgb(), gx, gy));
            }
        }

        if config.runs_eight_dot() {
            EightDotSolver::new(config.eight_dot)
                .color_system(config.color_system)
                .cell_height(self.cell_height)
                .apply(pixels, width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::{MSX2_BASIC, PALETTE};
    use crate::pixel::Rgba;

    #[test]
    fn test_buffer_too_small() {
        let mut pixels = vec![Rgb::default(); 10];
        let err = Quantizer::new().quantize_image(&mut pixels, 4, 4).unwrap_err();
        assert!(matches!(
            err,
            QuantizeError::BufferTooSmall {
                expected: 16,
                found: 10
            }
        ));
    }

    #[test]
    fn test_alpha_preserved() {
        let mut pixels = vec![Rgba::new(127, 127, 127, 42); 8 * 2];
        Quantizer::new().quantize_image(&mut pixels, 8, 2).unwrap();
        assert!(pixels.iter().all(|p| p.a == 42));
        // gray line dither: black row, then white row
        assert!(pixels[..8].iter().all(|p| p.rgb() == PALETTE[0]));
        assert!(pixels[8..].iter().all(|p| p.rgb() == PALETTE[14]));
    }

    #[test]
    fn test_msx2_output_uses_msx2_table() {
        let mut pixels = vec![Rgb::new(60, 180, 70); 8];
        Quantizer::new()
            .dither(false)
            .color_system(ColorSystem::Msx2)
            .quantize_image(&mut pixels, 8, 1)
            .unwrap();
        assert!(pixels.iter().all(|&p| p == MSX2_BASIC[1]));
    }

    #[test]
    fn test_region_matches_full_frame() {
        let source: Vec<Rgb> = (0..32 * 4)
            .map(|i| Rgb::new((i * 7) as u8, (i * 3) as u8, (i * 11) as u8))
            .collect();
        let q = Quantizer::new();

        let mut full = source.clone();
        q.quantize_image(&mut full, 32, 4).unwrap();

        let mut part = source.clone();
        let written = q
            .quantize_region(&mut part, 32, 4, Region::new(10, 1, 20, 3))
            .unwrap();
        assert_eq!(written, Region::new(8, 1, 24, 3));

        for y in 0..4 {
            for x in 0..32 {
                let i = y * 32 + x;
                let inside = (8..24).contains(&x) && (1..3).contains(&y);
                let expected = if inside { full[i] } else { source[i] };
                assert_eq!(part[i], expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_region_without_dither_is_not_aligned() {
        let mut pixels = vec![Rgb::new(10, 10, 10); 16];
        let written = Quantizer::new()
            .dither(false)
            .quantize_region(&mut pixels, 16, 1, Region::new(3, 0, 5, 1))
            .unwrap();
        assert_eq!(written, Region::new(3, 0, 5, 1));
        assert_eq!(pixels[2], Rgb::new(10, 10, 10));
        assert_eq!(pixels[3], PALETTE[0]);
    }

    #[test]
    fn test_region_covers_whole_attribute_cells() {
        let source: Vec<Rgb> = (0..24 * 20)
            .map(|i| {
                let (x, y) = (i % 24, i / 24);
                Rgb::new((x * 37 + y * 11) as u8, (x * 5 + y * 53) as u8, (x * 91 + y * 17) as u8)
            })
            .collect();

        for q in [
            Quantizer::new().dither(false).eight_dot(EightDotMode::AttrBest),
            Quantizer::new().eight_dot(EightDotMode::PenaltyBest),
        ] {
            let mut full = source.clone();
            q.quantize_image(&mut full, 24, 20).unwrap();

            let mut part = source.clone();
            let written = q
                .quantize_region(&mut part, 24, 20, Region::new(3, 5, 12, 11))
                .unwrap();
            assert_eq!(written, Region::new(0, 0, 16, 16));

            for y in 0..20 {
                for x in 0..24 {
                    let i = y * 24 + x;
                    let inside = x < 16 && y < 16;
                    let expected = if inside { full[i] } else { source[i] };
                    assert_eq!(part[i], expected, "pixel ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_region_cells_start_at_partial_last_cell() {
        let q = Quantizer::new().dither(false).eight_dot(EightDotMode::AttrBest);
        let mut pixels = vec![Rgb::new(10, 10, 10); 8 * 12];
        let written = q
            .quantize_region(&mut pixels, 8, 12, Region::new(0, 9, 8, 10))
            .unwrap();
        assert_eq!(written, Region::new(0, 8, 8, 12));
    }

    #[test]
    fn test_builder_is_reusable() {
        let q = Quantizer::new().eight_dot(EightDotMode::PenaltyBest);
        let mut a = vec![Rgb::new(90, 200, 120); 64];
        let mut b = a.clone();
        q.quantize_image(&mut a, 8, 8).unwrap();
        q.quantize_image(&mut b, 8, 8).unwrap();
        assert_eq!(a, b);
    }
}
