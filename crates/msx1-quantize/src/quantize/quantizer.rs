//! Single-pixel quantization.

use super::config::{DistanceMetric, QuantizeConfig, QuantizeMode};
use crate::color::Rgb;
use crate::palette::{PaletteCatalog, NUM_BASIC_COLORS, NUM_PALETTE_COLORS};

/// Maps one (already preprocessed) color to its output color.
///
/// Searches always run against the MSX1 reference palette. The resulting
/// basic index is then rendered with the configured color system, so MSX2
/// output is the same index map drawn with different inks.
#[derive(Debug, Clone, Copy)]
pub struct PixelQuantizer<'a> {
    catalog: &'a PaletteCatalog,
    config: QuantizeConfig<'a>,
}

impl<'a> PixelQuantizer<'a> {
    pub fn new(catalog: &'a PaletteCatalog, config: QuantizeConfig<'a>) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &QuantizeConfig<'a> {
        &self.config
    }

    /// Quantize the color of the pixel at `(x, y)`.
    ///
    /// The coordinate only matters in dithered mode, where it selects the
    /// cell of the dither tile.
    pub fn quantize(&self, color: Rgb, x: i32, y: i32) -> Rgb {
        match self.config.mode() {
            QuantizeMode::DirectPalette => {
                let idx = self.nearest(color, NUM_PALETTE_COLORS);
                self.catalog.palette()[idx]
            }
            QuantizeMode::Dithered => {
                let upper = self.catalog.dither_upper_bound(self.config.dark_dither);
                let idx = self.nearest(color, upper);
                let basic = self.catalog.palette_index_to_basic_index(idx as i32, x, y);
                self.basic_color(basic)
            }
            QuantizeMode::Plain => {
                let basic = match self.config.metric {
                    DistanceMetric::Rgb => self.catalog.nearest_rgb(color, 0..NUM_BASIC_COLORS),
                    DistanceMetric::Hsb(w) => self.catalog.nearest_basic_hsb(color, w),
                };
                self.basic_color(basic)
            }
        }
    }

    /// Basic index that [`PixelQuantizer::quantize`] renders at `(x, y)`.
    ///
    /// Not meaningful in direct-palette mode, where the result is the basic
    /// index the matched palette entry resolves to.
    pub fn basic_index(&self, color: Rgb, x: i32, y: i32) -> usize {
        match self.config.mode() {
            QuantizeMode::Plain => match self.config.metric {
                DistanceMetric::Rgb => self.catalog.nearest_rgb(color, 0..NUM_BASIC_COLORS),
                DistanceMetric::Hsb(w) => self.catalog.nearest_basic_hsb(color, w),
            },
            QuantizeMode::Dithered => {
                let upper = self.catalog.dither_upper_bound(self.config.dark_dither);
                let idx = self.nearest(color, upper);
                self.catalog.palette_index_to_basic_index(idx as i32, x, y)
            }
            QuantizeMode::DirectPalette => {
                let idx = self.nearest(color, NUM_PALETTE_COLORS);
                self.catalog.palette_index_to_basic_index(idx as i32, x, y)
            }
        }
    }

    /// Unfolded full-palette search over `[0, upper)`.
    fn nearest(&self, color: Rgb, upper: usize) -> usize {
        match self.config.metric {
            DistanceMetric::Rgb => self.catalog.nearest_rgb(color, 0..upper),
            DistanceMetric::Hsb(w) => self.catalog.nearest_hsb(color, w, 0..upper),
        }
    }

    #[inline]
    fn basic_color(&self, index: usize) -> Rgb {
        self.catalog.basic(self.config.color_system)[index.min(NUM_BASIC_COLORS - 1)]
    }
}

/// Quantize one color with the process-wide catalog.
///
/// # Example
/// ```
/// use msx1_quantize::{quantize_pixel, QuantizeConfig, Rgb};
///
/// let config = QuantizeConfig::new();
/// // mid gray is the black/white line dither
/// assert_eq!(quantize_pixel(&config, Rgb::new(127, 127, 127), 0, 0), Rgb::new(0, 0, 0));
/// assert_eq!(quantize_pixel(&config, Rgb::new(127, 127, 127), 0, 1), Rgb::new(255, 255, 255));
/// ```
pub fn quantize_pixel(config: &QuantizeConfig<'_>, color: Rgb, x: i32, y: i32) -> Rgb {
    PixelQuantizer::new(PaletteCatalog::global(), *config).quantize(color, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ColorSystem, HsbWeights, MSX2_BASIC, PALETTE};

    fn quantizer(config: QuantizeConfig<'static>) -> PixelQuantizer<'static> {
        PixelQuantizer::new(PaletteCatalog::global(), config)
    }

    #[test]
    fn test_plain_mode_returns_basic_color() {
        let q = quantizer(QuantizeConfig::new().dither(false));
        assert_eq!(q.quantize(Rgb::new(60, 180, 70), 5, 5), PALETTE[1]);
    }

    #[test]
    fn test_msx2_renders_same_index() {
        let q1 = quantizer(QuantizeConfig::new().dither(false));
        let q2 = quantizer(QuantizeConfig::new().dither(false).color_system(ColorSystem::Msx2));
        let probe = Rgb::new(200, 90, 80);
        let idx = q1.basic_index(probe, 0, 0);
        assert_eq!(q1.quantize(probe, 0, 0), PALETTE[idx]);
        assert_eq!(q2.quantize(probe, 0, 0), MSX2_BASIC[idx]);
    }

    #[test]
    fn test_direct_palette_returns_extended_entry() {
        let q = quantizer(QuantizeConfig::new().direct_palette(true));
        assert_eq!(q.quantize(Rgb::new(128, 128, 128), 0, 0), PALETTE[22]);
        // even with MSX2 selected, preview shows the MSX1 reference palette
        let q = quantizer(
            QuantizeConfig::new()
                .direct_palette(true)
                .color_system(ColorSystem::Msx2),
        );
        assert_eq!(q.quantize(PALETTE[60], 0, 0), PALETTE[60]);
    }

    #[test]
    fn test_dark_dither_widens_search() {
        let probe = PALETTE[89];
        let without = quantizer(QuantizeConfig::new());
        let with = quantizer(QuantizeConfig::new().dark_dither(true));

        // row 1, column 1 of the 2x4 tile carries the second color
        assert_eq!(with.quantize(probe, 1, 1), PALETTE[5]);
        assert_eq!(with.quantize(probe, 0, 0), PALETTE[0]);
        // without the dark colors the probe lands on a line dither
        let idx = without.basic_index(probe, 1, 1);
        assert!(idx < NUM_BASIC_COLORS);
    }

    #[test]
    fn test_hsb_plain_mode_uses_folded_search() {
        let w = HsbWeights::new(1.0, 0.0, 0.0);
        let q = quantizer(
            QuantizeConfig::new()
                .dither(false)
                .metric(DistanceMetric::Hsb(w)),
        );
        let probe = Rgb::new(255, 0, 40);
        let catalog = PaletteCatalog::global();
        assert_eq!(
            q.basic_index(probe, 0, 0),
            catalog.nearest_basic_hsb(probe, w)
        );
    }

    #[test]
    fn test_outputs_are_basic_colors() {
        let configs = [
            QuantizeConfig::new(),
            QuantizeConfig::new().dark_dither(true),
            QuantizeConfig::new().dither(false),
            QuantizeConfig::new().metric(DistanceMetric::Hsb(HsbWeights::default())),
            QuantizeConfig::new()
                .dither(false)
                .metric(DistanceMetric::Hsb(HsbWeights::default())),
        ];
        for config in configs {
            let q = quantizer(config);
            for i in 0..512u32 {
                let c = Rgb::new((i * 37) as u8, (i * 91) as u8, (i * 13) as u8);
                let out = q.quantize(c, i as i32 % 7, i as i32 % 5);
                assert!(PALETTE[..NUM_BASIC_COLORS].contains(&out), "{:?} -> {:?}", c, out);
            }
        }
    }
}
