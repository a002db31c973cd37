//! Quantizer configuration.

use std::fmt;
use std::str::FromStr;

use crate::eight_dot::EightDotMode;
use crate::palette::{ColorSystem, HsbWeights};
use crate::preprocess::{Lut, PreprocessOptions};

/// How palette distances are measured.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DistanceMetric {
    /// Squared Euclidean distance on 8-bit RGB
    #[default]
    Rgb,
    /// Weighted squared distance on HSB components
    Hsb(HsbWeights),
}

impl DistanceMetric {
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Rgb => "rgb",
            DistanceMetric::Hsb(_) => "hsb",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = String;

    /// Parses `rgb` or `hsb`; HSB uses the default weights.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(DistanceMetric::Rgb),
            "hsb" | "hsv" => Ok(DistanceMetric::Hsb(HsbWeights::default())),
            other => Err(format!("unknown distance metric '{}'", other)),
        }
    }
}

/// The per-pixel decision the quantizer makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeMode {
    /// Return the nearest extended palette entry itself (preview only)
    DirectPalette,
    /// Match against dither colors, then resolve through the dither tile
    Dithered,
    /// Match against the basic colors only
    Plain,
}

/// Everything the engine needs to quantize one image.
///
/// The config is a small `Copy` value. A LUT is borrowed, so a config can
/// never outlive the table it refers to.
///
/// # Example
///
/// ```
/// use msx1_quantize::{ColorSystem, EightDotMode, QuantizeConfig, QuantizeMode};
///
/// let config = QuantizeConfig::new()
///     .color_system(ColorSystem::Msx2)
///     .dither(false)
///     .eight_dot(EightDotMode::Basic1);
/// assert_eq!(config.mode(), QuantizeMode::Plain);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QuantizeConfig<'a> {
    pub color_system: ColorSystem,
    pub dither: bool,
    pub dark_dither: bool,
    pub direct_palette: bool,
    pub metric: DistanceMetric,
    pub preprocess: PreprocessOptions,
    pub lut: Option<&'a Lut>,
    pub eight_dot: EightDotMode,
}

impl Default for QuantizeConfig<'_> {
    fn default() -> Self {
        Self {
            color_system: ColorSystem::Msx1,
            dither: true,
            dark_dither: false,
            direct_palette: false,
            metric: DistanceMetric::Rgb,
            preprocess: PreprocessOptions::default(),
            lut: None,
            eight_dot: EightDotMode::None,
        }
    }
}

impl<'a> QuantizeConfig<'a> {
    /// Dithering on, everything else off.
    #[inline]
    pub fn new() -> Self {
        Self::default()
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

    /// Include the low-luminance 2x4 dither colors in the search.
    #[inline]
    pub fn dark_dither(mut self, enabled: bool) -> Self {
        self.dark_dither = enabled;
        self
    }

    /// Output extended palette colors as-is instead of basic colors.
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

    #[inline]
    pub fn preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    #[inline]
    pub fn lut(mut self, lut: Option<&'a Lut>) -> Self {
        self.lut = lut;
        self
    }

    #[inline]
    pub fn eight_dot(mut self, mode: EightDotMode) -> Self {
        self.eight_dot = mode;
        self
    }

    /// The per-pixel decision implied by the flags.
    pub fn mode(&self) -> QuantizeMode {
        if self.direct_palette {
            QuantizeMode::DirectPalette
        } else if self.dither {
            QuantizeMode::Dithered
        } else {
            QuantizeMode::Plain
        }
    }

    /// Whether the 8-dot solver pass runs after quantization.
    ///
    /// Direct-palette output holds non-basic colors, so the solver is
    /// skipped for it.
    pub fn runs_eight_dot(&self) -> bool {
        !self.eight_dot.is_none() && !self.direct_palette
    }
}
