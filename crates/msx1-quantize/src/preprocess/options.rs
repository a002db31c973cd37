//! Preprocessing options and configuration.
//!
//! This module provides the [`PreprocessOptions`] struct for configuring the
//! per-pixel adjustments applied before quantization.

/// Configuration options for the preprocessing chain.
///
/// Every stage is controlled by a single amount. Amounts at or below zero
/// switch the stage off; the hue rotation is active whenever it is non-zero.
///
/// # Defaults
///
/// The default configuration is the identity: nothing is changed. The
/// [`PreprocessOptions::msx()`] preset matches the converter's default
/// look (16-level posterize, full saturation/gamma/highlight boost).
///
/// # Example
///
/// ```
/// use msx1_quantize::PreprocessOptions;
///
/// let options = PreprocessOptions::new()
///     .posterize(8)
///     .saturation(0.5)
///     .hue(-15.0);
/// assert_eq!(options.posterize, 8);
/// assert!(options.has_adjustments());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessOptions {
    /// Number of evenly spaced levels per channel, clamped to `[0, 255]`.
    ///
    /// Values of 0 and 1 disable posterization.
    pub posterize: u8,

    /// Saturation boost amount in `[0, 1]`; scales S by up to 1.25.
    pub saturation: f32,

    /// Gamma amount in `[0, 1]`; raises V to a power of up to 1.2.
    pub gamma: f32,

    /// Highlight amount in `[0, 1]`; stretches the upper half of V by up
    /// to 1.3.
    pub highlight: f32,

    /// Hue rotation in degrees.
    pub hue: f32,

    /// Unsharp-mask amount, clamped to `[0, 1]`.
    ///
    /// Sharpening needs the pixel neighborhood and therefore runs over the
    /// whole buffer before the per-pixel stages.
    pub sharpen: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            posterize: 0,
            saturation: 0.0,
            gamma: 0.0,
            highlight: 0.0,
            hue: 0.0,
            sharpen: 0.0,
        }
    }
}

impl PreprocessOptions {
    /// Create options that leave pixels untouched.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`PreprocessOptions::new()`], for call sites that switch
    /// preprocessing off.
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    /// The converter's default look.
    pub fn msx() -> Self {
        Self {
            posterize: 16,
            saturation: 1.0,
            gamma: 1.0,
            highlight: 1.0,
            hue: 0.0,
            sharpen: 0.0,
        }
    }

    #[inline]
    pub fn posterize(mut self, levels: u32) -> Self {
        self.posterize = levels.min(255) as u8;
        self
    }

    #[inline]
    pub fn saturation(mut self, amount: f32) -> Self {
        self.saturation = amount;
        self
    }

    #[inline]
    pub fn gamma(mut self, amount: f32) -> Self {
        self.gamma = amount;
        self
    }

    #[inline]
    pub fn highlight(mut self, amount: f32) -> Self {
        self.highlight = amount;
        self
    }

    /// Set hue rotation in degrees (positive turns red towards yellow).
    #[inline]
    pub fn hue(mut self, degrees: f32) -> Self {
        self.hue = degrees;
        self
    }

    /// Set sharpen amount; clamped to `[0, 1]`.
    #[inline]
    pub fn sharpen(mut self, amount: f32) -> Self {
        self.sharpen = if amount.is_nan() {
            0.0
        } else {
            amount.clamp(0.0, 1.0)
        };
        self
    }

    /// Whether posterization is active.
    #[inline]
    pub fn posterizes(&self) -> bool {
        self.posterize > 1
    }

    /// Whether any HSB-space adjustment is active.
    #[inline]
    pub fn has_adjustments(&self) -> bool {
        self.saturation > 0.0 || self.gamma > 0.0 || self.highlight > 0.0 || self.hue != 0.0
    }

    /// Whether the options change nothing at all.
    pub fn is_identity(&self) -> bool {
        !self.posterizes() && !self.has_adjustments() && self.sharpen <= 0.0
    }
}
