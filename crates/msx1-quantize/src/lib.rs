//! msx1-quantize: MSX1/MSX2 palette quantization
//!
//! Converts true-color images into pictures the TMS9918 family can show:
//! every pixel becomes one of the 15 basic colors, optionally through
//! ordered dither tiles, and optionally repaired so that each horizontal run
//! of 8 pixels holds at most two colors.
//!
//! # Quick Start
//!
//! The [`Quantizer`] builder is the primary entry point:
//!
//! ```
//! use msx1_quantize::{EightDotMode, PreprocessOptions, Quantizer, Rgba};
//!
//! let quantizer = Quantizer::new()
//!     .dark_dither(true)
//!     .preprocess(PreprocessOptions::msx())
//!     .eight_dot(EightDotMode::Best1);
//!
//! let mut pixels = vec![Rgba::new(180, 120, 60, 255); 16 * 16];
//! quantizer.quantize_image(&mut pixels, 16, 16).unwrap();
//! ```
//!
//! # Pipeline
//!
//! ```text
//! source pixel (any Pixel layout)
//!     |
//!     v
//! [Sharpen]              3x3 unsharp mask, whole buffer
//!     |
//!     v
//! [LUT] -> [Posterize] -> [HSB adjust]      per pixel
//!     |
//!     v
//! nearest color          RGB or weighted HSB, always against MSX1 colors
//!     |                  (95-entry palette when dithering, else 15)
//!     v
//! dither tile lookup     palette index + (x, y) -> basic index
//!     |
//!     v
//! basic color            MSX1 or MSX2 rendition
//!     |
//!     v
//! [8-dot solver]         at most two colors per 8-pixel block
//! ```
//!
//! # Modules
//!
//! - [`color`]: RGB and HSB values
//! - [`palette`]: the extended palette, dither tiles and nearest search
//! - [`preprocess`]: sharpen, LUT, posterize and HSB adjustments
//! - [`quantize`]: per-pixel quantization and its configuration
//! - [`eight_dot`]: the two-colors-per-block solvers
//! - [`api`]: the [`Quantizer`] builder, [`Region`] and [`QuantizeError`]

pub mod api;
pub mod color;
pub mod eight_dot;
pub mod palette;
pub mod pixel;
pub mod preprocess;
pub mod quantize;


pub use api::{QuantizeError, Quantizer, Region};
pub use color::{Hsb, Rgb};
pub use eight_dot::{EightDotMode, EightDotSolver};
pub use palette::{ColorSystem, HsbWeights, PaletteCatalog};
pub use pixel::{Bgra, Pixel, Rgba};
pub use preprocess::{Lut, LutError, PreprocessOptions, Preprocessor};
pub use quantize::{quantize_pixel, DistanceMetric, PixelQuantizer, QuantizeConfig, QuantizeMode};
