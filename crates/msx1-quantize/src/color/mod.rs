//! Color types and conversion utilities
//!
//! Everything the quantizer stores is an 8-bit [`Rgb`] value. [`Hsb`] is the
//! working space for the preprocessing adjustments and for the weighted
//! HSB distance metric.
//!
//! # Example
//!
//! ```
//! use msx1_quantize::{Hsb, Rgb};
//!
//! let red = Rgb::new(255, 0, 0);
//! let hsb = Hsb::from(red);
//! assert_eq!(hsb.h, 0.0);
//! assert_eq!(Rgb::from(hsb), red);
//! ```

mod hsb;
mod rgb;

pub use hsb::{hsb_to_rgb, rgb_to_hsb, Hsb};
pub use rgb::Rgb;
