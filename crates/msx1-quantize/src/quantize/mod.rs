//! Per-pixel palette quantization.
//!
//! [`QuantizeConfig`] captures every user setting; [`PixelQuantizer`] turns
//! one preprocessed color into the output color for a given pixel position.

mod config;
mod quantizer;

pub use config::{DistanceMetric, QuantizeConfig, QuantizeMode};
pub use quantizer::{quantize_pixel, PixelQuantizer};
