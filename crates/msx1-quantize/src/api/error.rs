//! Unified error type for the public API.

use thiserror::Error;

use crate::preprocess::LutError;

/// Everything that can go wrong when driving a [`Quantizer`](crate::Quantizer).
///
/// # Example
///
/// ```
/// use msx1_quantize::{QuantizeError, Quantizer};
///
/// fn with_lut(path: &str) -> Result<Quantizer, QuantizeError> {
///     Ok(Quantizer::new().load_lut(path)?)
/// }
/// assert!(with_lut("/nonexistent/grade.cube").is_err());
/// ```
#[derive(Debug, Error)]
pub enum QuantizeError {
    /// The lookup table could not be loaded
    #[error("LUT error: {0}")]
    Lut(#[from] LutError),

    /// The pixel buffer holds fewer than `width * height` pixels
    #[error("pixel buffer too small: expected {expected} pixels, found {found}")]
    BufferTooSmall { expected: usize, found: usize },
}
