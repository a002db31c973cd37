//! Image preprocessing ahead of palette quantization.
//!
//! The MSX palette is tiny and harsh, so source images usually look better
//! after a little pushing before the nearest-color search. The pipeline:
//!
//! 1. **Sharpen** (buffer-wide) - 3x3 unsharp mask over the original pixels
//! 2. **LUT remap** - 1-D per-channel table or trilinear 3-D `.cube`
//! 3. **Posterize** - snap each channel to N evenly spaced levels
//! 4. **HSB adjustments** - hue rotation, saturation, gamma, highlight lift
//!
//! Stages 2-4 are strictly per pixel and are exposed as
//! [`Preprocessor::apply`]. Sharpening needs each pixel's neighborhood, so it
//! runs once over the whole buffer first ([`Preprocessor::process`]).
//!
//! # Example
//!
//! ```
//! use msx1_quantize::{PreprocessOptions, Preprocessor, Rgb};
//!
//! let options = PreprocessOptions::msx().sharpen(0.5);
//! let pre = Preprocessor::new(options, None);
//!
//! let mut pixels = vec![Rgb::new(90, 90, 90); 16];
//! pre.process(&mut pixels, 4, 4);
//! assert!(pixels.iter().all(|&p| p == pixels[0]));
//! ```

mod lut;
mod options;
mod preprocessor;
mod sharpen;

pub use lut::{Lut, Lut1d, Lut3d, LutError, MAX_CUBE_SIZE};
pub use options::PreprocessOptions;
pub use preprocessor::{posterize_channel, Preprocessor};
pub use sharpen::sharpen_buffer;
