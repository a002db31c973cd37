//! High-level entry points: the [`Quantizer`] builder, [`Region`] helpers
//! for hosts that render sub-rectangles, and the unified [`QuantizeError`].

mod builder;
mod error;
mod region;

pub use builder::Quantizer;
pub use error::QuantizeError;
pub use region::Region;
