//! Palette tables, dither patterns and nearest-color search
//!
//! The extended palette has 95 entries:
//!
//! - `[0, 15)`: the basic colors the video chip can actually display
//! - `[15, 89)`: line-dither colors, the visual average of two basic colors
//!   alternating per scanline
//! - `[89, 95)`: dark-dither colors, a sparse 2x4 tile of black and one
//!   other basic color
//!
//! Non-basic entries are only ever search targets. Once a pixel has matched
//! one of them, [`PaletteCatalog::palette_index_to_basic_index`] resolves the
//! match to a displayable basic color through the entry's [`DitherPattern`].

mod catalog;
mod search;
mod tables;

use std::fmt;
use std::str::FromStr;

pub use catalog::PaletteCatalog;
pub use search::{nearest_in, HsbWeights};
pub use tables::{
    DitherPattern, DITHER_PATTERNS, FIRST_DARK_DITHER_INDEX, MSX2_BASIC, NUM_BASIC_COLORS,
    NUM_DARK_DITHER_COLORS, NUM_PALETTE_COLORS, PALETTE,
};

/// Which rendition of the 15 basic colors is written to the output.
///
/// Searches always run against the MSX1 reference colors; the color system
/// only decides how the resulting basic index is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ColorSystem {
    /// TMS9918 colors
    #[default]
    Msx1,
    /// V9938 default palette
    Msx2,
}

impl ColorSystem {
    pub fn name(self) -> &'static str {
        match self {
            ColorSystem::Msx1 => "msx1",
            ColorSystem::Msx2 => "msx2",
        }
    }
}

impl fmt::Display for ColorSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "msx1" | "msx" => Ok(ColorSystem::Msx1),
            "msx2" => Ok(ColorSystem::Msx2),
            other => Err(format!("unknown color system '{}'", other)),
        }
    }
}
