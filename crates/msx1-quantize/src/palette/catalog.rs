use std::sync::OnceLock;

use super::tables::{
    DitherPattern, DITHER_PATTERNS, FIRST_DARK_DITHER_INDEX, MSX2_BASIC, NUM_BASIC_COLORS,
    NUM_PALETTE_COLORS, PALETTE,
};
use super::ColorSystem;
use crate::color::{Hsb, Rgb};

static GLOBAL: OnceLock<PaletteCatalog> = OnceLock::new();

/// Read-only view of the palette tables plus a cached HSB rendition of
/// every extended palette entry.
///
/// The cache is computed in [`PaletteCatalog::new`]; there is no lazy state
/// after construction, so a catalog can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct PaletteCatalog {
    hsb: [Hsb; NUM_PALETTE_COLORS],
}

impl PaletteCatalog {
    pub fn new() -> Self {
        let mut hsb = [Hsb::default(); NUM_PALETTE_COLORS];
        for (slot, &color) in hsb.iter_mut().zip(PALETTE.iter()) {
            *slot = Hsb::from(color);
        }
        Self { hsb }
    }

    /// Process-wide catalog, built on first use.
    pub fn global() -> &'static PaletteCatalog {
        GLOBAL.get_or_init(PaletteCatalog::new)
    }

    /// The full extended palette (MSX1 reference colors).
    #[inline]
    pub fn palette(&self) -> &'static [Rgb; NUM_PALETTE_COLORS] {
        &PALETTE
    }

    /// The 15 basic colors as rendered by `system`.
    #[inline]
    pub fn basic(&self, system: ColorSystem) -> &'static [Rgb] {
        match system {
            ColorSystem::Msx1 => &PALETTE[..NUM_BASIC_COLORS],
            ColorSystem::Msx2 => &MSX2_BASIC,
        }
    }

    /// Cached HSB value of a palette entry (index clamped).
    #[inline]
    pub fn hsb(&self, index: usize) -> Hsb {
        self.hsb[index.min(NUM_PALETTE_COLORS - 1)]
    }

    /// Exclusive upper bound of the dither search range.
    #[inline]
    pub fn dither_upper_bound(&self, dark_dither: bool) -> usize {
        if dark_dither {
            NUM_PALETTE_COLORS
        } else {
            FIRST_DARK_DITHER_INDEX
        }
    }

    /// Dither tile of a palette entry, if the index is in range.
    #[inline]
    pub fn pattern(&self, index: usize) -> Option<&'static DitherPattern> {
        DITHER_PATTERNS.get(index)
    }

    /// Resolve a palette index to the basic index shown at pixel `(x, y)`.
    ///
    /// The index is clamped into the palette. Negative coordinates fold by
    /// absolute value, so a tile is mirrored rather than continued across
    /// the origin.
    ///
    /// # Example
    /// ```
    /// use msx1_quantize::PaletteCatalog;
    ///
    /// let catalog = PaletteCatalog::global();
    /// // entry 22 alternates black and white per scanline
    /// assert_eq!(catalog.palette_index_to_basic_index(22, 0, 0), 0);
    /// assert_eq!(catalog.palette_index_to_basic_index(22, 0, 1), 14);
    /// ```
    pub fn palette_index_to_basic_index(&self, index: i32, x: i32, y: i32) -> usize {
        let index = index.clamp(0, NUM_PALETTE_COLORS as i32 - 1) as usize;

        let pattern = match self.pattern(index) {
            Some(p) if p.width() > 0 && p.height() > 0 => p,
            _ => return index % NUM_BASIC_COLORS,
        };

        let dx = x.unsigned_abs() as usize % pattern.width();
        let dy = y.unsigned_abs() as usize % pattern.height();
        let basic = pattern.cells()[dy * pattern.width() + dx] as usize;
        basic.min(NUM_BASIC_COLORS - 1)
    }
}

impl Default for PaletteCatalog {
    fn default() -> Self {
        Self::new()
    }
}
