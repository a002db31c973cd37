//! Static palette and dither-pattern tables
//!
//! Hardware color codes are 1-based (`1` = black, `15` = white); basic
//! indices are 0-based. The pattern constructors take hardware codes so the
//! table below can be checked against the chip documentation line by line.

use crate::color::Rgb;

/// Number of basic colors (hardware codes 1..=15, transparent excluded).
pub const NUM_BASIC_COLORS: usize = 15;

/// Number of low-luminance entries at the end of the extended palette.
pub const NUM_DARK_DITHER_COLORS: usize = 6;

/// Total number of entries in the extended palette.
pub const NUM_PALETTE_COLORS: usize = 95;

/// Index of the first low-luminance entry.
pub const FIRST_DARK_DITHER_INDEX: usize = NUM_PALETTE_COLORS - NUM_DARK_DITHER_COLORS;

/// A periodic tile of basic indices, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherPattern {
    cells: [u8; 8],
    width: u8,
    height: u8,
}

impl DitherPattern {
    const fn solid(index: u8) -> Self {
        Self {
            cells: [index, 0, 0, 0, 0, 0, 0, 0],
            width: 1,
            height: 1,
        }
    }

    /// Alternates two colors per scanline (1 wide, 2 high).
    const fn line(code_a: u8, code_b: u8) -> Self {
        let (a, b) = (code_a - 1, code_b - 1);
        Self {
            cells: [a, b, 0, 0, 0, 0, 0, 0],
            width: 1,
            height: 2,
        }
    }

    /// Sparse 2x4 tile: one pixel in four carries the second color.
    const fn dark(code_a: u8, code_b: u8) -> Self {
        let (a, b) = (code_a - 1, code_b - 1);
        Self {
            cells: [a, a, a, b, a, a, b, a],
            width: 2,
            height: 4,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// The `width * height` cells of the tile.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells[..self.width() * self.height()]
    }

    /// The distinct basic indices the tile is made of.
    pub fn components(&self) -> (u8, u8) {
        let cells = self.cells();
        let first = cells[0];
        let second = cells.iter().copied().find(|&c| c != first).unwrap_or(first);
        (first, second)
    }
}

/// The MSX1 basic colors followed by the pre-blended dither colors.
pub static PALETTE: [Rgb; NUM_PALETTE_COLORS] = [
    // basic
    Rgb::new(0, 0, 0),
    Rgb::new(62, 184, 73),
    Rgb::new(116, 208, 125),
    Rgb::new(89, 85, 224),
    Rgb::new(128, 118, 241),
    Rgb::new(185, 94, 81),
    Rgb::new(101, 219, 239),
    Rgb::new(219, 101, 89),
    Rgb::new(255, 137, 125),
    Rgb::new(204, 195, 94),
    Rgb::new(222, 208, 135),
    Rgb::new(58, 162, 65),
    Rgb::new(183, 102, 181),
    Rgb::new(204, 204, 204),
    Rgb::new(255, 255, 255),
    // line dither, black + x
    Rgb::new(44, 42, 112),
    Rgb::new(92, 47, 40),
    Rgb::new(50, 109, 119),
    Rgb::new(102, 97, 47),
    Rgb::new(29, 81, 32),
    Rgb::new(91, 51, 90),
    Rgb::new(102, 102, 102),
    Rgb::new(127, 127, 127),
    // green + x
    Rgb::new(89, 196, 99),
    Rgb::new(75, 134, 148),
    Rgb::new(95, 151, 157),
    Rgb::new(123, 139, 77),
    Rgb::new(81, 201, 156),
    Rgb::new(140, 142, 81),
    Rgb::new(158, 160, 99),
    Rgb::new(142, 196, 104),
    Rgb::new(122, 143, 127),
    Rgb::new(133, 194, 138),
    Rgb::new(158, 219, 164),
    // light green + x
    Rgb::new(102, 146, 174),
    Rgb::new(122, 163, 183),
    Rgb::new(150, 151, 103),
    Rgb::new(108, 213, 182),
    Rgb::new(167, 154, 107),
    Rgb::new(185, 172, 125),
    Rgb::new(160, 201, 109),
    Rgb::new(149, 155, 153),
    Rgb::new(160, 206, 164),
    Rgb::new(185, 231, 190),
    // dark blue + x
    Rgb::new(108, 101, 232),
    Rgb::new(137, 89, 152),
    Rgb::new(95, 152, 231),
    Rgb::new(154, 93, 156),
    Rgb::new(172, 111, 174),
    Rgb::new(146, 140, 159),
    Rgb::new(155, 146, 179),
    Rgb::new(73, 123, 144),
    Rgb::new(136, 93, 202),
    Rgb::new(146, 144, 214),
    Rgb::new(172, 170, 239),
    // light blue + x
    Rgb::new(156, 106, 161),
    Rgb::new(114, 168, 240),
    Rgb::new(173, 109, 165),
    Rgb::new(191, 127, 183),
    Rgb::new(166, 156, 167),
    Rgb::new(175, 163, 188),
    Rgb::new(93, 140, 153),
    Rgb::new(155, 110, 211),
    Rgb::new(166, 161, 222),
    Rgb::new(191, 186, 248),
    // dark red + x
    Rgb::new(143, 156, 160),
    Rgb::new(194, 144, 87),
    Rgb::new(203, 151, 108),
    Rgb::new(121, 128, 73),
    Rgb::new(184, 98, 131),
    Rgb::new(194, 149, 142),
    // bright pairs
    Rgb::new(160, 160, 164),
    Rgb::new(229, 225, 174),
    Rgb::new(219, 178, 218),
    Rgb::new(178, 237, 247),
    Rgb::new(255, 196, 190),
    Rgb::new(238, 232, 195),
    Rgb::new(213, 201, 114),
    Rgb::new(185, 232, 190),
    Rgb::new(108, 102, 232),
    Rgb::new(114, 169, 240),
    Rgb::new(229, 229, 229),
    // reds and yellows
    Rgb::new(211, 148, 91),
    Rgb::new(220, 154, 112),
    Rgb::new(229, 166, 109),
    Rgb::new(238, 172, 130),
    Rgb::new(220, 174, 168),
    Rgb::new(237, 178, 172),
    Rgb::new(238, 231, 195),
    // low luminance (2x4 dark dither)
    Rgb::new(46, 37, 22),
    Rgb::new(51, 46, 39),
    Rgb::new(47, 60, 28),
    Rgb::new(49, 40, 82),
    Rgb::new(46, 56, 60),
    Rgb::new(61, 34, 61),
];

/// The MSX2 rendition of the 15 basic colors (V9938 default palette).
pub static MSX2_BASIC: [Rgb; NUM_BASIC_COLORS] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x22, 0xDD, 0x22),
    Rgb::new(0x66, 0xFF, 0x66),
    Rgb::new(0x22, 0x22, 0xFF),
    Rgb::new(0x44, 0x66, 0xFF),
    Rgb::new(0xAA, 0x22, 0x22),
    Rgb::new(0x44, 0xDD, 0xFF),
    Rgb::new(0xFF, 0x22, 0x22),
    Rgb::new(0xFF, 0x66, 0x66),
    Rgb::new(0xDD, 0xDD, 0x22),
    Rgb::new(0xDD, 0xDD, 0x88),
    Rgb::new(0x22, 0x88, 0x22),
    Rgb::new(0xDD, 0x44, 0xAA),
    Rgb::new(0xAA, 0xAA, 0xAA),
    Rgb::new(0xFF, 0xFF, 0xFF),
];

use DitherPattern as P;

/// One tile per extended palette entry, in palette order.
pub static DITHER_PATTERNS: [DitherPattern; NUM_PALETTE_COLORS] = [
    P::solid(0),
    P::solid(1),
    P::solid(2),
    P::solid(3),
    P::solid(4),
    P::solid(5),
    P::solid(6),
    P::solid(7),
    P::solid(8),
    P::solid(9),
    P::solid(10),
    P::solid(11),
    P::solid(12),
    P::solid(13),
    P::solid(14),
    P::line(1, 4),
    P::line(1, 6),
    P::line(1, 7),
    P::line(1, 10),
    P::line(1, 12),
    P::line(1, 13),
    P::line(1, 14),
    P::line(1, 15),
    P::line(2, 3),
    P::line(2, 4),
    P::line(2, 5),
    P::line(2, 6),
    P::line(2, 7),
    P::line(2, 8),
    P::line(2, 9),
    P::line(2, 11),
    P::line(2, 13),
    P::line(2, 14),
    P::line(2, 15),
    P::line(3, 4),
    P::line(3, 5),
    P::line(3, 6),
    P::line(3, 7),
    P::line(3, 8),
    P::line(3, 9),
    P::line(3, 10),
    P::line(3, 13),
    P::line(3, 14),
    P::line(3, 15),
    P::line(4, 5),
    P::line(4, 6),
    P::line(4, 7),
    P::line(4, 8),
    P::line(4, 9),
    P::line(4, 10),
    P::line(4, 11),
    P::line(4, 12),
    P::line(4, 13),
    P::line(4, 14),
    P::line(4, 15),
    P::line(5, 6),
    P::line(5, 7),
    P::line(5, 8),
    P::line(5, 9),
    P::line(5, 10),
    P::line(5, 11),
    P::line(5, 12),
    P::line(5, 13),
    P::line(5, 14),
    P::line(5, 15),
    P::line(6, 7),
    P::line(6, 10),
    P::line(6, 11),
    P::line(6, 12),
    P::line(6, 13),
    P::line(6, 14),
    P::line(7, 8),
    P::line(10, 15),
    P::line(13, 15),
    P::line(7, 15),
    P::line(9, 15),
    P::line(11, 15),
    P::line(10, 11),
    P::line(3, 15),
    P::line(4, 5),
    P::line(5, 7),
    P::line(14, 15),
    P::line(8, 10),
    P::line(8, 11),
    P::line(9, 10),
    P::line(9, 11),
    P::line(6, 15),
    P::line(8, 15),
    P::line(11, 15),
    P::dark(1, 6),
    P::dark(1, 10),
    P::dark(1, 12),
    P::dark(1, 4),
    P::dark(1, 7),
    P::dark(1, 13),
];
