//! MSX VRAM images in BSAVE format.
//!
//! Both formats start with a 7-byte BSAVE header: `0xFE`, then start, end
//! and execution addresses as little-endian words.
//!
//! - **SCREEN5**: 256x212, two pixels per byte (high nibble first). Color
//!   code 0 is black, codes 1..=15 are the basic colors.
//! - **SCREEN2**: 256x192 in 8x8 tiles. The 16 KiB VRAM image holds the name
//!   table at `0x1800`, one pattern/color table pair per screen third, and
//!   one color byte (foreground high nibble) per 8-pixel row of a tile.

use msx1_quantize::palette::nearest_in;
use msx1_quantize::{ColorSystem, PaletteCatalog, Pixel, Rgb};

pub const SC5_WIDTH: usize = 256;
pub const SC5_HEIGHT: usize = 212;
pub const SC2_WIDTH: usize = 256;
pub const SC2_HEIGHT: usize = 192;

const SC2_VRAM_SIZE: usize = 0x4000;
const SC2_NAME_TABLE: usize = 0x1800;
const SC2_PATTERN_TABLES: [usize; 3] = [0x0000, 0x0800, 0x1000];
const SC2_COLOR_TABLES: [usize; 3] = [0x2000, 0x2800, 0x3000];
const TILE: usize = 8;

/// The 7-byte header written by BASIC's `BSAVE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BsaveHeader {
    pub start: u16,
    pub end: u16,
    pub exec: u16,
}

impl BsaveHeader {
    pub const MAGIC: u8 = 0xFE;

    pub const SC5: BsaveHeader = BsaveHeader {
        start: 0x0000,
        end: 0x6B00,
        exec: 0x0000,
    };

    pub const SC2: BsaveHeader = BsaveHeader {
        start: 0x0000,
        end: 0x3FFF,
        exec: 0x0000,
    };

    pub fn to_bytes(self) -> [u8; 7] {
        let [sl, sh] = self.start.to_le_bytes();
        let [el, eh] = self.end.to_le_bytes();
        let [xl, xh] = self.exec.to_le_bytes();
        [Self::MAGIC, sl, sh, el, eh, xl, xh]
    }
}

/// Encode a SCREEN5 file. Pixels outside the source image, and pixels
/// nearest to black, get color code 0.
pub fn encode_sc5<P: Pixel>(
    pixels: &[P],
    width: usize,
    height: usize,
    system: ColorSystem,
) -> Vec<u8> {
    let table = sc5_palette(system);
    let mut codes = vec![0u8; SC5_WIDTH * SC5_HEIGHT];
    for (y, row) in pixels
        .chunks_exact(width.max(1))
        .take(height.min(SC5_HEIGHT))
        .enumerate()
    {
        for (x, p) in row.iter().take(SC5_WIDTH).enumerate() {
            codes[y * SC5_WIDTH + x] = nearest_in(&table, p.rgb()) as u8;
        }
    }

    let mut out = Vec::with_capacity(7 + codes.len() / 2);
    out.extend_from_slice(&BsaveHeader::SC5.to_bytes());
    out.extend(codes.chunks_exact(2).map(|pair| (pair[0] << 4) | (pair[1] & 0x0F)));
    out
}

/// Black followed by the 15 basic colors of `system`.
fn sc5_palette(system: ColorSystem) -> [Rgb; 16] {
    let mut table = [Rgb::new(0, 0, 0); 16];
    table[1..].copy_from_slice(PaletteCatalog::global().basic(system));
    table
}

/// Encode a SCREEN2 file.
///
/// The image should already satisfy the two-colors-per-block constraint;
/// when a row of a tile has more colors, the largest and smallest codes
/// win and pixels of any other color go to the background. Pixels outside
/// the source image are black.
pub fn encode_sc2<P: Pixel>(
    pixels: &[P],
    width: usize,
    height: usize,
    system: ColorSystem,
) -> Vec<u8> {
    let table = PaletteCatalog::global().basic(system);
    let black = nearest_in(table, Rgb::new(0, 0, 0));

    // color code (1-based) of every screen pixel
    let mut codes = vec![black as u8 + 1; SC2_WIDTH * SC2_HEIGHT];
    for (y, row) in pixels
        .chunks_exact(width.max(1))
        .take(height.min(SC2_HEIGHT))
        .enumerate()
    {
        for (x, p) in row.iter().take(SC2_WIDTH).enumerate() {
            codes[y * SC2_WIDTH + x] = nearest_in(table, p.rgb()) as u8 + 1;
        }
    }

    let mut vram = vec![0u8; SC2_VRAM_SIZE];
    let tiles_x = SC2_WIDTH / TILE;
    for ty in 0..SC2_HEIGHT / TILE {
        let third = ty / 8;
        for tx in 0..tiles_x {
            let char_index = (ty % 8) * tiles_x + tx;
            vram[SC2_NAME_TABLE + ty * tiles_x + tx] = char_index as u8;

            for ry in 0..TILE {
                let start = (ty * TILE + ry) * SC2_WIDTH + tx * TILE;
                let row = &codes[start..start + TILE];
                let (pattern, color) = encode_sc2_row(row);

                let offset = char_index * TILE + ry;
                vram[SC2_PATTERN_TABLES[third] + offset] = pattern;
                vram[SC2_COLOR_TABLES[third] + offset] = color;
            }
        }
    }

    let mut out = Vec::with_capacity(7 + vram.len());
    out.extend_from_slice(&BsaveHeader::SC2.to_bytes());
    out.extend_from_slice(&vram);
    out
}

/// Pattern and color byte for 8 color codes: foreground is the larger
/// code, background the smaller.
fn encode_sc2_row(codes: &[u8]) -> (u8, u8) {
    let fg = codes.iter().copied().max().unwrap_or(1);
    let bg = codes.iter().copied().min().unwrap_or(1);
    let pattern = codes
        .iter()
        .fold(0u8, |acc, &c| (acc << 1) | u8::from(c == fg));
    (pattern, (fg << 4) | (bg & 0x0F))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(i: usize) -> Rgb {
        PaletteCatalog::global().basic(ColorSystem::Msx1)[i]
    }

    #[test]
    fn test_bsave_headers() {
        assert_eq!(
            BsaveHeader::SC5.to_bytes(),
            [0xFE, 0x00, 0x00, 0x00, 0x6B, 0x00, 0x00]
        );
        assert_eq!(
            BsaveHeader::SC2.to_bytes(),
            [0xFE, 0x00, 0x00, 0xFF, 0x3F, 0x00, 0x00]
        );
    }

    #[test]
    fn test_sc5_size_and_codes() {
        // white, dark red, black, white
        let pixels = vec![basic(14), basic(5), basic(0), basic(14)];
        let out = encode_sc5(&pixels, 4, 1, ColorSystem::Msx1);
        assert_eq!(out.len(), 7 + SC5_WIDTH * SC5_HEIGHT / 2);
        assert_eq!(out[7], 0xF6);
        assert_eq!(out[8], 0x0F);
        // padding
        assert_eq!(out[9], 0x00);
        assert!(out[7 + SC5_WIDTH / 2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_sc2_row_bytes() {
        // black (code 1) and white (code 15)
        let row = [1, 15, 15, 1, 1, 1, 15, 1];
        let (pattern, color) = encode_sc2_row(&row);
        assert_eq!(pattern, 0b0110_0010);
        assert_eq!(color, 0xF1);
    }

    #[test]
    fn test_sc2_single_color_row() {
        let (pattern, color) = encode_sc2_row(&[7; 8]);
        assert_eq!(pattern, 0xFF);
        assert_eq!(color, 0x77);
    }

    #[test]
    fn test_sc2_layout() {
        let mut pixels = vec![basic(0); 16 * 9];
        // tile (1, 0), first row: light green in the left half
        for x in 8..12 {
            pixels[x] = basic(2);
        }
        // tile (0, 1), first row: all white
        for x in 0..8 {
            pixels[8 * 16 + x] = basic(14);
        }
        let out = encode_sc2(&pixels, 16, 9, ColorSystem::Msx1);
        assert_eq!(out.len(), 7 + SC2_VRAM_SIZE);
        let vram = &out[7..];

        // name table is sequential within each third
        assert_eq!(vram[SC2_NAME_TABLE], 0);
        assert_eq!(vram[SC2_NAME_TABLE + 33], 33);
        assert_eq!(vram[SC2_NAME_TABLE + 256], 0);

        // char 1, row 0: light green (3) over black (1)
        assert_eq!(vram[8], 0b1111_0000);
        assert_eq!(vram[0x2000 + 8], 0x31);
        // char 32, row 0: white
        assert_eq!(vram[32 * 8], 0xFF);
        assert_eq!(vram[0x2000 + 32 * 8], 0xFF);
        // untouched tiles are black
        assert_eq!(vram[0x2000 + 5 * 8], 0x11);
        assert_eq!(vram[0x3000], 0x11);
    }
}
