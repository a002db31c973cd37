//! The "two colors per eight pixels" raster constraint.
//!
//! In the MSX1 graphics modes each horizontal run of 8 pixels carries one
//! pattern byte and one color byte: every pixel of the run shows either the
//! foreground or the background color. A freely quantized image breaks this
//! almost everywhere; the solvers in this module repair an already quantized
//! buffer in place so that every 8-pixel block holds at most two colors.
//!
//! Blocks start at `x = 0`; the last block of a row may be narrower than 8.
//! Except for [`EightDotMode::Fast1`], the solvers classify each pixel by its
//! nearest color in the active basic table, so they should run on output of
//! the pixel quantizer rather than on raw images.
//!
//! | Mode          | Pair selection                                   |
//! |---------------|--------------------------------------------------|
//! | `Fast1`       | two most frequent exact colors                   |
//! | `Basic1`      | two most frequent basic indices                  |
//! | `Best1`       | pair with the least squared error in the block   |
//! | `AttrBest`    | Best1 + error over the 8-row attribute cell      |
//! | `PenaltyBest` | AttrBest + cost of changing pair along the row   |
//!
//! # Example
//!
//! ```
//! use msx1_quantize::eight_dot::{EightDotMode, EightDotSolver};
//! use msx1_quantize::{ColorSystem, PaletteCatalog};
//!
//! let basic = PaletteCatalog::global().basic(ColorSystem::Msx1);
//! let mut row: Vec<_> = [0, 0, 0, 1, 1, 2, 2, 2].iter().map(|&i| basic[i]).collect();
//!
//! EightDotSolver::new(EightDotMode::Best1).apply(&mut row, 8, 1);
//! assert_eq!(row[3], basic[2]);
//! ```

mod best;
mod fast;
mod histogram;
mod top_two;

use std::fmt;
use std::str::FromStr;

pub use best::{transition_cost, COST_DIFFERENT, COST_SHARED};
pub use histogram::{BlockHistogram, DistanceTable};

use crate::palette::{ColorSystem, PaletteCatalog};
use crate::pixel::Pixel;
use best::{apply_best, PairScoring};
use fast::apply_fast;
use top_two::apply_top_two;

/// Pixels per block.
pub const BLOCK_WIDTH: usize = 8;

/// Default attribute cell height in rows.
pub const ATTR_CELL_HEIGHT: usize = 8;

/// Weight of the attribute cell error in AttrBest and PenaltyBest.
pub const ATTR_LAMBDA: f64 = 0.3;

/// Weight of the left-to-right transition cost in PenaltyBest.
pub const TRANSITION_LAMBDA: f64 = 1.0;

/// Which constraint solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EightDotMode {
    /// Leave the buffer alone
    #[default]
    None,
    Fast1,
    Basic1,
    Best1,
    AttrBest,
    PenaltyBest,
}

impl EightDotMode {
    /// All modes, in host code order.
    pub const ALL: [EightDotMode; 6] = [
        EightDotMode::None,
        EightDotMode::Fast1,
        EightDotMode::Basic1,
        EightDotMode::Best1,
        EightDotMode::AttrBest,
        EightDotMode::PenaltyBest,
    ];

    /// Map a 1-based host popup value. Anything out of range is `None`.
    ///
    /// # Example
    /// ```
    /// use msx1_quantize::eight_dot::EightDotMode;
    /// assert_eq!(EightDotMode::from_host_code(4), EightDotMode::Best1);
    /// assert_eq!(EightDotMode::from_host_code(0), EightDotMode::None);
    /// assert_eq!(EightDotMode::from_host_code(99), EightDotMode::None);
    /// ```
    pub fn from_host_code(code: i32) -> Self {
        match code {
            2 => EightDotMode::Fast1,
            3 => EightDotMode::Basic1,
            4 => EightDotMode::Best1,
            5 => EightDotMode::AttrBest,
            6 => EightDotMode::PenaltyBest,
            _ => EightDotMode::None,
        }
    }

    /// Lenient name lookup; unknown names select `None`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(EightDotMode::None)
    }

    /// Canonical command-line name.
    pub fn name(self) -> &'static str {
        match self {
            EightDotMode::None => "none",
            EightDotMode::Fast1 => "fast",
            EightDotMode::Basic1 => "basic",
            EightDotMode::Best1 => "best",
            EightDotMode::AttrBest => "best-attr",
            EightDotMode::PenaltyBest => "best-trans",
        }
    }

    pub fn is_none(self) -> bool {
        self == EightDotMode::None
    }

    /// Whether the score includes the attribute cell (AttrBest and
    /// PenaltyBest).
    pub fn uses_cells(self) -> bool {
        matches!(self, EightDotMode::AttrBest | EightDotMode::PenaltyBest)
    }
}

impl fmt::Display for EightDotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EightDotMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "none" | "off" => Ok(EightDotMode::None),
            "fast" | "fast1" => Ok(EightDotMode::Fast1),
            "basic" | "basic1" => Ok(EightDotMode::Basic1),
            "best" | "best1" => Ok(EightDotMode::Best1),
            "best-attr" | "attr-best" | "attr" => Ok(EightDotMode::AttrBest),
            "best-trans" | "penalty-best" | "penalty" => Ok(EightDotMode::PenaltyBest),
            _ => Err(format!(
                "unknown 8-dot mode '{}' (expected none, fast, basic, best, best-attr or best-trans)",
                s
            )),
        }
    }
}

/// Runs one [`EightDotMode`] against the basic table of a color system.
#[derive(Debug, Clone, Copy)]
pub struct EightDotSolver {
    mode: EightDotMode,
    color_system: ColorSystem,
    cell_height: usize,
}

impl EightDotSolver {
    pub fn new(mode: EightDotMode) -> Self {
        Self {
            mode,
            color_system: ColorSystem::Msx1,
            cell_height: ATTR_CELL_HEIGHT,
        }
    }

    #[inline]
    pub fn color_system(mut self, system: ColorSystem) -> Self {
        self.color_system = system;
        self
    }

    /// Set the attribute cell height used by AttrBest and PenaltyBest.
    ///
    /// Zero is treated as one.
    #[inline]
    pub fn cell_height(mut self, rows: usize) -> Self {
        self.cell_height = rows.max(1);
        self
    }

    pub fn mode(&self) -> EightDotMode {
        self.mode
    }

    /// Enforce the constraint on a row-major buffer of `width * height`
    /// pixels. Extra trailing pixels are ignored; a short buffer is
    /// processed up to its last complete row.
    pub fn apply<P: Pixel>(&self, pixels: &mut [P], width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        let table = PaletteCatalog::global().basic(self.color_system);
        tracing::debug!(
            mode = %self.mode,
            color_system = %self.color_system,
            width,
            height,
            "Applying 8-dot constraint"
        );

        match self.mode {
            EightDotMode::None => {}
            EightDotMode::Fast1 => apply_fast(pixels, width, height),
            EightDotMode::Basic1 => apply_top_two(pixels, width, height, table),
            EightDotMode::Best1 => {
                apply_best(pixels, width, height, table, PairScoring::Block, self.cell_height)
            }
            EightDotMode::AttrBest => {
                apply_best(pixels, width, height, table, PairScoring::Cell, self.cell_height)
            }
            EightDotMode::PenaltyBest => apply_best(
                pixels,
                width,
                height,
                table,
                PairScoring::CellTransition,
                self.cell_height,
            ),
        }
    }
}

/// Convenience wrapper around [`EightDotSolver`] with the default cell
/// height.
pub fn apply_eight_dot<P: Pixel>(
    pixels: &mut [P],
    width: usize,
    height: usize,
    mode: EightDotMode,
    color_system: ColorSystem,
) {
    EightDotSolver::new(mode)
        .color_system(color_system)
        .apply(pixels, width, height);
}

/// The complete rows of `pixels`, up to `height`.
fn clip<P>(pixels: &mut [P], width: usize, height: usize) -> &mut [P] {
    if width == 0 {
        return &mut pixels[..0];
    }
    let rows = height.min(pixels.len() / width);
    &mut pixels[..rows * width]
}
