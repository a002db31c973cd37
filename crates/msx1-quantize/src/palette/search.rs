//! Brute-force nearest-color search
//!
//! All searches scan their range in ascending order and only replace the
//! current best on a strictly smaller distance, so ties resolve to the
//! lowest index.

use std::ops::Range;

use super::catalog::PaletteCatalog;
use super::tables::{NUM_BASIC_COLORS, NUM_PALETTE_COLORS, PALETTE};
use crate::color::{Hsb, Rgb};

/// Per-component weights of the HSB distance, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsbWeights {
    h: f32,
    s: f32,
    b: f32,
}

impl HsbWeights {
    /// Create weights; each component is clamped to `[0, 1]`.
    pub fn new(h: f32, s: f32, b: f32) -> Self {
        Self {
            h: clamp_weight(h),
            s: clamp_weight(s),
            b: clamp_weight(b),
        }
    }

    pub fn hue(&self) -> f32 {
        self.h
    }

    pub fn saturation(&self) -> f32 {
        self.s
    }

    pub fn brightness(&self) -> f32 {
        self.b
    }

    #[inline]
    fn distance(&self, dh: f32, ds: f32, dv: f32) -> f32 {
        self.h * dh * dh + self.s * ds * ds + self.b * dv * dv
    }
}

impl Default for HsbWeights {
    fn default() -> Self {
        Self::new(1.0, 0.5, 0.75)
    }
}

fn clamp_weight(w: f32) -> f32 {
    if w.is_nan() {
        0.0
    } else {
        w.clamp(0.0, 1.0)
    }
}

fn clamp_range(range: Range<usize>) -> Range<usize> {
    let end = range.end.min(NUM_PALETTE_COLORS);
    range.start.min(end)..end
}

/// Index of the entry of `table` nearest to `color` in RGB space.
///
/// Returns 0 for an empty table.
pub fn nearest_in(table: &[Rgb], color: Rgb) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, &entry) in table.iter().enumerate() {
        let d = color.distance_squared(entry);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

impl PaletteCatalog {
    /// Nearest extended palette entry in `range` by squared RGB distance.
    ///
    /// The range is clipped to the palette. An empty range yields its
    /// (clipped) start.
    pub fn nearest_rgb(&self, color: Rgb, range: Range<usize>) -> usize {
        let range = clamp_range(range);
        if range.is_empty() {
            return range.start.min(NUM_PALETTE_COLORS - 1);
        }
        range.start + nearest_in(&PALETTE[range.clone()], color)
    }

    /// Nearest extended palette entry in `range` by weighted HSB distance.
    ///
    /// Hue differences are taken as-is: a red near `h = 0.98` is far from
    /// a red at `h = 0.01`.
    pub fn nearest_hsb(&self, color: Rgb, weights: HsbWeights, range: Range<usize>) -> usize {
        let range = clamp_range(range);
        let target = Hsb::from(color);
        let mut best = range.start.min(NUM_PALETTE_COLORS - 1);
        let mut best_dist = f32::INFINITY;
        for i in range {
            let p = self.hsb(i);
            let d = weights.distance(target.h - p.h, target.s - p.s, target.v - p.v);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    /// Nearest basic color by weighted HSB distance with hue folded
    /// around the color wheel.
    pub fn nearest_basic_hsb(&self, color: Rgb, weights: HsbWeights) -> usize {
        let target = Hsb::from(color);
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for i in 0..NUM_BASIC_COLORS {
            let p = self.hsb(i);
            let mut dh = (target.h - p.h).abs();
            if dh > 0.5 {
                dh = 1.0 - dh;
            }
            let d = weights.distance(dh, target.s - p.s, target.v - p.v);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }
}
