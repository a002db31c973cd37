//! Block histograms and the basic-color distance table.

use crate::color::Rgb;
use crate::palette::{nearest_in, NUM_BASIC_COLORS};
use crate::pixel::Pixel;

/// Squared RGB distances between every pair of basic colors of one table.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    d2: [[u32; NUM_BASIC_COLORS]; NUM_BASIC_COLORS],
}

impl DistanceTable {
    pub fn new(table: &[Rgb]) -> Self {
        let mut d2 = [[0u32; NUM_BASIC_COLORS]; NUM_BASIC_COLORS];
        for (i, row) in d2.iter_mut().enumerate() {
            for (j, slot) in row.iter_mut().enumerate() {
                *slot = table[i].distance_squared(table[j]);
            }
        }
        Self { d2 }
    }

    #[inline]
    pub fn get(&self, a: usize, b: usize) -> u32 {
        self.d2[a][b]
    }

    /// Which member of `pair` index `k` is rendered as; ties go to the first.
    #[inline]
    pub fn closer(&self, k: usize, pair: (usize, usize)) -> usize {
        if self.d2[k][pair.0] <= self.d2[k][pair.1] {
            pair.0
        } else {
            pair.1
        }
    }

    /// Total squared error of rendering `hist` with only the two colors of
    /// `pair`.
    pub fn pair_error(&self, hist: &BlockHistogram, pair: (usize, usize)) -> u64 {
        hist.iter()
            .map(|(k, count)| {
                let d = self.d2[k][pair.0].min(self.d2[k][pair.1]);
                count as u64 * d as u64
            })
            .sum()
    }
}

/// Occurrence counts of the basic indices within a block or cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockHistogram {
    counts: [u32; NUM_BASIC_COLORS],
}

impl BlockHistogram {
    #[inline]
    pub fn add(&mut self, index: usize) {
        self.counts[index.min(NUM_BASIC_COLORS - 1)] += 1;
    }

    #[inline]
    pub fn count(&self, index: usize) -> u32 {
        self.counts[index]
    }

    /// `(index, count)` of every present index, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(k, &c)| (k, c))
    }

    /// Number of distinct indices present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Basic index of every pixel of a row segment, plus their histogram.
///
/// Indices are re-derived from the pixel color by nearest RGB match in the
/// active basic table.
pub fn classify<P: Pixel>(
    segment: &[P],
    table: &[Rgb],
    indices: &mut [usize],
) -> BlockHistogram {
    let mut hist = BlockHistogram::default();
    for (p, slot) in segment.iter().zip(indices.iter_mut()) {
        let idx = nearest_in(table, p.rgb()).min(NUM_BASIC_COLORS - 1);
        *slot = idx;
        hist.add(idx);
    }
    hist
}
