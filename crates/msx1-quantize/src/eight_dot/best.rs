//! Exhaustive pair search: Best1, AttrBest and PenaltyBest.
//!
//! For every block all pairs of present basic indices are scored and the
//! cheapest pair wins. The three variants differ only in the score:
//!
//! - **Best1**: block error
//! - **AttrBest**: block error + `ATTR_LAMBDA` x error of the whole
//!   attribute cell (the same 8-pixel column over `cell_height` rows)
//! - **PenaltyBest**: AttrBest + `TRANSITION_LAMBDA` x cost of switching
//!   away from the pair chosen for the block to the left

use super::histogram::{classify, BlockHistogram, DistanceTable};
use super::{ATTR_LAMBDA, BLOCK_WIDTH, TRANSITION_LAMBDA};
use crate::color::Rgb;
use crate::palette::nearest_in;
use crate::pixel::Pixel;

/// Transition cost when one member of the pair is shared, or the pair is
/// swapped.
pub const COST_SHARED: u32 = 3;

/// Transition cost when no member of the pair is shared.
pub const COST_DIFFERENT: u32 = 8;

/// Which terms make up the pair score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairScoring {
    Block,
    Cell,
    CellTransition,
}

impl PairScoring {
    fn uses_cell(self) -> bool {
        !matches!(self, PairScoring::Block)
    }
}

/// Cost of moving from the previous block's pair to `pair`.
///
/// # Example
/// ```
/// use msx1_quantize::eight_dot::transition_cost;
///
/// assert_eq!(transition_cost(None, (1, 4)), 0);
/// assert_eq!(transition_cost(Some((1, 4)), (1, 4)), 0);
/// assert_eq!(transition_cost(Some((1, 4)), (4, 1)), 3);
/// assert_eq!(transition_cost(Some((1, 4)), (4, 9)), 3);
/// assert_eq!(transition_cost(Some((1, 4)), (2, 9)), 8);
/// ```
pub fn transition_cost(prev: Option<(usize, usize)>, pair: (usize, usize)) -> u32 {
    let Some((pa, pb)) = prev else {
        return 0;
    };
    let (a, b) = pair;
    if a == pa && b == pb {
        0
    } else if a == pa || b == pb || a == pb || b == pa {
        COST_SHARED
    } else {
        COST_DIFFERENT
    }
}

/// Run one of the pair-search variants over the buffer.
pub fn apply_best<P: Pixel>(
    pixels: &mut [P],
    width: usize,
    height: usize,
    table: &[Rgb],
    scoring: PairScoring,
    cell_height: usize,
) {
    let pixels = super::clip(pixels, width, height);
    if pixels.is_empty() {
        return;
    }
    let dist = DistanceTable::new(table);
    let cell_height = cell_height.max(1);

    for cell in pixels.chunks_mut(width * cell_height) {
        let cell_hists = if scoring.uses_cell() {
            gather_cell(cell, width, table)
        } else {
            Vec::new()
        };

        for row in cell.chunks_exact_mut(width) {
            // pair chosen for the previous non-trivial block of this row
            row.chunks_mut(BLOCK_WIDTH)
                .enumerate()
                .fold(None, |prev, (bx, block)| {
                    let ctx = BlockContext {
                        table,
                        dist: &dist,
                        scoring,
                        cell: cell_hists.get(bx),
                        prev,
                    };
                    solve_block(block, &ctx).or(prev)
                });
        }
    }
}

/// Histogram of every block column over all rows of a cell, taken before
/// any row of the cell is rewritten.
fn gather_cell<P: Pixel>(cell: &[P], width: usize, table: &[Rgb]) -> Vec<BlockHistogram> {
    let columns = width.div_ceil(BLOCK_WIDTH);
    let mut hists = vec![BlockHistogram::default(); columns];
    for row in cell.chunks_exact(width) {
        for (hist, block) in hists.iter_mut().zip(row.chunks(BLOCK_WIDTH)) {
            for p in block {
                hist.add(nearest_in(table, p.rgb()));
            }
        }
    }
    hists
}

struct BlockContext<'a> {
    table: &'a [Rgb],
    dist: &'a DistanceTable,
    scoring: PairScoring,
    cell: Option<&'a BlockHistogram>,
    prev: Option<(usize, usize)>,
}

impl BlockContext<'_> {
    fn score(&self, hist: &BlockHistogram, pair: (usize, usize)) -> f64 {
        let mut score = self.dist.pair_error(hist, pair) as f64;
        if self.scoring.uses_cell() {
            if let Some(cell) = self.cell {
                score += ATTR_LAMBDA * self.dist.pair_error(cell, pair) as f64;
            }
        }
        if self.scoring == PairScoring::CellTransition {
            score += TRANSITION_LAMBDA * transition_cost(self.prev, pair) as f64;
        }
        score
    }
}

/// Pick and apply the best pair for one block. Returns `None` when the
/// block already has at most one color.
fn solve_block<P: Pixel>(block: &mut [P], ctx: &BlockContext<'_>) -> Option<(usize, usize)> {
    let mut indices = [0usize; BLOCK_WIDTH];
    let hist = classify(block, ctx.table, &mut indices);

    let present: Vec<usize> = hist.iter().map(|(k, _)| k).collect();
    if present.len() <= 1 {
        return None;
    }

    let mut best = (present[0], present[1]);
    let mut best_score = f64::INFINITY;
    for (i, &a) in present.iter().enumerate() {
        for &b in &present[i + 1..] {
            let score = ctx.score(&hist, (a, b));
            if score < best_score {
                best_score = score;
                best = (a, b);
            }
        }
    }

    for (p, &idx) in block.iter_mut().zip(indices.iter()) {
        p.set_rgb(ctx.table[ctx.dist.closer(idx, best)]);
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    fn basic() -> &'static [Rgb] {
        &PALETTE[..15]
    }

    fn row_of(indices: &[usize]) -> Vec<Rgb> {
        indices.iter().map(|&i| basic()[i]).collect()
    }

    #[test]
    fn test_best_pair_minimizes_error() {
        let mut row = row_of(&[0, 0, 0, 1, 1, 2, 2, 2]);
        apply_best(&mut row, 8, 1, basic(), PairScoring::Block, 8);
        assert_eq!(row, row_of(&[0, 0, 0, 2, 2, 2, 2, 2]));
    }

    #[test]
    fn test_single_color_block_untouched() {
        // off-table color stays as-is when the block has one index
        let mut row = vec![Rgb::new(2, 2, 2); 8];
        apply_best(&mut row, 8, 1, basic(), PairScoring::Block, 8);
        assert!(row.iter().all(|&c| c == Rgb::new(2, 2, 2)));
    }

    #[test]
    fn test_transition_cost_table() {
        assert_eq!(transition_cost(None, (0, 1)), 0);
        assert_eq!(transition_cost(Some((0, 1)), (0, 1)), 0);
        assert_eq!(transition_cost(Some((0, 1)), (1, 0)), COST_SHARED);
        assert_eq!(transition_cost(Some((0, 1)), (0, 5)), COST_SHARED);
        assert_eq!(transition_cost(Some((0, 1)), (5, 1)), COST_SHARED);
        assert_eq!(transition_cost(Some((0, 1)), (5, 6)), COST_DIFFERENT);
    }

    #[test]
    fn test_cell_term_breaks_near_tie() {
        // Row 0 alone: black/white vs black/gray is decided by the single
        // odd pixel. The rows below (all gray) tilt the cell towards gray.
        let t = basic();
        let mut pixels = row_of(&[0, 0, 0, 0, 14, 14, 14, 13]);
        for _ in 0..7 {
            pixels.extend(row_of(&[13; 8]));
        }
        let mut plain = pixels.clone();

        apply_best(&mut plain, 8, 8, t, PairScoring::Block, 8);
        apply_best(&mut pixels, 8, 8, t, PairScoring::Cell, 8);

        // block-only keeps black + white (gray pixel -> white)
        assert_eq!(&plain[..8], &row_of(&[0, 0, 0, 0, 14, 14, 14, 14])[..]);
        // with the cell term the pair becomes black + gray
        assert_eq!(&pixels[..8], &row_of(&[0, 0, 0, 0, 13, 13, 13, 13])[..]);
    }

    #[test]
    fn test_cell_histogram_is_taken_before_rewrite() {
        // Rows 0..6 hold two magenta pixels. Gray is absent from those
        // blocks, so magenta is rewritten to white, but in the original cell
        // magenta pulls the score towards gray. Row 7 is the near tie from
        // above: with the cell gathered up front it turns gray; a histogram
        // of the already rewritten rows would keep it white.
        let t = basic();
        let mut pixels = Vec::new();
        for _ in 0..7 {
            pixels.extend(row_of(&[0, 0, 0, 14, 14, 14, 12, 12]));
        }
        pixels.extend(row_of(&[0, 0, 0, 0, 14, 14, 14, 13]));
        let source = pixels.clone();

        apply_best(&mut pixels, 8, 8, t, PairScoring::Cell, 8);

        for row in pixels[..56].chunks_exact(8) {
            assert_eq!(row, &row_of(&[0, 0, 0, 14, 14, 14, 14, 14])[..]);
        }
        assert_eq!(&pixels[56..], &row_of(&[0, 0, 0, 0, 13, 13, 13, 13])[..]);

        // one block per row, so the transition term never applies
        let mut penalty = source.clone();
        apply_best(&mut penalty, 8, 8, t, PairScoring::CellTransition, 8);
        assert_eq!(penalty, pixels);

        // gathering from the rewritten rows instead gives white
        let mut rewritten = row_of(&[0, 0, 0, 14, 14, 14, 14, 14]).repeat(7);
        rewritten.extend(row_of(&[0, 0, 0, 0, 14, 14, 14, 13]));
        apply_best(&mut rewritten, 8, 8, t, PairScoring::Cell, 8);
        assert_eq!(&rewritten[56..], &row_of(&[0, 0, 0, 0, 14, 14, 14, 14])[..]);
    }

    #[test]
    fn test_penalty_follows_previous_pair() {
        // Second block: pairs (black, green) and (black, dark green) score
        // the same error. The first block settles on (dark green, white),
        // so the transition term favours keeping dark green.
        let t = basic();
        let source = row_of(&[11, 11, 11, 11, 14, 14, 14, 14, 0, 0, 1, 1, 1, 11, 11, 11]);

        let mut attr = source.clone();
        apply_best(&mut attr, 16, 1, t, PairScoring::Cell, 8);
        assert_eq!(&attr[..8], &source[..8]);
        assert_eq!(&attr[8..], &row_of(&[0, 0, 1, 1, 1, 1, 1, 1])[..]);

        let mut penalty = source.clone();
        apply_best(&mut penalty, 16, 1, t, PairScoring::CellTransition, 8);
        assert_eq!(&penalty[8..], &row_of(&[0, 0, 11, 11, 11, 11, 11, 11])[..]);
    }

    #[test]
    fn test_noop_block_does_not_reset_previous_pair() {
        // A flat black block sits between the two blocks of the previous
        // case; it must not clear the carried pair.
        let t = basic();
        let mut row = row_of(&[11, 11, 11, 11, 14, 14, 14, 14]);
        row.extend(row_of(&[0; 8]));
        row.extend(row_of(&[0, 0, 1, 1, 1, 11, 11, 11]));
        apply_best(&mut row, 24, 1, t, PairScoring::CellTransition, 8);
        assert_eq!(&row[16..], &row_of(&[0, 0, 11, 11, 11, 11, 11, 11])[..]);
    }
}
