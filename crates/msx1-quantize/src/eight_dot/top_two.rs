//! Basic1: keep the two most frequent basic indices of each block.

use super::histogram::{classify, DistanceTable};
use super::BLOCK_WIDTH;
use crate::color::Rgb;
use crate::pixel::Pixel;

/// Enforce two colors per block by basic-index frequency.
///
/// Every pixel of the block is rewritten with its (possibly reassigned)
/// basic color, which also snaps stray colors onto `table`.
pub fn apply_top_two<P: Pixel>(pixels: &mut [P], width: usize, height: usize, table: &[Rgb]) {
    if width == 0 {
        return;
    }
    let dist = DistanceTable::new(table);
    let mut indices = [0usize; BLOCK_WIDTH];

    for row in pixels.chunks_exact_mut(width).take(height) {
        for block in row.chunks_mut(BLOCK_WIDTH) {
            let hist = classify(block, table, &mut indices);

            let mut top1: Option<usize> = None;
            let mut top2: Option<usize> = None;
            for (k, count) in hist.iter() {
                if top1.map_or(true, |t| count > hist.count(t)) {
                    top2 = top1;
                    top1 = Some(k);
                } else if top2.map_or(true, |t| count > hist.count(t)) {
                    top2 = Some(k);
                }
            }
            let Some(top1) = top1 else {
                continue;
            };
            let pair = (top1, top2.unwrap_or(top1));

            for (p, &idx) in block.iter_mut().zip(indices.iter()) {
                let new_idx = if idx == pair.0 || idx == pair.1 {
                    idx
                } else {
                    dist.closer(idx, pair)
                };
                p.set_rgb(table[new_idx]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    fn basic() -> &'static [Rgb] {
        &PALETTE[..15]
    }

    #[test]
    fn test_collapses_to_top_two() {
        let t = basic();
        let mut row: Vec<Rgb> = [0, 0, 0, 1, 1, 2, 2, 2].iter().map(|&i| t[i]).collect();
        apply_top_two(&mut row, 8, 1, t);
        // 0 and 2 tie at three, 1 goes to light green
        let expected: Vec<Rgb> = [0, 0, 0, 2, 2, 2, 2, 2].iter().map(|&i| t[i]).collect();
        assert_eq!(row, expected);
    }

    #[test]
    fn test_count_tie_prefers_lower_index() {
        let t = basic();
        let mut row: Vec<Rgb> = [14, 14, 5, 5, 7, 7, 0, 0].iter().map(|&i| t[i]).collect();
        apply_top_two(&mut row, 8, 1, t);
        let present: std::collections::BTreeSet<_> = row.iter().map(|c| c.to_bytes()).collect();
        assert!(present.contains(&t[0].to_bytes()));
        assert!(present.contains(&t[5].to_bytes()));
        assert_eq!(present.len(), 2);
    }

    #[test]
    fn test_snaps_off_table_colors() {
        let t = basic();
        let mut row = vec![Rgb::new(3, 3, 3); 8];
        apply_top_two(&mut row, 8, 1, t);
        assert!(row.iter().all(|&c| c == t[0]));
    }
}
