//! Fast1: keep the two most frequent exact colors of each block.

use super::BLOCK_WIDTH;
use crate::color::Rgb;
use crate::pixel::Pixel;

/// Enforce two colors per block by exact-color frequency.
///
/// Works on raw RGB values without consulting any palette, so it is safe to
/// run on buffers that hold colors outside the basic table.
pub fn apply_fast<P: Pixel>(pixels: &mut [P], width: usize, height: usize) {
    if width == 0 {
        return;
    }
    for row in pixels.chunks_exact_mut(width).take(height) {
        for block in row.chunks_mut(BLOCK_WIDTH) {
            fast_block(block);
        }
    }
}

fn fast_block<P: Pixel>(block: &mut [P]) {
    // (color, count) in first-seen order
    let mut buckets: Vec<(Rgb, u32)> = Vec::with_capacity(BLOCK_WIDTH);
    for p in block.iter() {
        let c = p.rgb();
        match buckets.iter_mut().find(|(color, _)| *color == c) {
            Some((_, count)) => *count += 1,
            None => buckets.push((c, 1)),
        }
    }
    if buckets.len() <= 1 {
        return;
    }

    let (mut top1, mut top2) = (0, 1);
    if buckets[1].1 > buckets[0].1 {
        std::mem::swap(&mut top1, &mut top2);
    }
    for (i, &(_, count)) in buckets.iter().enumerate().skip(2) {
        if count > buckets[top1].1 {
            top2 = top1;
            top1 = i;
        } else if count > buckets[top2].1 {
            top2 = i;
        }
    }

    let c1 = buckets[top1].0;
    let c2 = buckets[top2].0;
    for p in block.iter_mut() {
        let c = p.rgb();
        if c == c1 || c == c2 {
            continue;
        }
        if c.distance_squared(c1) <= c.distance_squared(c2) {
            p.set_rgb(c1);
        } else {
            p.set_rgb(c2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgb = Rgb::new(0, 0, 0);
    const B: Rgb = Rgb::new(255, 255, 255);
    const C: Rgb = Rgb::new(30, 30, 30);
    const D: Rgb = Rgb::new(240, 240, 240);

    #[test]
    fn test_majority_colors_survive() {
        let mut row = vec![A, A, A, B, B, B, C, D];
        apply_fast(&mut row, 8, 1);
        assert_eq!(row, vec![A, A, A, B, B, B, A, B]);
    }

    #[test]
    fn test_count_tie_keeps_earlier_bucket() {
        // A, C, B all appear twice or more; B and C tie for second place
        let mut row = vec![A, A, A, C, C, B, B, D];
        apply_fast(&mut row, 8, 1);
        // top1 = A, top2 = C (seen before B)
        assert_eq!(row, vec![A, A, A, C, C, C, C, C]);
    }

    #[test]
    fn test_two_colors_untouched() {
        let mut row = vec![A, B, A, B, B, A];
        let before = row.clone();
        apply_fast(&mut row, 6, 1);
        assert_eq!(row, before);
    }

    #[test]
    fn test_narrow_last_block() {
        let mut row = vec![A; 8];
        row.extend([B, C, D]);
        apply_fast(&mut row, 11, 1);
        assert_eq!(&row[..8], &[A; 8]);
        // all three tie at one; B and C are first seen, D goes to B
        assert_eq!(&row[8..], &[B, C, B]);
    }
}
