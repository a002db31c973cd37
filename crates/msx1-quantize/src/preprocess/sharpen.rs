//! 3x3 unsharp mask.

use crate::color::Rgb;
use crate::pixel::Pixel;

/// Gain applied to the detail signal at amount 1.0.
const DETAIL_GAIN: f32 = 1.5;

const KERNEL: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];

/// Sharpen the RGB channels of `pixels` in place.
///
/// The blur reads from a copy of the original buffer, so the result does
/// not depend on scan order. Neighbors outside the image are clamped to the
/// nearest edge pixel. `amount` is clamped to `[0, 1]`; zero leaves the
/// buffer untouched.
pub fn sharpen_buffer<P: Pixel>(pixels: &mut [P], width: usize, height: usize, amount: f32) {
    let amount = if amount.is_nan() {
        0.0
    } else {
        amount.clamp(0.0, 1.0)
    };
    if amount <= 0.0 || width == 0 || height == 0 || pixels.len() < width * height {
        return;
    }

    let source: Vec<Rgb> = pixels[..width * height].iter().map(|p| p.rgb()).collect();
    let gain = DETAIL_GAIN * amount;

    for y in 0..height {
        for x in 0..width {
            let blur = blur_at(&source, width, height, x, y);
            let src = source[y * width + x].to_bytes();
            let mut out = [0u8; 3];
            for c in 0..3 {
                let s = src[c] as f32;
                let v = s + (s - blur[c]) * gain;
                out[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            pixels[y * width + x].set_rgb(Rgb::from_bytes(out));
        }
    }
}

fn blur_at(source: &[Rgb], width: usize, height: usize, x: usize, y: usize) -> [f32; 3] {
    let mut sum = [0u32; 3];
    for (ky, row) in KERNEL.iter().enumerate() {
        let sy = (y + ky).saturating_sub(1).min(height - 1);
        for (kx, &weight) in row.iter().enumerate() {
            let sx = (x + kx).saturating_sub(1).min(width - 1);
            let p = source[sy * width + sx];
            sum[0] += p.r as u32 * weight;
            sum[1] += p.g as u32 * weight;
            sum[2] += p.b as u32 * weight;
        }
    }
    sum.map(|s| s as f32 / 16.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgba;

    #[test]
    fn test_zero_amount_is_noop() {
        let mut pixels: Vec<Rgb> = (0..64u8).map(|i| Rgb::new(i * 3, 255 - i, i)).collect();
        let before = pixels.clone();
        sharpen_buffer(&mut pixels, 8, 8, 0.0);
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_flat_image_unchanged() {
        let mut pixels = vec![Rgb::new(100, 150, 200); 25];
        sharpen_buffer(&mut pixels, 5, 5, 1.0);
        assert!(pixels.iter().all(|&p| p == Rgb::new(100, 150, 200)));
    }

    #[test]
    fn test_edge_contrast_increases() {
        // left half dark, right half light
        let mut pixels: Vec<Rgb> = (0..16)
            .map(|i| {
                if i % 4 < 2 {
                    Rgb::new(100, 100, 100)
                } else {
                    Rgb::new(150, 150, 150)
                }
            })
            .collect();
        sharpen_buffer(&mut pixels, 4, 4, 1.0);
        assert!(pixels[1].r < 100, "dark side of the edge should darken");
        assert!(pixels[2].r > 150, "light side of the edge should lighten");
        assert_eq!(pixels[0].r, pixels[4].r, "rows are independent of y");
    }

    #[test]
    fn test_alpha_preserved() {
        let mut pixels = vec![Rgba::new(0, 0, 0, 9), Rgba::new(255, 255, 255, 200)];
        sharpen_buffer(&mut pixels, 2, 1, 1.0);
        assert_eq!(pixels[0].a, 9);
        assert_eq!(pixels[1].a, 200);
        assert_eq!(pixels[0].r, 0);
        assert_eq!(pixels[1].r, 255);
    }

    #[test]
    fn test_single_pixel_image() {
        let mut pixels = vec![Rgb::new(1, 2, 3)];
        sharpen_buffer(&mut pixels, 1, 1, 1.0);
        assert_eq!(pixels[0], Rgb::new(1, 2, 3));
    }
}
