//! Test fixtures: synthetic PNG images and preset files.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Encode raw RGBA bytes as a PNG.
pub fn png_bytes(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(rgba).expect("PNG data");
    }
    buf
}

/// A horizontal color gradient with full alpha.
pub fn gradient_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
                255,
            ]);
        }
    }
    data
}

/// Reproducible noise with varying alpha.
pub fn noise_rgba(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height * 4).map(|_| rng.gen()).collect()
}

/// Write a gradient PNG to `dir/name` and return its path.
pub fn write_gradient_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(width, height, &gradient_rgba(width, height)))
        .expect("write fixture");
    path
}

/// Write arbitrary bytes to `dir/name` and return its path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// A 1-D LUT that inverts every channel.
pub fn invert_lut_text() -> String {
    (0..256)
        .map(|i| format!("{0} {0} {0}\n", 255 - i))
        .collect()
}
