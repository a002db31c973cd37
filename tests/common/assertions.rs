//! Assertion helpers for tests.

use std::path::Path;

use msx1_quantize::{ColorSystem, PaletteCatalog};
use msx1pq::rendering::{decode_png, RgbaImage};

/// Assert the file exists and decodes as PNG
pub fn assert_png_file(path: &Path) -> RgbaImage {
    assert!(path.exists(), "Expected output file {}", path.display());
    let bytes = std::fs::read(path).expect("read output");
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG signature in {}, got {:?}",
        path.display(),
        &bytes[..8.min(bytes.len())]
    );
    decode_png(&bytes).expect("decode output PNG")
}

/// Assert every pixel is one of the basic colors of `system`
pub fn assert_basic_colors(image: &RgbaImage, system: ColorSystem) {
    let basic = PaletteCatalog::global().basic(system);
    for (i, p) in image.pixels.iter().enumerate() {
        let rgb = msx1_quantize::Pixel::rgb(p);
        assert!(
            basic.contains(&rgb),
            "Pixel {} is {}, not a {} basic color",
            i,
            rgb,
            system
        );
    }
}

/// Assert a BSAVE file has the expected header and total size
pub fn assert_bsave(path: &Path, end: u16, len: usize) -> Vec<u8> {
    let bytes = std::fs::read(path).expect("read output");
    let [el, eh] = end.to_le_bytes();
    assert_eq!(
        &bytes[..7],
        &[0xFE, 0x00, 0x00, el, eh, 0x00, 0x00],
        "BSAVE header of {}",
        path.display()
    );
    assert_eq!(bytes.len(), len, "size of {}", path.display());
    bytes
}
