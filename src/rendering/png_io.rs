//! PNG decoding to 8-bit RGBA and optimized encoding.

use std::io::Cursor;

use msx1_quantize::Rgba;

use crate::error::ConvertError;

/// A decoded image as row-major RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgba>,
}

impl RgbaImage {
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Decode PNG bytes. Palette, grayscale and 16-bit images are normalized to
/// 8-bit RGBA; images without alpha get an opaque channel.
pub fn decode_png(data: &[u8]) -> Result<RgbaImage, ConvertError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];

    let pixels: Vec<Rgba> = match info.color_type {
        png::ColorType::Rgba => bytes
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect(),
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .map(|p| Rgba::new(p[0], p[1], p[2], 255))
            .collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .map(|p| Rgba::new(p[0], p[0], p[0], p[1]))
            .collect(),
        png::ColorType::Grayscale => bytes.iter().map(|&v| Rgba::new(v, v, v, 255)).collect(),
        png::ColorType::Indexed => {
            return Err(ConvertError::UnsupportedPng(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    let (width, height) = (info.width as usize, info.height as usize);
    if pixels.len() != width * height {
        return Err(ConvertError::UnsupportedPng(format!(
            "expected {} pixels, decoded {}",
            width * height,
            pixels.len()
        )));
    }
    Ok(RgbaImage::new(width, height, pixels))
}

/// Encode an RGBA image as PNG, re-compressed with oxipng.
///
/// Falls back to the plain encoding when optimization fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ConvertError> {
    let width = u32::try_from(image.width)
        .map_err(|_| ConvertError::PngEncode(format!("width {} too large", image.width)))?;
    let height = u32::try_from(image.height)
        .map_err(|_| ConvertError::PngEncode(format!("height {} too large", image.height)))?;

    let raw: Vec<u8> = image.pixels.iter().flat_map(|p| p.to_bytes()).collect();

    // Fast settings; oxipng re-compresses below
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&raw)
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    );
    match optimized {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::debug!(%e, "oxipng failed, keeping plain encoding");
            Ok(png_bytes)
        }
    }
}
