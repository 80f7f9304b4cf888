//! Decoding to and encoding from [`PixelBuffer`].

use std::io::Cursor;

use chromavis_core::PixelBuffer;
use image::{DynamicImage, ExtendedColorType};
use tracing::debug;

use crate::error::CodecError;
use crate::format::OutputFormat;

/// A decoded image with its alpha plane kept apart from the RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// RGB pixels handed to the transform engine.
    pub pixels: PixelBuffer,
    /// One alpha sample per pixel, row-major. `None` when the source had no alpha.
    pub alpha: Option<Vec<u8>>,
}

impl DecodedImage {
    pub fn opaque(pixels: PixelBuffer) -> Self {
        Self {
            pixels,
            alpha: None,
        }
    }
}

/// Decode encoded image bytes into an RGB pixel buffer.
///
/// Any format the `image` crate recognizes by signature is accepted.
/// Grayscale expands to equal channels, higher bit depths are reduced to
/// 8 bits, and alpha is dropped.
pub fn decode(input: &[u8]) -> Result<PixelBuffer, CodecError> {
    let img = load(input)?;
    let rgb = img.into_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(PixelBuffer::from_rgb_bytes(width, height, rgb.as_raw())?)
}

/// Like [`decode`], but keeps the alpha plane when the source has one.
pub fn decode_with_alpha(input: &[u8]) -> Result<DecodedImage, CodecError> {
    let img = load(input)?;
    if !img.color().has_alpha() {
        let rgb = img.into_rgb8();
        let (width, height) = rgb.dimensions();
        return Ok(DecodedImage::opaque(PixelBuffer::from_rgb_bytes(
            width,
            height,
            rgb.as_raw(),
        )?));
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let count = width as usize * height as usize;
    let mut rgb = Vec::with_capacity(count * 3);
    let mut alpha = Vec::with_capacity(count);
    for px in rgba.as_raw().chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
        alpha.push(px[3]);
    }

    Ok(DecodedImage {
        pixels: PixelBuffer::from_rgb_bytes(width, height, &rgb)?,
        alpha: Some(alpha),
    })
}

/// Encode an RGB pixel buffer. Output is fully opaque.
///
/// Fails only if the encoder itself fails, e.g. on zero-sized buffers which
/// neither PNG nor BMP can represent.
pub fn encode(buffer: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    write(
        buffer.as_rgb_bytes(),
        buffer.width(),
        buffer.height(),
        ExtendedColorType::Rgb8,
        format,
    )
}

/// Encode with the alpha plane restored. Without alpha this is [`encode`].
pub fn encode_with_alpha(
    image: &DecodedImage,
    format: OutputFormat,
) -> Result<Vec<u8>, CodecError> {
    let Some(alpha) = &image.alpha else {
        return encode(&image.pixels, format);
    };

    let pixels = image.pixels.pixels();
    if alpha.len() != pixels.len() {
        return Err(CodecError::AlphaSizeMismatch {
            expected: pixels.len(),
            actual: alpha.len(),
        });
    }

    let mut rgba = Vec::with_capacity(pixels.len() * 4);
    for (px, &a) in pixels.iter().zip(alpha) {
        rgba.extend_from_slice(&[px.r, px.g, px.b, a]);
    }

    write(
        &rgba,
        image.pixels.width(),
        image.pixels.height(),
        ExtendedColorType::Rgba8,
        format,
    )
}

fn load(input: &[u8]) -> Result<DynamicImage, CodecError> {
    let img = image::load_from_memory(input).map_err(CodecError::Decode)?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );
    Ok(img)
}

fn write(
    raw: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
    format: OutputFormat,
) -> Result<Vec<u8>, CodecError> {
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(&mut out, raw, width, height, color, format.image_format())
        .map_err(CodecError::Encode)?;
    let bytes = out.into_inner();
    debug!(width, height, %format, len = bytes.len(), "encoded image");
    Ok(bytes)
}
