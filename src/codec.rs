//! Decoder/encoder collaborators bridging container formats and raw RGBA.
//!
//! Decoding forces an alpha channel even for alpha-less source formats so
//! that every operation can assume 4 bytes per pixel. Output is always PNG
//! regardless of the input container.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::core::PixelBuffer;
use crate::utils::{TransformError, TransformResult};

/// Decodes encoded image bytes (PNG, JPEG, GIF, BMP, WebP, TIFF) into a
/// [`PixelBuffer`] with a forced alpha channel.
pub fn decode(bytes: &[u8]) -> TransformResult<PixelBuffer> {
    let decoded = image::load_from_memory(bytes).map_err(|e| TransformError::decode(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Encodes a [`PixelBuffer`] as PNG.
pub fn encode(buffer: &PixelBuffer) -> TransformResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            buffer.pixels(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| TransformError::encode(e.to_string()))?;
    Ok(out)
}
