//! Color family: pointwise remapping of R/G/B, alpha always preserved.

use crate::core::{PixelBuffer, clamp_round};

use super::lut;

/// Rec. 601 luma weights, shared by grayscale/saturation (and the
/// convolution and quantization families).
pub(crate) const LUMA_R: f64 = 0.299;
pub(crate) const LUMA_G: f64 = 0.587;
pub(crate) const LUMA_B: f64 = 0.114;

/// Converts to grayscale: every channel becomes the rounded luma.
pub fn grayscale(mut buffer: PixelBuffer) -> PixelBuffer {
    for px in buffer.pixels_mut().chunks_exact_mut(4) {
        let luma = clamp_round(
            LUMA_R * f64::from(px[0]) + LUMA_G * f64::from(px[1]) + LUMA_B * f64::from(px[2]),
        );
        px[0] = luma;
        px[1] = luma;
        px[2] = luma;
    }
    buffer
}

/// Inverts each color channel (`v -> 255 - v`).
pub fn invert(mut buffer: PixelBuffer) -> PixelBuffer {
    for px in buffer.pixels_mut().chunks_exact_mut(4) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
    buffer
}

/// Applies the fixed sepia matrix. Coefficients are all non-negative, so
/// only the upper clamp can fire.
pub fn sepia(mut buffer: PixelBuffer) -> PixelBuffer {
    for px in buffer.pixels_mut().chunks_exact_mut(4) {
        let (r, g, b) = (f64::from(px[0]), f64::from(px[1]), f64::from(px[2]));
        px[0] = clamp_round(0.393 * r + 0.769 * g + 0.189 * b);
        px[1] = clamp_round(0.349 * r + 0.686 * g + 0.168 * b);
        px[2] = clamp_round(0.272 * r + 0.534 * g + 0.131 * b);
    }
    buffer
}

/// Additive brightness shift: `factor` of -100..100 maps to -255..+255.
pub fn brightness(mut buffer: PixelBuffer, factor: f64) -> PixelBuffer {
    let shift = factor / 100.0 * 255.0;
    let table = lut::build(|v| f64::from(v) + shift);
    lut::apply(&mut buffer, &table);
    buffer
}

/// Contrast adjustment around the mid-gray point 128.
///
/// `factor` is clamped to the declared -100..100 range before use: the
/// formula has a singularity at 259 and the registry deliberately does not
/// enforce ranges at the boundary.
pub fn contrast(mut buffer: PixelBuffer, factor: f64) -> PixelBuffer {
    let amount = factor.clamp(-100.0, 100.0);
    let scale = (259.0 * (amount + 255.0)) / (255.0 * (259.0 - amount));
    let table = lut::build(|v| (f64::from(v) - 128.0) * scale + 128.0);
    lut::apply(&mut buffer, &table);
    buffer
}

/// Saturation adjustment: blends each channel against the pixel's unrounded
/// luma. `factor` 0 is the identity, -100 fully desaturates.
pub fn saturation(mut buffer: PixelBuffer, factor: f64) -> PixelBuffer {
    let scale = 1.0 + factor / 100.0;
    for px in buffer.pixels_mut().chunks_exact_mut(4) {
        let (r, g, b) = (f64::from(px[0]), f64::from(px[1]), f64::from(px[2]));
        let gray = LUMA_R * r + LUMA_G * g + LUMA_B * b;
        px[0] = clamp_round(gray + (r - gray) * scale);
        px[1] = clamp_round(gray + (g - gray) * scale);
        px[2] = clamp_round(gray + (b - gray) * scale);
    }
    buffer
}
