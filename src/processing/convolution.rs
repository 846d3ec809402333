//! Convolution family: neighborhood filters reading from an immutable
//! snapshot of the input.
//!
//! All three filters copy the pixel data before writing anything; convolving
//! in place over a buffer that is being overwritten would feed already
//! filtered values back into later neighborhoods.
//!
//! Border policy differs per filter: box blur shrinks its counted
//! neighborhood at the edges (unweighted mean over in-bounds neighbors),
//! while sharpen and edge detection skip border pixels entirely, leaving
//! them unmodified.

use crate::core::{PixelBuffer, clamp_round};

use super::color::{LUMA_B, LUMA_G, LUMA_R};

const SHARPEN_KERNEL: [i64; 9] = [0, -1, 0, -1, 5, -1, 0, -1, 0];

const SOBEL_X: [i64; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i64; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Box blur: averages R/G/B independently over a `(2*radius+1)^2` window,
/// counting only neighbors inside the image (variable denominator near the
/// edges). Alpha untouched.
///
/// Fractional radii are floored; negative radii degrade to 0 so the center
/// pixel always counts.
pub fn box_blur(mut buffer: PixelBuffer, radius: f64) -> PixelBuffer {
    let radius = radius.floor().max(0.0) as i64;
    let width = buffer.width() as i64;
    let height = buffer.height() as i64;
    let row_bytes = width as usize * 4;
    let original = buffer.pixels().to_vec();

    for row in 0..height {
        for col in 0..width {
            let mut sum_r = 0u64;
            let mut sum_g = 0u64;
            let mut sum_b = 0u64;
            let mut count = 0u64;

            for ky in -radius..=radius {
                let ny = row + ky;
                if ny < 0 || ny >= height {
                    continue;
                }
                for kx in -radius..=radius {
                    let nx = col + kx;
                    if nx < 0 || nx >= width {
                        continue;
                    }
                    let idx = ny as usize * row_bytes + nx as usize * 4;
                    sum_r += u64::from(original[idx]);
                    sum_g += u64::from(original[idx + 1]);
                    sum_b += u64::from(original[idx + 2]);
                    count += 1;
                }
            }

            let out = row as usize * row_bytes + col as usize * 4;
            let pixels = buffer.pixels_mut();
            pixels[out] = clamp_round(sum_r as f64 / count as f64);
            pixels[out + 1] = clamp_round(sum_g as f64 / count as f64);
            pixels[out + 2] = clamp_round(sum_b as f64 / count as f64);
        }
    }
    buffer
}

/// Sharpens interior pixels with the fixed 3x3 kernel
/// `[0,-1,0; -1,5,-1; 0,-1,0]`. Border pixels are left as-is.
pub fn sharpen(mut buffer: PixelBuffer) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let row_bytes = width * 4;
    let original = buffer.pixels().to_vec();

    for row in 1..height.saturating_sub(1) {
        for col in 1..width.saturating_sub(1) {
            let mut sum_r = 0i64;
            let mut sum_g = 0i64;
            let mut sum_b = 0i64;

            for ky in 0..3 {
                for kx in 0..3 {
                    let idx = (row + ky - 1) * row_bytes + (col + kx - 1) * 4;
                    let weight = SHARPEN_KERNEL[ky * 3 + kx];
                    sum_r += i64::from(original[idx]) * weight;
                    sum_g += i64::from(original[idx + 1]) * weight;
                    sum_b += i64::from(original[idx + 2]) * weight;
                }
            }

            let out = row * row_bytes + col * 4;
            let pixels = buffer.pixels_mut();
            pixels[out] = clamp_round(sum_r as f64);
            pixels[out + 1] = clamp_round(sum_g as f64);
            pixels[out + 2] = clamp_round(sum_b as f64);
        }
    }
    buffer
}

/// Sobel edge detection on interior pixels: per-neighbor rounded luma feeds
/// the X/Y kernels, the gradient magnitude becomes a grayscale edge map.
/// Border pixels are left as-is.
pub fn edge_detect(mut buffer: PixelBuffer) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let row_bytes = width * 4;
    let original = buffer.pixels().to_vec();

    for row in 1..height.saturating_sub(1) {
        for col in 1..width.saturating_sub(1) {
            let mut gx = 0i64;
            let mut gy = 0i64;

            for ky in 0..3 {
                for kx in 0..3 {
                    let idx = (row + ky - 1) * row_bytes + (col + kx - 1) * 4;
                    let gray = (LUMA_R * f64::from(original[idx])
                        + LUMA_G * f64::from(original[idx + 1])
                        + LUMA_B * f64::from(original[idx + 2]))
                    .round() as i64;
                    gx += gray * SOBEL_X[ky * 3 + kx];
                    gy += gray * SOBEL_Y[ky * 3 + kx];
                }
            }

            let magnitude = clamp_round(((gx * gx + gy * gy) as f64).sqrt());
            let out = row * row_bytes + col * 4;
            let pixels = buffer.pixels_mut();
            pixels[out] = magnitude;
            pixels[out + 1] = magnitude;
            pixels[out + 2] = magnitude;
        }
    }
    buffer
}
