//! Quantization family: reducing the value range per pixel.

use crate::core::PixelBuffer;

use super::color::{LUMA_B, LUMA_G, LUMA_R};
use super::lut;

/// Binary threshold: rounded luma at or above `value` becomes white,
/// everything else black. Alpha untouched.
pub fn threshold(mut buffer: PixelBuffer, value: f64) -> PixelBuffer {
    for px in buffer.pixels_mut().chunks_exact_mut(4) {
        let gray = (LUMA_R * f64::from(px[0]) + LUMA_G * f64::from(px[1])
            + LUMA_B * f64::from(px[2]))
        .round();
        let out = if gray >= value { 255 } else { 0 };
        px[0] = out;
        px[1] = out;
        px[2] = out;
    }
    buffer
}

/// Posterize: quantizes each channel to `levels` evenly spaced values via
/// `floor(v / step) * step` with `step = 255 / (levels - 1)`.
///
/// `levels` is clamped to the declared 2..16 range before use; 1 would
/// divide by zero.
pub fn posterize(mut buffer: PixelBuffer, levels: f64) -> PixelBuffer {
    let levels = levels.clamp(2.0, 16.0);
    let step = 255.0 / (levels - 1.0);
    let table = lut::build(|v| (f64::from(v) / step).floor() * step);
    lut::apply(&mut buffer, &table);
    buffer
}

/// Gamma correction: `out = 255 * (v / 255) ^ (1 / value)`.
///
/// `value` is clamped to the declared 0.1..3 range before use; 0 would
/// divide by zero in the exponent.
pub fn gamma(mut buffer: PixelBuffer, value: f64) -> PixelBuffer {
    let correction = 1.0 / value.clamp(0.1, 3.0);
    let table = lut::build(|v| 255.0 * (f64::from(v) / 255.0).powf(correction));
    lut::apply(&mut buffer, &table);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(pixels: Vec<u8>) -> PixelBuffer {
        let n = pixels.len() / 4;
        PixelBuffer::from_raw(n as u32, 1, pixels).unwrap()
    }

    #[test]
    fn threshold_output_is_binary() {
        let out = threshold(buf(vec![255, 0, 0, 9, 200, 200, 200, 9, 0, 0, 0, 9]), 128.0);
        for px in out.pixels().chunks_exact(4) {
            assert!(px[0] == 0 || px[0] == 255);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 9);
        }
        // Red luma 76 < 128, gray 200 >= 128
        assert_eq!(out.pixels()[0], 0);
        assert_eq!(out.pixels()[4], 255);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let out = threshold(buf(vec![128, 128, 128, 255]), 128.0);
        assert_eq!(out.pixels()[0], 255);
    }

    #[test]
    fn posterize_two_levels_is_black_or_white() {
        let out = posterize(buf(vec![0, 100, 254, 255, 255, 1, 128, 0]), 2.0);
        for px in out.pixels().chunks_exact(4) {
            for ch in 0..3 {
                assert!(px[ch] == 0 || px[ch] == 255);
            }
        }
        // Only a full 255 reaches the top step
        assert_eq!(out.pixels()[0], 0);
        assert_eq!(out.pixels()[2], 0);
        assert_eq!(out.pixels()[4], 255);
    }

    #[test]
    fn posterize_four_levels_uses_multiples_of_85() {
        let out = posterize(buf(vec![0, 90, 170, 255, 255, 84, 250, 0]), 4.0);
        assert_eq!(&out.pixels()[..3], &[0, 85, 170]);
        assert_eq!(&out.pixels()[4..7], &[255, 0, 170]);
    }

    #[test]
    fn degenerate_levels_are_clamped() {
        let one = posterize(buf(vec![10, 128, 250, 255]), 1.0);
        let two = posterize(buf(vec![10, 128, 250, 255]), 2.0);
        assert_eq!(one, two);
    }

    #[test]
    fn gamma_one_is_identity() {
        let original = buf(vec![0, 1, 127, 255, 254, 255, 64, 0]);
        assert_eq!(gamma(original.clone(), 1.0), original);
    }

    #[test]
    fn gamma_brightens_midtones_above_one() {
        let out = gamma(buf(vec![128, 128, 128, 255]), 2.0);
        // 255 * (128/255)^0.5 = 180.6 -> 181
        assert_eq!(out.pixels()[0], 181);
        assert_eq!(out.pixels()[3], 255);
    }

    #[test]
    fn gamma_zero_is_guarded() {
        let zero = gamma(buf(vec![5, 100, 200, 255]), 0.0);
        let min = gamma(buf(vec![5, 100, 200, 255]), 0.1);
        assert_eq!(zero, min);
    }
}
