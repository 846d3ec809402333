//! The packed RGBA raster that every operation works on.

use crate::utils::{TransformError, TransformResult};

/// A packed 8-bit RGBA raster.
///
/// Pixels are laid out row-major, 4 bytes per pixel in R,G,B,A order, so
/// pixel `(row, col)` channel `c` lives at byte offset
/// `row * width * 4 + col * 4 + c`. The invariant
/// `pixels.len() == width * height * 4` holds for the whole lifetime of a
/// buffer; the only way to change dimensions is to build a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a buffer from a decoder's raw output, validating the length
    /// invariant.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> TransformResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TransformError::InvalidBuffer {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Internal constructor for operations that build a correctly-sized
    /// buffer themselves (crop).
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Byte offset of pixel `(row, col)`.
    #[inline]
    pub fn offset(&self, row: u32, col: u32) -> usize {
        (row as usize * self.width as usize + col as usize) * 4
    }

    /// Reads channel `ch` (0=R, 1=G, 2=B, 3=A) of pixel `(row, col)`.
    #[inline]
    pub fn channel(&self, row: u32, col: u32, ch: usize) -> u8 {
        self.pixels[self.offset(row, col) + ch]
    }

    /// Writes channel `ch` of pixel `(row, col)`.
    #[inline]
    pub fn set_channel(&mut self, row: u32, col: u32, ch: usize, value: u8) {
        let idx = self.offset(row, col) + ch;
        self.pixels[idx] = value;
    }

    /// Swaps two whole pixels (all four bytes) by flat pixel index.
    #[inline]
    pub fn swap_pixels(&mut self, a: usize, b: usize) {
        let (a, b) = (a * 4, b * 4);
        for ch in 0..4 {
            self.pixels.swap(a + ch, b + ch);
        }
    }
}

/// Rounds half-away-from-zero and clamps into the 8-bit range.
///
/// This is the write policy shared by all operations that compute fractional
/// channel values.
#[inline]
pub fn clamp_round(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_validates_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());

        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        match err {
            TransformError::InvalidBuffer {
                expected, actual, ..
            } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn channel_addressing_is_row_major_rgba() {
        let mut pixels = vec![0u8; 3 * 2 * 4];
        // Pixel (1, 2) green channel: 1*3*4 + 2*4 + 1 = 21
        pixels[21] = 42;
        let buf = PixelBuffer::from_raw(3, 2, pixels).unwrap();
        assert_eq!(buf.offset(1, 2), 20);
        assert_eq!(buf.channel(1, 2, 1), 42);
    }

    #[test]
    fn swap_pixels_moves_all_four_bytes() {
        let buf_pixels = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let mut buf = PixelBuffer::from_raw(2, 1, buf_pixels).unwrap();
        buf.swap_pixels(0, 1);
        assert_eq!(buf.pixels(), &[5, 6, 7, 8, 1, 2, 3, 4]);
    }

    #[test]
    fn clamp_round_rounds_half_away_from_zero() {
        assert_eq!(clamp_round(2.5), 3);
        assert_eq!(clamp_round(1.4), 1);
        assert_eq!(clamp_round(-0.5), 0);
        assert_eq!(clamp_round(255.6), 255);
        assert_eq!(clamp_round(300.0), 255);
    }
}
