//! 256-entry lookup tables for pointwise channel functions.
//!
//! Any operation whose output channel value depends only on the input channel
//! value is precomputed into a table once per invocation and applied per
//! pixel, instead of re-running the formula `width * height * 3` times.
//! Tables are request-scoped; nothing here is cached across invocations.

use crate::core::{PixelBuffer, clamp_round};

/// Builds a table mapping every 8-bit input to `clamp_round(f(input))`.
pub fn build(f: impl Fn(u8) -> f64) -> [u8; 256] {
    let mut table = [0u8; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = clamp_round(f(i as u8));
    }
    table
}

/// Applies a table to the R, G and B channels of every pixel. Alpha is
/// passed through untouched.
pub fn apply(buffer: &mut PixelBuffer, table: &[u8; 256]) {
    for px in buffer.pixels_mut().chunks_exact_mut(4) {
        px[0] = table[px[0] as usize];
        px[1] = table[px[1] as usize];
        px[2] = table[px[2] as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_clamps_and_rounds() {
        let table = build(|v| f64::from(v) + 0.5);
        assert_eq!(table[0], 1); // 0.5 rounds away from zero
        assert_eq!(table[254], 255);
        assert_eq!(table[255], 255); // clamped
    }

    #[test]
    fn apply_skips_alpha() {
        let table = build(|v| f64::from(255 - v));
        let mut buf = PixelBuffer::from_raw(1, 1, vec![0, 100, 255, 42]).unwrap();
        apply(&mut buf, &table);
        assert_eq!(buf.pixels(), &[255, 155, 0, 42]);
    }
}
