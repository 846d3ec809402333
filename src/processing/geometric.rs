//! Geometric family: pixel rearrangement, alpha moves with its pixel.

use crate::core::PixelBuffer;

/// Mirrors the image left-to-right, in place.
pub fn flip_horizontal(mut buffer: PixelBuffer) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    for row in 0..height {
        let row_start = row * width;
        for col in 0..width / 2 {
            buffer.swap_pixels(row_start + col, row_start + width - 1 - col);
        }
    }
    buffer
}

/// Mirrors the image top-to-bottom by swapping whole rows, in place.
pub fn flip_vertical(mut buffer: PixelBuffer) -> PixelBuffer {
    let height = buffer.height() as usize;
    let row_bytes = buffer.width() as usize * 4;
    for row in 0..height / 2 {
        let top = row * row_bytes;
        let bottom = (height - 1 - row) * row_bytes;
        let (head, tail) = buffer.pixels_mut().split_at_mut(bottom);
        head[top..top + row_bytes].swap_with_slice(&mut tail[..row_bytes]);
    }
    buffer
}

/// Rotates 180 degrees by reversing the flat pixel sequence.
///
/// Algebraically identical to `flip_vertical(flip_horizontal(x))`.
pub fn rotate180(mut buffer: PixelBuffer) -> PixelBuffer {
    let n = buffer.num_pixels();
    for i in 0..n / 2 {
        buffer.swap_pixels(i, n - 1 - i);
    }
    buffer
}

/// Crops to a region given as percentages of the source dimensions.
///
/// Offsets and extents are floored to pixels, the start is clamped into the
/// image and the extent is clamped so the region is at least 1x1 and never
/// reads outside the source. The only operation that returns a buffer with
/// different dimensions than its input.
pub fn crop(
    buffer: PixelBuffer,
    x_pct: f64,
    y_pct: f64,
    width_pct: f64,
    height_pct: f64,
) -> PixelBuffer {
    let src_width = buffer.width() as i64;
    let src_height = buffer.height() as i64;

    let start_col = ((x_pct / 100.0) * src_width as f64).floor() as i64;
    let start_row = ((y_pct / 100.0) * src_height as f64).floor() as i64;
    let region_width = ((width_pct / 100.0) * src_width as f64).floor() as i64;
    let region_height = ((height_pct / 100.0) * src_height as f64).floor() as i64;

    let start_col = start_col.clamp(0, src_width - 1);
    let start_row = start_row.clamp(0, src_height - 1);
    let region_width = region_width.clamp(1, src_width - start_col);
    let region_height = region_height.clamp(1, src_height - start_row);

    let src_row_bytes = src_width as usize * 4;
    let dst_row_bytes = region_width as usize * 4;
    let mut dst = vec![0u8; dst_row_bytes * region_height as usize];

    for row in 0..region_height as usize {
        let src_off = (start_row as usize + row) * src_row_bytes + start_col as usize * 4;
        dst[row * dst_row_bytes..(row + 1) * dst_row_bytes]
            .copy_from_slice(&buffer.pixels()[src_off..src_off + dst_row_bytes]);
    }

    PixelBuffer::from_parts(region_width as u32, region_height as u32, dst)
}
