//! Snapshot extraction for renderers, and mask import for seeding.

use super::field::Field;
use super::grid::{clamp_span, index_of};
use crate::state::State;

/// Copy the current automaton row (0/1 bytes) into `out_buf`.
///
/// # Returns
/// Number of bytes written, or 0 if the buffer is too small.
pub fn extract_row(state: &State, out_buf: &mut [u8]) -> u64 {
    let len = state.cells.len();
    if out_buf.len() < len {
        return 0;
    }
    out_buf[..len].copy_from_slice(&state.cells);
    len as u64
}

/// Map one cell to RGB: `c = clamp((a-b)*255)`, then `(c, 0.5c + 255b, 255b)`.
#[inline]
pub fn cell_color(a: f32, b: f32) -> [u8; 3] {
    let c = ((a - b) * 255.0).clamp(0.0, 255.0);
    let green = 0.5 * c + 255.0 * b;
    let blue = 255.0 * b;
    [c.round() as u8, green.round() as u8, blue.round() as u8]
}

/// Extract a rectangular region of the field as RGB triplets.
///
/// # Layout
/// The buffer is filled in y,x order (y changes slowest), 3 bytes per cell.
/// Coordinates are clamped to the field; `max` bounds are exclusive.
///
/// # Returns
/// Number of bytes written to the buffer, or 0 on error.
pub fn extract_rgb_region(
    field: &Field,
    out_buf: &mut [u8],
    min_x: i16,
    min_y: i16,
    max_x: i16,
    max_y: i16,
) -> u64 {
    let (min_x, max_x) = clamp_span(min_x, max_x, field.width);
    let (min_y, max_y) = clamp_span(min_y, max_y, field.height);

    // Check for empty region
    if min_x >= max_x || min_y >= max_y {
        return 0;
    }

    let total_size = (max_x - min_x) as usize * (max_y - min_y) as usize * 3;
    if out_buf.len() < total_size {
        return 0;
    }

    let a = field.a.live();
    let b = field.b.live();
    let mut offset = 0;
    for y in min_y..max_y {
        for x in min_x..max_x {
            let idx = index_of(field.width, x, y);
            out_buf[offset..offset + 3].copy_from_slice(&cell_color(a[idx], b[idx]));
            offset += 3;
        }
    }

    offset as u64
}

/// Import a seeding mask into a rectangular region of the field.
///
/// The buffer is expected in y,x order, one byte per cell. Any non-zero byte
/// sets `b = 1` at that cell; zero bytes leave the cell untouched.
///
/// # Returns
/// Number of bytes read from the buffer, or 0 on error.
pub fn import_seed_region(
    field: &mut Field,
    in_buf: &[u8],
    min_x: i16,
    min_y: i16,
    max_x: i16,
    max_y: i16,
) -> u64 {
    let (min_x, max_x) = clamp_span(min_x, max_x, field.width);
    let (min_y, max_y) = clamp_span(min_y, max_y, field.height);

    // Handle empty or inverted regions
    if min_x >= max_x || min_y >= max_y {
        return 0;
    }

    let total_size = (max_x - min_x) as usize * (max_y - min_y) as usize;
    if in_buf.len() < total_size {
        return 0;
    }

    let width = field.width;
    let b = field.b.live_mut();
    let mut offset = 0;
    for y in min_y..max_y {
        for x in min_x..max_x {
            if in_buf[offset] != 0 {
                b[index_of(width, x, y)] = 1.0;
            }
            offset += 1;
        }
    }

    offset as u64
}
