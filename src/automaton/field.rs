//! Two-species Gray-Scott reaction-diffusion field.
//!
//! Each species lives in a double buffer:
//! - All reads come from the live buffer of generation N
//! - All writes go to the scratch buffer, which becomes generation N+1 on swap
//! - The 1-cell border is never processed and is carried over unchanged
//!
//! The Laplacian kernel is stored as integers over a common denominator so
//! its weights sum to exactly zero.

use log::info;

use super::grid::{clamp_coord, clamp_span, in_bounds, index_of};
use crate::config::Parameters;
use crate::error::SimError;

/// 3x3 Laplacian kernel in units of 1/`LAPLACIAN_SCALE`.
/// Center -1, orthogonal 0.2, diagonal 0.05.
pub const LAPLACIAN_KERNEL: [[i32; 3]; 3] = [[1, 4, 1], [4, -20, 4], [1, 4, 1]];
pub const LAPLACIAN_SCALE: f32 = 20.0;

/// Real-valued kernel weight for offset (dx, dy) in -1..=1.
#[inline]
pub fn laplacian_weight(dx: i16, dy: i16) -> f32 {
    LAPLACIAN_KERNEL[(dy + 1) as usize][(dx + 1) as usize] as f32 / LAPLACIAN_SCALE
}

/// Clamp a concentration into [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Two owned buffers and a flag naming the live one.
pub struct DoubleBuffer {
    bufs: [Vec<f32>; 2],
    live: usize,
}

impl DoubleBuffer {
    pub fn new(len: usize, value: f32) -> Self {
        DoubleBuffer {
            bufs: [vec![value; len], vec![value; len]],
            live: 0,
        }
    }

    pub fn live(&self) -> &[f32] {
        &self.bufs[self.live]
    }

    pub fn live_mut(&mut self) -> &mut [f32] {
        &mut self.bufs[self.live]
    }

    /// Borrow the live buffer for reading and the scratch buffer for writing.
    pub fn split(&mut self) -> (&[f32], &mut [f32]) {
        let (first, second) = self.bufs.split_at_mut(1);
        if self.live == 0 {
            (first[0].as_slice(), second[0].as_mut_slice())
        } else {
            (second[0].as_slice(), first[0].as_mut_slice())
        }
    }

    /// Promote scratch to live.
    pub fn swap(&mut self) {
        self.live ^= 1;
    }

    /// Overwrite both buffers so a later split sees consistent borders.
    pub fn fill(&mut self, value: f32) {
        for buf in self.bufs.iter_mut() {
            buf.fill(value);
        }
    }
}

/// A 2D reaction-diffusion grid with species `a` and `b`.
pub struct Field {
    pub width: i16,
    pub height: i16,
    pub a: DoubleBuffer,
    pub b: DoubleBuffer,
    pub generation: u64,
}

/// Create a field with `a = 1`, `b = 0`, and the centered seed square.
pub fn create_field(width: i16, height: i16, seed_half: i16) -> Result<Field, SimError> {
    if width <= 0 || height <= 0 {
        return Err(SimError::EmptyGrid { width, height });
    }

    let size = width as usize * height as usize;
    let mut field = Field {
        width,
        height,
        a: DoubleBuffer::new(size, 1.0),
        b: DoubleBuffer::new(size, 0.0),
        generation: 0,
    };
    seed_center(&mut field, seed_half);
    Ok(field)
}

/// Restore the initial state: uniform `a = 1`, `b = 0`, centered seed.
pub fn reset_field(field: &mut Field, seed_half: i16) {
    field.a.fill(1.0);
    field.b.fill(0.0);
    field.generation = 0;
    seed_center(field, seed_half);
    info!("field {}x{} reset", field.width, field.height);
}

/// Set `b = 1` in the square of half-size `half` around the grid center.
pub fn seed_center(field: &mut Field, half: i16) {
    let cx = field.width / 2;
    let cy = field.height / 2;
    seed_square(field, cx, cy, half);
}

/// Set `b = 1` in a square around a pointer cell. The center is clamped
/// into the grid and the square clipped to it.
pub fn seed_at(field: &mut Field, x: i16, y: i16, half: i16) {
    let cx = clamp_coord(x, field.width);
    let cy = clamp_coord(y, field.height);
    seed_square(field, cx, cy, half);
}

fn seed_square(field: &mut Field, cx: i16, cy: i16, half: i16) {
    let half = half.max(0);
    let (min_x, max_x) = clamp_span(cx.saturating_sub(half), cx.saturating_add(half), field.width);
    let (min_y, max_y) = clamp_span(cy.saturating_sub(half), cy.saturating_add(half), field.height);

    let width = field.width;
    let b = field.b.live_mut();
    for y in min_y..max_y {
        for x in min_x..max_x {
            b[index_of(width, x, y)] = 1.0;
        }
    }
}

/// Get `(a, b)` at a cell, or None when out of bounds.
pub fn field_get(field: &Field, x: i16, y: i16) -> Option<(f32, f32)> {
    if !in_bounds(field.width, field.height, x, y) {
        return None;
    }
    let idx = index_of(field.width, x, y);
    Some((field.a.live()[idx], field.b.live()[idx]))
}

/// Set `(a, b)` at a cell, clamped to [0, 1]. Out-of-bounds writes are ignored.
pub fn field_set(field: &mut Field, x: i16, y: i16, a: f32, b: f32) {
    if !in_bounds(field.width, field.height, x, y) {
        return;
    }
    let idx = index_of(field.width, x, y);
    field.a.live_mut()[idx] = clamp_unit(a);
    field.b.live_mut()[idx] = clamp_unit(b);
}

/// Weighted 9-point Laplacian at an interior cell.
#[inline]
pub fn laplacian(cells: &[f32], width: i16, x: i16, y: i16) -> f32 {
    let mut sum = 0.0;
    for (ky, row) in LAPLACIAN_KERNEL.iter().enumerate() {
        for (kx, &weight) in row.iter().enumerate() {
            let idx = index_of(width, x + kx as i16 - 1, y + ky as i16 - 1);
            sum += weight as f32 * cells[idx];
        }
    }
    sum / LAPLACIAN_SCALE
}

/// Compute row `y` of generation N+1 into `out_a` / `out_b` (one row each).
///
/// Border rows and the first/last column are copied from the live buffers.
pub fn step_row(
    width: i16,
    height: i16,
    y: i16,
    live_a: &[f32],
    live_b: &[f32],
    out_a: &mut [f32],
    out_b: &mut [f32],
    params: &Parameters,
) {
    let row_start = index_of(width, 0, y);
    let row_end = row_start + width as usize;
    out_a.copy_from_slice(&live_a[row_start..row_end]);
    out_b.copy_from_slice(&live_b[row_start..row_end]);

    if y == 0 || y >= height - 1 {
        return;
    }

    for x in 1..width - 1 {
        let idx = index_of(width, x, y);
        let a = live_a[idx];
        let b = live_b[idx];
        let reaction = a * b * b;

        let next_a = a + (params.diffusion_a * laplacian(live_a, width, x, y) - reaction
            + params.feed * (1.0 - a));
        let next_b = b + (params.diffusion_b * laplacian(live_b, width, x, y) + reaction
            - (params.kill + params.feed) * b);

        out_a[x as usize] = clamp_unit(next_a);
        out_b[x as usize] = clamp_unit(next_b);
    }
}

/// Step the field forward by one generation.
pub fn field_step(field: &mut Field, params: &Parameters) {
    let width = field.width;
    let height = field.height;
    let (live_a, scratch_a) = field.a.split();
    let (live_b, scratch_b) = field.b.split();

    let rows = scratch_a
        .chunks_mut(width as usize)
        .zip(scratch_b.chunks_mut(width as usize));
    for (y, (out_a, out_b)) in rows.enumerate() {
        step_row(width, height, y as i16, live_a, live_b, out_a, out_b, params);
    }

    field.a.swap();
    field.b.swap();
    field.generation += 1;
}
