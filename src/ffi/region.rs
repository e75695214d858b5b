//! Snapshot extraction and seed import FFI functions.

use crate::automaton;
use crate::automaton::StepController;
use crate::state::State;

/// Copies the current automaton row into `out_buf` (one byte per cell, 0/1).
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
/// - `out_buf` must point to at least `out_len` writable bytes
///
/// # Returns
/// Number of bytes written, or 0 on error (null pointer or short buffer).
#[no_mangle]
pub unsafe extern "C" fn pa_extract_row(ptr: *const State, out_buf: *mut u8, out_len: usize) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, out_len);
    automaton::extract_row(&*ptr, buf_slice)
}

/// Extracts a rectangular region of the field as RGB triplets.
///
/// # Layout
/// The buffer is filled in y,x order (y changes slowest, x changes fastest),
/// 3 bytes per cell. Coordinates are clamped to the field.
///
/// # Safety
/// - `ctrl` must be a valid pointer returned by `pa_create_field()`, or null
/// - `out_buf` must point to at least `out_len` writable bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn pa_field_extract_rgb(
    ctrl: *const StepController,
    out_buf: *mut u8,
    out_len: usize,
    min_x: i16,
    min_y: i16,
    max_x: i16,
    max_y: i16,
) -> u64 {
    if ctrl.is_null() || out_buf.is_null() {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, out_len);
    automaton::extract_rgb_region(&(*ctrl).field, buf_slice, min_x, min_y, max_x, max_y)
}

/// Imports a seeding mask: every non-zero byte sets `b = 1` at that cell.
///
/// # Layout
/// The buffer is expected in y,x order, one byte per cell.
///
/// # Safety
/// - `ctrl` must be a valid pointer returned by `pa_create_field()`, or null
/// - `in_buf` must point to at least `in_len` readable bytes
///
/// # Returns
/// Number of bytes read, or 0 on error (including an active step).
#[no_mangle]
pub unsafe extern "C" fn pa_field_import_seed(
    ctrl: *mut StepController,
    in_buf: *const u8,
    in_len: usize,
    min_x: i16,
    min_y: i16,
    max_x: i16,
    max_y: i16,
) -> u64 {
    if ctrl.is_null() || in_buf.is_null() {
        return 0;
    }

    let ctrl = &mut *ctrl;
    if ctrl.is_stepping() {
        return 0; // Prevent mutation during active step
    }

    let buf_slice = std::slice::from_raw_parts(in_buf, in_len);
    automaton::import_seed_region(&mut ctrl.field, buf_slice, min_x, min_y, max_x, max_y)
}
