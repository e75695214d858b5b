//! C FFI layer for canvas and scripting hosts.
//!
//! This module exports C ABI functions so a host page or scripting runtime
//! can drive the simulations frame by frame.
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module. These functions are thin wrappers
//! that handle null checks, pointer safety, and C-to-Rust conversions.

pub mod field;
pub mod grid;
pub mod lifecycle;
pub mod region;

pub use field::{
    pa_create_field, pa_destroy_field, pa_field_begin_step, pa_field_get_a, pa_field_get_b,
    pa_field_get_generation, pa_field_reset, pa_field_seed, pa_field_select_preset,
    pa_field_step, pa_field_tick,
};
pub use grid::{pa_get_cell, pa_reset, pa_set_rule, pa_step};
pub use lifecycle::{pa_create, pa_destroy, pa_get_generation, pa_get_rule};
pub use region::{pa_extract_row, pa_field_extract_rgb, pa_field_import_seed};
