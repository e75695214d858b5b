//! Core simulation logic.
//!
//! This module contains the grid indexing helpers, the elementary automaton
//! rule and step, the reaction-diffusion field and its incremental
//! controller, and snapshot extraction for renderers.
//! The FFI layer in `ffi/` calls these functions.

pub mod field;
pub mod grid;
pub mod history;
pub mod incremental;
pub mod region;
pub mod rule;
pub mod stepping;

pub use field::{
    create_field, field_get, field_set, field_step, reset_field, seed_at, seed_center, Field,
};
pub use grid::{create_grid, in_bounds, index_of, reset_grid, set_rule, wrap_index};
pub use history::History;
pub use incremental::StepController;
pub use region::{cell_color, extract_rgb_region, extract_row, import_seed_region};
pub use rule::RuleTable;
pub use stepping::step_automaton;
