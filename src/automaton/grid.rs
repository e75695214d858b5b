//! Grid initialization and cell indexing helpers.

use log::info;

use super::rule::RuleTable;
use crate::error::SimError;
use crate::state::State;

/// Create a row of `width` cells, reset to the single center seed.
pub fn create_grid(width: i16, rule: RuleTable) -> Result<State, SimError> {
    if width <= 0 {
        return Err(SimError::EmptyGrid { width, height: 1 });
    }

    let mut state = State {
        width,
        cells: vec![0; width as usize],
        generation: 0,
        rule,
    };
    reset_grid(&mut state);
    Ok(state)
}

/// Clear every cell except `floor(width/2)` and restart at generation 0.
pub fn reset_grid(state: &mut State) {
    state.cells.fill(0);
    let seed = state.seed_index();
    if let Some(cell) = state.cells.get_mut(seed) {
        *cell = 1;
    }
    state.generation = 0;
}

/// Switch rule. The old row is discarded, never carried into the new rule.
pub fn set_rule(state: &mut State, rule: RuleTable) {
    info!(
        "rule {} -> {} (reset at generation {})",
        state.rule.number(),
        rule.number(),
        state.generation
    );
    state.rule = rule;
    reset_grid(state);
}

/// Wrap a possibly negative or overflowing index onto a ring of `len` cells.
#[inline]
pub fn wrap_index(i: isize, len: usize) -> usize {
    i.rem_euclid(len as isize) as usize
}

/// Calculate the linear index for a 2D coordinate (row-major).
#[inline]
pub fn index_of(width: i16, x: i16, y: i16) -> usize {
    y as usize * width as usize + x as usize
}

/// Check if coordinates are within grid bounds.
#[inline]
pub fn in_bounds(width: i16, height: i16, x: i16, y: i16) -> bool {
    x >= 0 && x < width && y >= 0 && y < height
}

/// Clamp one coordinate into `[0, len)`.
#[inline]
pub fn clamp_coord(v: i16, len: i16) -> i16 {
    v.max(0).min(len - 1)
}

/// Clamp a half-open span `[min, max)` into `[0, len]`.
#[inline]
pub fn clamp_span(min: i16, max: i16, len: i16) -> (i16, i16) {
    (min.max(0).min(len), max.max(0).min(len))
}
