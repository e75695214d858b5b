//! Cell access, rule switching, reset, and stepping.

use crate::automaton;
use crate::automaton::RuleTable;
use crate::state::State;

/// Gets the state of a cell (0 = dead, 1 = alive).
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
///
/// # Returns
/// 0 if out of bounds, null pointer, or dead; 1 if alive.
#[no_mangle]
pub unsafe extern "C" fn pa_get_cell(ptr: *const State, x: i16) -> u8 {
    if ptr.is_null() {
        return 0;
    }

    if x < 0 {
        return 0;
    }

    (&(*ptr).cells).get(x as usize).copied().unwrap_or(0)
}

/// Switches to a new rule, discarding the current row.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
///
/// # Returns
/// 0 on success, 1 on failure (null pointer or rule outside 0..=255)
#[no_mangle]
pub unsafe extern "C" fn pa_set_rule(ptr: *mut State, rule: i32) -> i32 {
    if ptr.is_null() {
        return 1;
    }
    let Ok(rule) = u32::try_from(rule) else {
        return 1;
    };
    let Ok(rule) = RuleTable::from_number(rule) else {
        return 1;
    };

    automaton::set_rule(&mut *ptr, rule);
    0
}

/// Restores the single center seed and generation 0.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
#[no_mangle]
pub unsafe extern "C" fn pa_reset(ptr: *mut State) {
    if ptr.is_null() {
        return;
    }

    automaton::reset_grid(&mut *ptr);
}

/// Advances the automaton by one generation.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State
#[no_mangle]
pub unsafe extern "C" fn pa_step(ptr: *mut State) {
    if ptr.is_null() {
        return;
    }

    automaton::step_automaton(&mut *ptr);
}
