//! Automaton creation, destruction, and generation queries.

use crate::automaton::{create_grid, RuleTable};
use crate::state::State;

/// Creates a new elementary automaton and returns an opaque pointer.
///
/// # Returns
/// A pointer to a new State, or null if `width <= 0` or `rule` is outside 0..=255.
///
/// # Safety
/// The returned pointer must eventually be freed with `pa_destroy()`.
#[no_mangle]
pub extern "C" fn pa_create(width: i16, rule: i32) -> *mut State {
    let Ok(rule) = u32::try_from(rule) else {
        return std::ptr::null_mut();
    };
    let Ok(rule) = RuleTable::from_number(rule) else {
        return std::ptr::null_mut();
    };

    match create_grid(width, rule) {
        Ok(state) => Box::into_raw(Box::new(state)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Destroys an automaton state and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `pa_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn pa_destroy(ptr: *mut State) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current generation counter from a state.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn pa_get_generation(ptr: *const State) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation
}

/// Gets the current rule number.
///
/// # Safety
/// - `ptr` must be a valid pointer to a State, or null
///
/// # Returns
/// The rule number, or -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn pa_get_rule(ptr: *const State) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    (*ptr).rule.number() as i32
}
