//! FFI interface for reaction-diffusion fields.
//!
//! The field handle is a `StepController`, so the host can either step
//! blocking or spread one step over several ticks.

use crate::automaton;
use crate::automaton::StepController;
use crate::config::{Parameters, Preset, SketchConfig};

/// Create a new field with the given dimensions, seeded at the center.
/// Returns a pointer to the allocated controller, or NULL on invalid dimensions.
#[no_mangle]
pub extern "C" fn pa_create_field(
    width: i16,
    height: i16,
    seed_half: i16,
    num_threads: u8,
) -> *mut StepController {
    let config = SketchConfig {
        width,
        height,
        seed_half_size: seed_half,
        threads: num_threads,
        ..SketchConfig::default()
    };

    match StepController::new(&config, Parameters::default()) {
        Ok(ctrl) => Box::into_raw(Box::new(ctrl)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Destroy a field and free its memory.
/// Safe to call with null pointer (no-op).
#[no_mangle]
pub extern "C" fn pa_destroy_field(ctrl: *mut StepController) {
    if !ctrl.is_null() {
        unsafe {
            let _ = Box::from_raw(ctrl);
        }
    }
}

/// Get species `a` at a cell. Returns -1.0 for out-of-bounds or null pointer.
#[no_mangle]
pub extern "C" fn pa_field_get_a(ctrl: *const StepController, x: i16, y: i16) -> f32 {
    if ctrl.is_null() {
        return -1.0;
    }

    unsafe {
        automaton::field_get(&(*ctrl).field, x, y)
            .map(|(a, _)| a)
            .unwrap_or(-1.0)
    }
}

/// Get species `b` at a cell. Returns -1.0 for out-of-bounds or null pointer.
#[no_mangle]
pub extern "C" fn pa_field_get_b(ctrl: *const StepController, x: i16, y: i16) -> f32 {
    if ctrl.is_null() {
        return -1.0;
    }

    unsafe {
        automaton::field_get(&(*ctrl).field, x, y)
            .map(|(_, b)| b)
            .unwrap_or(-1.0)
    }
}

/// Seed a brush square of half-size `half` around a pointer cell.
/// Returns 0 on success, 1 on null pointer or an active step.
#[no_mangle]
pub extern "C" fn pa_field_seed(ctrl: *mut StepController, x: i16, y: i16, half: i16) -> i32 {
    if ctrl.is_null() {
        return 1;
    }

    unsafe { (*ctrl).seed_at(x, y, half).map_or(1, |_| 0) }
}

/// Restore `a = 1`, `b = 0` and the centered seed square.
/// Returns 0 on success, 1 on null pointer or an active step.
#[no_mangle]
pub extern "C" fn pa_field_reset(ctrl: *mut StepController, seed_half: i16) -> i32 {
    if ctrl.is_null() {
        return 1;
    }

    unsafe { (*ctrl).reset(seed_half).map_or(1, |_| 0) }
}

/// Select feed/kill preset by key number 1-4.
/// Returns 0 on success, 1 on null pointer, unknown key or an active step.
#[no_mangle]
pub extern "C" fn pa_field_select_preset(ctrl: *mut StepController, key: u8) -> i32 {
    if ctrl.is_null() {
        return 1;
    }
    let Ok(preset) = Preset::try_from(key) else {
        return 1;
    };

    unsafe { (*ctrl).select_preset(preset).map_or(1, |_| 0) }
}

/// Run `steps` blocking steps (one rendered frame).
#[no_mangle]
pub extern "C" fn pa_field_step(ctrl: *mut StepController, steps: u32) {
    if ctrl.is_null() {
        return;
    }

    unsafe {
        (*ctrl).frame(steps);
    }
}

/// Begin an incremental step.
/// Returns 0 on success, 1 if a step is already in progress or null pointer.
#[no_mangle]
pub extern "C" fn pa_field_begin_step(ctrl: *mut StepController) -> i32 {
    if ctrl.is_null() {
        return 1;
    }

    unsafe { (*ctrl).begin_step().map_or(1, |_| 0) }
}

/// Do bounded work for the active step.
/// Returns 1 if the step completed (or none was active), 0 if more work remains.
#[no_mangle]
pub extern "C" fn pa_field_tick(ctrl: *mut StepController, budget_us: u64) -> i32 {
    if ctrl.is_null() {
        return 1;
    }

    unsafe { (*ctrl).tick(budget_us) as i32 }
}

/// Get the current generation number of the field.
#[no_mangle]
pub extern "C" fn pa_field_get_generation(ctrl: *const StepController) -> u64 {
    if ctrl.is_null() {
        return 0;
    }

    unsafe { (*ctrl).field.generation }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_destroy_field() {
        let ctrl = pa_create_field(16, 12, 3, 1);
        assert!(!ctrl.is_null());

        unsafe {
            assert_eq!((*ctrl).field.width, 16);
            assert_eq!((*ctrl).field.height, 12);
            assert_eq!((*ctrl).field.generation, 0);
        }

        pa_destroy_field(ctrl);
    }

    #[test]
    fn test_create_rejects_empty() {
        assert!(pa_create_field(0, 12, 3, 1).is_null());
        assert!(pa_create_field(12, -1, 3, 1).is_null());
    }

    #[test]
    fn test_get_species() {
        let ctrl = pa_create_field(16, 16, 2, 1);

        assert_eq!(pa_field_get_a(ctrl, 0, 0), 1.0);
        assert_eq!(pa_field_get_b(ctrl, 0, 0), 0.0);
        assert_eq!(pa_field_get_b(ctrl, 8, 8), 1.0);
        assert_eq!(pa_field_get_a(ctrl, 16, 0), -1.0);

        pa_destroy_field(ctrl);
    }

    #[test]
    fn test_seed_reset_preset() {
        let ctrl = pa_create_field(16, 16, 2, 1);

        assert_eq!(pa_field_seed(ctrl, 1, 1, 1), 0);
        assert_eq!(pa_field_get_b(ctrl, 1, 1), 1.0);

        assert_eq!(pa_field_reset(ctrl, 2), 0);
        assert_eq!(pa_field_get_b(ctrl, 1, 1), 0.0);

        assert_eq!(pa_field_select_preset(ctrl, 2), 0);
        unsafe {
            assert_eq!((*ctrl).params().feed, 0.03);
        }
        assert_eq!(pa_field_select_preset(ctrl, 7), 1);

        pa_destroy_field(ctrl);
    }

    #[test]
    fn test_field_step_via_ffi() {
        let ctrl = pa_create_field(32, 32, 4, 1);

        assert_eq!(pa_field_get_generation(ctrl), 0);
        pa_field_step(ctrl, 5);
        assert_eq!(pa_field_get_generation(ctrl), 5);

        // b has diffused out of the seed square
        assert!(pa_field_get_b(ctrl, 11, 16) > 0.0);

        pa_destroy_field(ctrl);
    }

    #[test]
    fn test_incremental_via_ffi() {
        let ctrl = pa_create_field(16, 64, 4, 1);

        assert_eq!(pa_field_begin_step(ctrl), 0);
        assert_eq!(pa_field_begin_step(ctrl), 1);
        // Mutation refused mid-step
        assert_eq!(pa_field_seed(ctrl, 0, 0, 2), 1);

        while pa_field_tick(ctrl, 0) == 0 {}
        assert_eq!(pa_field_get_generation(ctrl), 1);

        pa_destroy_field(ctrl);
    }

    #[test]
    fn test_null_pointer_safety() {
        let null = std::ptr::null_mut();
        // These should not crash with null pointers
        pa_destroy_field(null);
        assert_eq!(pa_field_get_a(null, 0, 0), -1.0);
        assert_eq!(pa_field_get_b(null, 0, 0), -1.0);
        assert_eq!(pa_field_seed(null, 0, 0, 1), 1);
        assert_eq!(pa_field_reset(null, 1), 1);
        assert_eq!(pa_field_select_preset(null, 1), 1);
        pa_field_step(null, 3);
        assert_eq!(pa_field_begin_step(null), 1);
        assert_eq!(pa_field_tick(null, 0), 1);
        assert_eq!(pa_field_get_generation(null), 0);
    }
}
