//! Discrete commands delivered by the host between frames.

use crate::config::Preset;

/// A fire-and-forget command, applied synchronously before the next step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Reset,
    Preset(Preset),
    CycleRule,
    SpeedUp,
    SpeedDown,
    /// Click or drag at a cell coordinate.
    Pointer { x: i16, y: i16 },
}

impl Input {
    /// Decode a key press. Unbound keys yield None.
    pub fn from_key(key: char) -> Option<Input> {
        match key {
            'r' | 'R' => Some(Input::Reset),
            'n' | 'N' => Some(Input::CycleRule),
            '+' | '=' => Some(Input::SpeedUp),
            '-' | '_' => Some(Input::SpeedDown),
            other => Preset::from_key(other).map(Input::Preset),
        }
    }
}
