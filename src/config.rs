//! Runtime parameters and sketch configuration.
//!
//! Nothing here is read from disk or the environment; the host builds a
//! `SketchConfig` (usually `Default`) and passes it into the constructors.

use crate::error::SimError;

/// Gray-Scott coefficients read by the field step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    pub feed: f32,
    pub kill: f32,
    pub diffusion_a: f32,
    pub diffusion_b: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        let (feed, kill) = Preset::Spots.rates();
        Parameters {
            feed,
            kill,
            diffusion_a: 1.0,
            diffusion_b: 0.5,
        }
    }
}

impl Parameters {
    /// True when every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.feed, self.kill, self.diffusion_a, self.diffusion_b]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Replace feed and kill with the preset's pair. Diffusion is left alone.
    pub fn apply_preset(&mut self, preset: Preset) {
        let (feed, kill) = preset.rates();
        self.feed = feed;
        self.kill = kill;
    }
}

/// Known pattern regimes, bound to keys 1-4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Spots,
    Stripes,
    Mitosis,
    Worms,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Spots,
        Preset::Stripes,
        Preset::Mitosis,
        Preset::Worms,
    ];

    /// `(feed, kill)` for this regime.
    pub fn rates(self) -> (f32, f32) {
        match self {
            Preset::Spots => (0.055, 0.062),
            Preset::Stripes => (0.03, 0.062),
            Preset::Mitosis => (0.025, 0.06),
            Preset::Worms => (0.039, 0.058),
        }
    }

    /// Map a key character ('1'..='4') to its preset.
    pub fn from_key(key: char) -> Option<Preset> {
        let digit = key.to_digit(10)?;
        Preset::try_from(digit as u8).ok()
    }
}

impl TryFrom<u8> for Preset {
    type Error = SimError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Preset::Spots),
            2 => Ok(Preset::Stripes),
            3 => Ok(Preset::Mitosis),
            4 => Ok(Preset::Worms),
            other => Err(SimError::UnknownPreset(other)),
        }
    }
}

pub const MIN_STEPS_PER_FRAME: u32 = 1;
pub const MAX_STEPS_PER_FRAME: u32 = 20;

/// Dimensions and per-frame knobs for a sketch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SketchConfig {
    pub width: i16,
    pub height: i16,
    /// Internal steps per rendered frame.
    pub steps_per_frame: u32,
    pub seed_half_size: i16,
    pub brush_half_size: i16,
    /// Worker threads for the step controller.
    pub threads: u8,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig {
            width: 200,
            height: 200,
            steps_per_frame: 5,
            seed_half_size: 10,
            brush_half_size: 5,
            threads: 1,
        }
    }
}

/// Clamp a speed value into the supported steps-per-frame range.
pub fn clamp_steps_per_frame(steps: u32) -> u32 {
    steps.clamp(MIN_STEPS_PER_FRAME, MAX_STEPS_PER_FRAME)
}
