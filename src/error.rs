//! Error type shared by constructors and the step controller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: i16, height: i16 },

    #[error("rule number {0} is outside 0..=255")]
    RuleOutOfRange(u32),

    #[error("no preset bound to key {0}")]
    UnknownPreset(u8),

    #[error("parameters must be finite: {0:?}")]
    NonFiniteParameters(crate::config::Parameters),

    #[error("a step is already in progress")]
    StepInProgress,

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
