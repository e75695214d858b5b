//! Non-blocking incremental stepping of a reaction-diffusion field.
//!
//! Splits one field step into bands of rows that can be processed across
//! several host ticks without blocking a frame.
//!
//! Core invariant: the field's double buffer is the snapshot. All reads come
//! from the live generation-N buffers, all writes go to the generation-N+1
//! scratch buffers, and the swap happens only once every band is done.
//! Band order and thread count therefore don't affect the result.

use std::time::{Duration, Instant};

use log::{debug, warn};
use rayon::prelude::*;

use crate::automaton::field::{create_field, reset_field, seed_at, step_row, Field};
use crate::config::{Parameters, Preset, SketchConfig};
use crate::error::SimError;

pub const BAND_ROWS: i16 = 16;

/// Tracks the state of an in-progress incremental generation step.
pub struct IncrementalStep {
    /// Next band to process.
    pub next_band: usize,

    /// Total number of bands.
    pub total_bands: usize,

    /// The generation number this step will produce (field.generation + 1).
    pub target_generation: u64,
}

/// Manages the lifecycle of incremental steps for a Field.
pub struct StepController {
    /// The field being stepped.
    pub field: Field,

    /// Coefficients used by every step.
    params: Parameters,

    /// In-progress step state, or None if idle.
    pub active_step: Option<IncrementalStep>,

    /// Rayon thread pool (1 thread by default, configurable).
    pub thread_pool: rayon::ThreadPool,
}

fn build_pool(num_threads: u8) -> Result<rayon::ThreadPool, SimError> {
    let num_threads = if num_threads == 0 {
        1
    } else {
        num_threads as usize
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
    {
        Ok(pool) => {
            debug!("step controller pool with {} threads", num_threads);
            Ok(pool)
        }
        Err(e) => {
            warn!("could not build {num_threads}-thread pool, falling back to 1: {e}");
            Ok(rayon::ThreadPoolBuilder::new().num_threads(1).build()?)
        }
    }
}

impl StepController {
    /// Create a controller with a freshly seeded field sized by `config`.
    pub fn new(config: &SketchConfig, params: Parameters) -> Result<Self, SimError> {
        let field = create_field(config.width, config.height, config.seed_half_size)?;
        Self::from_field(field, params, config.threads)
    }

    /// Create a step controller from an existing field.
    pub fn from_field(field: Field, params: Parameters, num_threads: u8) -> Result<Self, SimError> {
        if !params.is_finite() {
            return Err(SimError::NonFiniteParameters(params));
        }
        Ok(StepController {
            field,
            params,
            active_step: None,
            thread_pool: build_pool(num_threads)?,
        })
    }

    /// Extract the inner field.
    pub fn into_field(self) -> Field {
        self.field
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Query whether a step is currently in progress.
    pub fn is_stepping(&self) -> bool {
        self.active_step.is_some()
    }

    fn ensure_idle(&self) -> Result<(), SimError> {
        if self.is_stepping() {
            return Err(SimError::StepInProgress);
        }
        Ok(())
    }

    /// Replace the coefficients. Rejected mid-step or when any value is
    /// NaN or infinite.
    pub fn set_params(&mut self, params: Parameters) -> Result<(), SimError> {
        self.ensure_idle()?;
        if !params.is_finite() {
            return Err(SimError::NonFiniteParameters(params));
        }
        self.params = params;
        Ok(())
    }

    /// Switch feed and kill to a preset. Rejected mid-step.
    pub fn select_preset(&mut self, preset: Preset) -> Result<(), SimError> {
        self.ensure_idle()?;
        self.params.apply_preset(preset);
        Ok(())
    }

    /// Seed a brush square at a pointer cell. Rejected mid-step.
    pub fn seed_at(&mut self, x: i16, y: i16, half: i16) -> Result<(), SimError> {
        self.ensure_idle()?;
        seed_at(&mut self.field, x, y, half);
        Ok(())
    }

    /// Restore the initial field. Rejected mid-step.
    pub fn reset(&mut self, seed_half: i16) -> Result<(), SimError> {
        self.ensure_idle()?;
        reset_field(&mut self.field, seed_half);
        Ok(())
    }

    /// Begin a new incremental step.
    pub fn begin_step(&mut self) -> Result<(), SimError> {
        self.ensure_idle()?;

        let height = self.field.height as usize;
        let total_bands = (height + BAND_ROWS as usize - 1) / BAND_ROWS as usize;

        self.active_step = Some(IncrementalStep {
            next_band: 0,
            total_bands,
            target_generation: self.field.generation + 1,
        });
        Ok(())
    }

    /// Do bounded work within the given time budget (microseconds).
    /// Returns true if the step completed during this tick, false if more work remains.
    pub fn tick(&mut self, budget_us: u64) -> bool {
        // None means the budget is too large to represent: no deadline
        let deadline = Instant::now().checked_add(Duration::from_micros(budget_us));
        let batch = self.thread_pool.current_num_threads().max(1);

        loop {
            let (first, count) = match &self.active_step {
                Some(step) => (
                    step.next_band,
                    batch.min(step.total_bands - step.next_band),
                ),
                None => return true,
            };

            self.process_bands(first, count);

            let finished = match &mut self.active_step {
                Some(step) => {
                    step.next_band += count;
                    step.next_band >= step.total_bands
                }
                None => true,
            };
            if finished {
                self.finalize_step();
                return true;
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return false; // Budget exhausted, yield to the host.
            }
        }
    }

    /// Compute bands `first..first + count` on the thread pool.
    fn process_bands(&mut self, first: usize, count: usize) {
        let width = self.field.width;
        let height = self.field.height;
        let params = self.params;
        let row_len = width as usize;
        let band_len = row_len * BAND_ROWS as usize;

        let (live_a, scratch_a) = self.field.a.split();
        let (live_b, scratch_b) = self.field.b.split();
        let start = (first * band_len).min(scratch_a.len());
        let end = ((first + count) * band_len).min(scratch_a.len());
        let out_a = &mut scratch_a[start..end];
        let out_b = &mut scratch_b[start..end];

        self.thread_pool.install(|| {
            out_a
                .par_chunks_mut(band_len)
                .zip(out_b.par_chunks_mut(band_len))
                .enumerate()
                .for_each(|(i, (band_a, band_b))| {
                    let band_y = ((first + i) * BAND_ROWS as usize) as i16;
                    let rows = band_a.chunks_mut(row_len).zip(band_b.chunks_mut(row_len));
                    for (dy, (row_a, row_b)) in rows.enumerate() {
                        let y = band_y + dy as i16;
                        step_row(width, height, y, live_a, live_b, row_a, row_b, &params);
                    }
                });
        });
    }

    /// Blocking full step (equivalent to begin + tick(MAX) until done).
    ///
    /// If an incremental step is already in flight, that step is finished
    /// instead of starting a new one. Either way exactly one generation
    /// completes.
    pub fn step_blocking(&mut self) {
        match self.begin_step() {
            Ok(()) => {}
            Err(SimError::StepInProgress) => {
                debug!("finishing in-flight step toward generation {}", self.field.generation + 1);
            }
            Err(e) => {
                warn!("could not begin step: {e}");
                return;
            }
        }
        while !self.tick(u64::MAX) {}
    }

    /// Run `steps` blocking steps, as one rendered frame.
    pub fn frame(&mut self, steps: u32) {
        for _ in 0..steps {
            self.step_blocking();
        }
    }

    /// Finalize the step by swapping scratch into live and bumping the generation.
    fn finalize_step(&mut self) {
        if let Some(step) = self.active_step.take() {
            self.field.a.swap();
            self.field.b.swap();
            self.field.generation = step.target_generation;
            debug!("field reached generation {}", self.field.generation);
        }
    }
}
