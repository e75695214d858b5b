//! Sketches: one simulation plus its per-frame knobs and input handling.
//!
//! `Sketch` is a closed set of variants. Each variant handles every `Input`
//! explicitly, so a new command or sketch cannot fall through silently.

use log::info;

use crate::automaton::field::Field;
use crate::automaton::grid::{create_grid, reset_grid, set_rule};
use crate::automaton::history::History;
use crate::automaton::incremental::StepController;
use crate::automaton::region::extract_rgb_region;
use crate::automaton::rule::RuleTable;
use crate::automaton::stepping::step_automaton;
use crate::config::{clamp_steps_per_frame, Parameters, SketchConfig};
use crate::error::SimError;
use crate::input::Input;
use crate::state::State;

/// Elementary automaton with an append-only row history.
pub struct ElementarySketch {
    state: State,
    history: History,
    generations_per_frame: u32,
}

impl ElementarySketch {
    /// `history_rows` is how many generations fit on the canvas.
    pub fn new(width: i16, rule: RuleTable, history_rows: usize) -> Result<Self, SimError> {
        let state = create_grid(width, rule)?;
        let mut history = History::new(width as usize, history_rows);
        history.push(&state.cells);
        Ok(ElementarySketch {
            state,
            history,
            generations_per_frame: 1,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn generations_per_frame(&self) -> u32 {
        self.generations_per_frame
    }

    pub fn frame(&mut self) {
        for _ in 0..self.generations_per_frame {
            step_automaton(&mut self.state);
            self.history.push(&self.state.cells);
        }
    }

    fn restart_history(&mut self) {
        self.history.clear();
        self.history.push(&self.state.cells);
    }

    /// Apply one command. Returns whether it had any effect.
    pub fn apply(&mut self, input: Input) -> bool {
        match input {
            Input::Reset => {
                reset_grid(&mut self.state);
                self.restart_history();
                info!("elementary reset (rule {})", self.state.rule.number());
                true
            }
            Input::CycleRule | Input::Pointer { .. } => {
                let next = self.state.rule.next();
                set_rule(&mut self.state, next);
                self.restart_history();
                true
            }
            Input::SpeedUp => {
                self.generations_per_frame = clamp_steps_per_frame(self.generations_per_frame + 1);
                true
            }
            Input::SpeedDown => {
                self.generations_per_frame =
                    clamp_steps_per_frame(self.generations_per_frame.saturating_sub(1));
                true
            }
            Input::Preset(_) => false,
        }
    }
}

/// Gray-Scott field driven through a step controller.
pub struct ReactionDiffusionSketch {
    controller: StepController,
    config: SketchConfig,
    steps_per_frame: u32,
}

impl ReactionDiffusionSketch {
    pub fn new(config: SketchConfig, params: Parameters) -> Result<Self, SimError> {
        let controller = StepController::new(&config, params)?;
        Ok(ReactionDiffusionSketch {
            controller,
            config,
            steps_per_frame: clamp_steps_per_frame(config.steps_per_frame),
        })
    }

    pub fn field(&self) -> &Field {
        &self.controller.field
    }

    pub fn params(&self) -> &Parameters {
        self.controller.params()
    }

    pub fn steps_per_frame(&self) -> u32 {
        self.steps_per_frame
    }

    pub fn frame(&mut self) {
        self.controller.frame(self.steps_per_frame);
    }

    /// Render the whole field as RGB triplets.
    pub fn render_rgb(&self, out_buf: &mut [u8]) -> u64 {
        let field = self.field();
        extract_rgb_region(field, out_buf, 0, 0, field.width, field.height)
    }

    /// Apply one command. Returns whether it had any effect.
    pub fn apply(&mut self, input: Input) -> bool {
        match input {
            Input::Reset => self.controller.reset(self.config.seed_half_size).is_ok(),
            Input::Preset(preset) => {
                let applied = self.controller.select_preset(preset).is_ok();
                if applied {
                    let (feed, kill) = preset.rates();
                    info!("preset {:?}: feed={} kill={}", preset, feed, kill);
                }
                applied
            }
            Input::Pointer { x, y } => self
                .controller
                .seed_at(x, y, self.config.brush_half_size)
                .is_ok(),
            Input::SpeedUp => {
                self.steps_per_frame = clamp_steps_per_frame(self.steps_per_frame + 1);
                true
            }
            Input::SpeedDown => {
                self.steps_per_frame = clamp_steps_per_frame(self.steps_per_frame.saturating_sub(1));
                true
            }
            Input::CycleRule => false,
        }
    }
}

pub enum Sketch {
    Elementary(ElementarySketch),
    ReactionDiffusion(ReactionDiffusionSketch),
}

impl Sketch {
    /// Advance one rendered frame.
    pub fn frame(&mut self) {
        match self {
            Sketch::Elementary(sketch) => sketch.frame(),
            Sketch::ReactionDiffusion(sketch) => sketch.frame(),
        }
    }

    pub fn apply(&mut self, input: Input) -> bool {
        match self {
            Sketch::Elementary(sketch) => sketch.apply(input),
            Sketch::ReactionDiffusion(sketch) => sketch.apply(input),
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            Sketch::Elementary(sketch) => sketch.state().generation,
            Sketch::ReactionDiffusion(sketch) => sketch.field().generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::field::field_get;
    use crate::config::Preset;

    fn small_config() -> SketchConfig {
        SketchConfig {
            width: 40,
            height: 40,
            ..SketchConfig::default()
        }
    }

    #[test]
    fn test_elementary_frame_appends_history() {
        let mut sketch = ElementarySketch::new(9, RuleTable::new(90), 10).unwrap();
        assert_eq!(sketch.history().len(), 1);

        sketch.frame();
        assert_eq!(sketch.state().generation, 1);
        assert_eq!(sketch.history().len(), 2);
        assert_eq!(sketch.history().row(0), Some(&[0u8, 0, 0, 0, 1, 0, 0, 0, 0][..]));
        assert_eq!(sketch.history().row(1), Some(&[0u8, 0, 0, 1, 0, 1, 0, 0, 0][..]));
    }

    #[test]
    fn test_elementary_cycle_rule_resets() {
        let mut sketch = ElementarySketch::new(9, RuleTable::new(90), 10).unwrap();
        sketch.frame();
        sketch.frame();

        assert!(sketch.apply(Input::CycleRule));
        assert_eq!(sketch.state().rule.number(), 91);
        assert_eq!(sketch.state().generation, 0);
        assert_eq!(sketch.state().population(), 1);
        assert_eq!(sketch.history().len(), 1);

        // Pointer clicks also cycle the rule
        assert!(sketch.apply(Input::Pointer { x: 0, y: 0 }));
        assert_eq!(sketch.state().rule.number(), 92);
    }

    #[test]
    fn test_elementary_speed_and_ignored_inputs() {
        let mut sketch = ElementarySketch::new(15, RuleTable::new(30), 100).unwrap();
        assert!(sketch.apply(Input::SpeedUp));
        assert_eq!(sketch.generations_per_frame(), 2);
        sketch.frame();
        assert_eq!(sketch.state().generation, 2);

        sketch.apply(Input::SpeedDown);
        sketch.apply(Input::SpeedDown);
        assert_eq!(sketch.generations_per_frame(), 1);

        assert!(!sketch.apply(Input::Preset(Preset::Stripes)));
    }

    #[test]
    fn test_rd_frame_runs_steps_per_frame() {
        let mut sketch = ReactionDiffusionSketch::new(small_config(), Parameters::default()).unwrap();
        assert_eq!(sketch.steps_per_frame(), 5);
        sketch.frame();
        assert_eq!(sketch.field().generation, 5);
    }

    #[test]
    fn test_rd_preset_key() {
        let mut sketch = ReactionDiffusionSketch::new(small_config(), Parameters::default()).unwrap();
        assert!(sketch.apply(Input::from_key('3').unwrap()));
        assert_eq!(
            (sketch.params().feed, sketch.params().kill),
            (0.025, 0.06)
        );
        assert!(sketch.apply(Input::from_key('1').unwrap()));
        assert_eq!(
            (sketch.params().feed, sketch.params().kill),
            (0.055, 0.062)
        );
    }

    #[test]
    fn test_rd_pointer_seeds_and_reset_clears() {
        let mut sketch = ReactionDiffusionSketch::new(small_config(), Parameters::default()).unwrap();
        assert_eq!(field_get(sketch.field(), 3, 3), Some((1.0, 0.0)));

        assert!(sketch.apply(Input::Pointer { x: 3, y: 3 }));
        assert_eq!(field_get(sketch.field(), 3, 3), Some((1.0, 1.0)));

        sketch.frame();
        assert!(sketch.apply(Input::Reset));
        assert_eq!(sketch.field().generation, 0);
        assert_eq!(field_get(sketch.field(), 3, 3), Some((1.0, 0.0)));
        assert_eq!(field_get(sketch.field(), 20, 20), Some((1.0, 1.0)));

        assert!(!sketch.apply(Input::CycleRule));
    }

    #[test]
    fn test_rd_render_rgb() {
        let sketch = ReactionDiffusionSketch::new(small_config(), Parameters::default()).unwrap();
        let mut buffer = vec![0u8; 40 * 40 * 3];
        assert_eq!(sketch.render_rgb(&mut buffer), 4800);
        assert_eq!(&buffer[0..3], &[255, 128, 0]);
    }

    #[test]
    fn test_sketch_dispatch() {
        let mut sketches = vec![
            Sketch::Elementary(ElementarySketch::new(21, RuleTable::new(110), 50).unwrap()),
            Sketch::ReactionDiffusion(
                ReactionDiffusionSketch::new(small_config(), Parameters::default()).unwrap(),
            ),
        ];

        for sketch in sketches.iter_mut() {
            sketch.frame();
        }
        assert_eq!(sketches[0].generation(), 1);
        assert_eq!(sketches[1].generation(), 5);

        for sketch in sketches.iter_mut() {
            assert!(sketch.apply(Input::Reset));
            assert_eq!(sketch.generation(), 0);
        }
    }
}
