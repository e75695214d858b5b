//! Pixel Automata - frame-driven local-update simulations
//!
//! A 1D elementary cellular automaton and a 2D Gray-Scott reaction-diffusion
//! field, each stepped once (or a few times) per rendered frame by an
//! external host. The crate owns state and update rules only; drawing and
//! input capture belong to the host, which talks to the `sketch` API from
//! Rust or to the C ABI in `ffi`.

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod input;
pub mod sketch;
pub mod state;


pub use config::{Parameters, Preset, SketchConfig};
pub use error::SimError;
pub use input::Input;
pub use sketch::{ElementarySketch, ReactionDiffusionSketch, Sketch};
pub use state::State;
