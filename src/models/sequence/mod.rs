//! Hand-rolled gated recurrent sequence model.
//!
//! [`CellParams`] and [`CellState`] are plain values: a timestep returns a new
//! state and a training update returns new parameters, so independent series
//! can be trained concurrently without sharing anything.

mod cell;
mod model;

pub use cell::{sigmoid, CellParams, CellState};
pub use model::{train, SequenceConfig, SequenceFit, SequenceForecaster, TrainingReport};
