//! Shared data structures for the tonefield tuning pipeline
//!
//! This module defines the core types flowing through the crate:
//! - `TuningErrors`: the three signed Hz measurements (the only input)
//! - `TargetSelection`, `StrikePrescription`: prescription engine output
//! - `Rgb`: tension color-field output, one per sampled point
//! - `TuningRecord`: persisted prescription + inputs for exact replay

mod tuning;
mod prescription;
mod color;
mod record;

pub use tuning::*;
pub use prescription::*;
pub use color::*;
pub use record::*;
