//! Data models
//!
//! Input snapshots, reference data and the analysis response/view types.

mod analysis;
mod exercise;
mod snapshot;

pub use analysis::{AnalysisData, AnalysisResponse, AnalysisViewModel, UNKNOWN_SENTINEL};
pub use exercise::{met_for, met_or_default, ExerciseEntry, DEFAULT_MET, EXERCISES};
pub use snapshot::{
    CalculationMode, Gender, InputSnapshot, WeightUnit, PRESET_DURATIONS_MINUTES,
};
