//! Exercise reference table
//!
//! Fixed mapping from exercise name to MET coefficient. Not user-editable.

use serde::Serialize;

/// MET used when an exercise name is not in the table
pub const DEFAULT_MET: f64 = 3.0;

/// One row of the exercise table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExerciseEntry {
    pub name: &'static str,
    pub met: f64,
}

/// All known exercises, in display order
pub const EXERCISES: &[ExerciseEntry] = &[
    ExerciseEntry { name: "걷기", met: 3.0 },
    ExerciseEntry { name: "여유 산책", met: 3.0 },
    ExerciseEntry { name: "실내 산책", met: 2.5 },
    ExerciseEntry { name: "하이킹", met: 6.0 },
    ExerciseEntry { name: "반려견 산책", met: 3.0 },
];

/// Look up the MET coefficient for an exercise name (exact match)
pub fn met_for(name: &str) -> Option<f64> {
    EXERCISES.iter().find(|e| e.name == name).map(|e| e.met)
}

/// MET coefficient for an exercise, falling back to [`DEFAULT_MET`]
pub fn met_or_default(name: &str) -> f64 {
    met_for(name).unwrap_or(DEFAULT_MET)
}
