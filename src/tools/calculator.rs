//! Calorie Calculator Tools
//!
//! Holds the calculator form state and keeps the estimate in step with it:
//! every mutation re-runs the engine before returning.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calories::{self, CalculationDetails, CalorieEstimate};
use crate::models::{
    CalculationMode, ExerciseEntry, Gender, InputSnapshot, WeightUnit, EXERCISES,
    PRESET_DURATIONS_MINUTES,
};

// ============================================================================
// Errors and Edits
// ============================================================================

/// Rejected calculator edit. Only the choice fields can be rejected;
/// free-text fields are always accepted as typed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("Invalid weight unit: '{0}'. Valid units: kg, lbs")]
    InvalidUnit(String),

    #[error("Invalid calculation mode: '{0}'. Valid modes: MET, HR")]
    InvalidMode(String),

    #[error("Invalid gender: '{0}'. Valid values: male, female")]
    InvalidGender(String),

    #[error("Not a preset duration: {0}. Presets: 15, 20, 25, 30, 35, 40, 45, 60")]
    UnknownPreset(u32),
}

/// A batch of field edits, as sent by a tool call
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct CalculatorEdit {
    /// Body weight in the current unit
    pub weight: Option<f64>,
    /// "kg" or "lbs"
    pub unit: Option<String>,
    /// One of 15, 20, 25, 30, 35, 40, 45, 60. Clears custom_duration.
    pub preset_duration: Option<u32>,
    /// Free-text minutes; non-empty overrides the preset, empty restores it
    pub custom_duration: Option<String>,
    /// Exercise name from list_exercises (MET mode)
    pub exercise: Option<String>,
    /// "MET" or "HR"
    pub mode: Option<String>,
    /// Age in years (HR mode)
    pub age: Option<String>,
    /// "male" or "female" (HR mode)
    pub gender: Option<String>,
    /// Average heart rate in bpm (HR mode)
    pub heart_rate: Option<String>,
}

// ============================================================================
// Response Structs
// ============================================================================

/// Current calculator state
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorView {
    pub calories: CalorieEstimate,
    pub snapshot: InputSnapshot,
    pub details: CalculationDetails,
}

/// Response for list_exercises
#[derive(Debug, Serialize)]
pub struct ExerciseListResponse {
    pub exercises: &'static [ExerciseEntry],
    pub preset_durations_minutes: &'static [u32],
    pub default_met: f64,
}

// ============================================================================
// Controller
// ============================================================================

/// Calculator session: the input snapshot plus its current estimate
#[derive(Debug, Clone)]
pub struct CalculatorController {
    snapshot: InputSnapshot,
    calories: CalorieEstimate,
}

impl Default for CalculatorController {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorController {
    pub fn new() -> Self {
        Self::with_snapshot(InputSnapshot::default())
    }

    pub fn with_snapshot(snapshot: InputSnapshot) -> Self {
        let calories = calories::estimate(&snapshot);
        Self { snapshot, calories }
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn calories(&self) -> CalorieEstimate {
        self.calories
    }

    pub fn view(&self) -> CalculatorView {
        CalculatorView {
            calories: self.calories,
            snapshot: self.snapshot.clone(),
            details: calories::details(&self.snapshot),
        }
    }

    fn recompute(&mut self) {
        self.calories = calories::estimate(&self.snapshot);
        tracing::debug!(
            mode = self.snapshot.mode.as_str(),
            calories = self.calories,
            "recomputed estimate"
        );
    }

    pub fn set_weight(&mut self, value: f64) {
        self.snapshot.weight_value = value;
        self.recompute();
    }

    pub fn set_weight_unit(&mut self, unit: WeightUnit) {
        self.snapshot.weight_unit = unit;
        self.recompute();
    }

    /// Pick a preset duration. Clears any custom duration so the preset
    /// takes effect.
    pub fn select_preset_duration(&mut self, minutes: u32) -> Result<(), EditError> {
        if !PRESET_DURATIONS_MINUTES.contains(&minutes) {
            return Err(EditError::UnknownPreset(minutes));
        }
        self.snapshot.preset_duration_minutes = minutes;
        self.snapshot.custom_duration_minutes.clear();
        self.recompute();
        Ok(())
    }

    /// Set the free-text duration. Empty text hands control back to the preset.
    pub fn set_custom_duration(&mut self, text: impl Into<String>) {
        self.snapshot.custom_duration_minutes = text.into();
        self.recompute();
    }

    pub fn select_exercise(&mut self, name: impl Into<String>) {
        self.snapshot.selected_exercise = name.into();
        self.recompute();
    }

    pub fn set_mode(&mut self, mode: CalculationMode) {
        self.snapshot.mode = mode;
        self.recompute();
    }

    pub fn set_age(&mut self, text: impl Into<String>) {
        self.snapshot.age = text.into();
        self.recompute();
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.snapshot.gender_at_birth = gender;
        self.recompute();
    }

    pub fn set_heart_rate(&mut self, text: impl Into<String>) {
        self.snapshot.heart_rate_bpm = text.into();
        self.recompute();
    }

    /// Restore the initial form
    pub fn reset(&mut self) {
        self.snapshot = InputSnapshot::default();
        self.recompute();
    }

    /// Apply a batch of edits. Choice fields are validated up front, so a
    /// rejected batch leaves the state untouched.
    ///
    /// A preset is applied before a custom duration, so sending both leaves
    /// the custom duration in effect.
    pub fn apply(&mut self, edit: &CalculatorEdit) -> Result<CalorieEstimate, EditError> {
        let unit = edit
            .unit
            .as_deref()
            .map(|u| WeightUnit::from_str(u).ok_or_else(|| EditError::InvalidUnit(u.to_string())))
            .transpose()?;
        let mode = edit
            .mode
            .as_deref()
            .map(|m| CalculationMode::from_str(m).ok_or_else(|| EditError::InvalidMode(m.to_string())))
            .transpose()?;
        let gender = edit
            .gender
            .as_deref()
            .map(|g| Gender::from_str(g).ok_or_else(|| EditError::InvalidGender(g.to_string())))
            .transpose()?;
        if let Some(minutes) = edit.preset_duration {
            if !PRESET_DURATIONS_MINUTES.contains(&minutes) {
                return Err(EditError::UnknownPreset(minutes));
            }
        }

        if let Some(mode) = mode {
            self.set_mode(mode);
        }
        if let Some(weight) = edit.weight {
            self.set_weight(weight);
        }
        if let Some(unit) = unit {
            self.set_weight_unit(unit);
        }
        if let Some(minutes) = edit.preset_duration {
            self.select_preset_duration(minutes)?;
        }
        if let Some(ref text) = edit.custom_duration {
            self.set_custom_duration(text.clone());
        }
        if let Some(ref name) = edit.exercise {
            self.select_exercise(name.clone());
        }
        if let Some(ref age) = edit.age {
            self.set_age(age.clone());
        }
        if let Some(gender) = gender {
            self.set_gender(gender);
        }
        if let Some(ref hr) = edit.heart_rate {
            self.set_heart_rate(hr.clone());
        }

        Ok(self.calories)
    }
}

// ============================================================================
// Tool Functions
// ============================================================================

/// List the exercise table and preset durations
pub fn list_exercises() -> ExerciseListResponse {
    ExerciseListResponse {
        exercises: EXERCISES,
        preset_durations_minutes: PRESET_DURATIONS_MINUTES,
        default_met: crate::models::DEFAULT_MET,
    }
}

/// One-shot estimate from the default form plus the given edits
pub fn estimate_calories(edit: &CalculatorEdit) -> Result<CalculatorView, String> {
    let mut controller = CalculatorController::new();
    controller.apply(edit).map_err(|e| e.to_string())?;
    Ok(controller.view())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_estimate() {
        // 걷기, 70 kg, 30 min
        let c = CalculatorController::new();
        assert_eq!(c.calories(), 105);
    }

    #[test]
    fn test_every_mutation_recomputes() {
        let mut c = CalculatorController::new();

        c.set_weight(80.0);
        assert_eq!(c.calories(), 120);

        c.set_weight_unit(WeightUnit::Lbs);
        // 3.0 × 36.28736 × 0.5
        assert_eq!(c.calories(), 54);

        c.set_weight_unit(WeightUnit::Kg);
        c.select_preset_duration(60).unwrap();
        assert_eq!(c.calories(), 240);

        c.set_custom_duration("15");
        assert_eq!(c.calories(), 60);

        c.select_exercise("하이킹");
        assert_eq!(c.calories(), 120);

        c.set_mode(CalculationMode::Hr);
        assert_eq!(c.calories(), 0);

        c.set_age("30");
        c.set_heart_rate("150");
        // (6.051 + 94.635 − 7.2288 − 55.0969) × 15 / 4.184 = 137.5
        assert_eq!(c.calories(), 138);

        c.set_gender(Gender::Female);
        // (2.22 + 67.08 − 4.5928 − 20.4022) × 15 / 4.184 = 158.8
        assert_eq!(c.calories(), 159);
    }

    #[test]
    fn test_preset_clears_custom_duration() {
        let mut c = CalculatorController::new();
        c.set_custom_duration("50");
        assert_eq!(c.calories(), 175);

        c.select_preset_duration(20).unwrap();
        assert!(c.snapshot().custom_duration_minutes.is_empty());
        assert_eq!(c.calories(), 70);
    }

    #[test]
    fn test_clearing_custom_restores_preset() {
        let mut c = CalculatorController::new();
        c.set_custom_duration("50");
        c.set_custom_duration("");
        assert_eq!(c.calories(), 105);
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let mut c = CalculatorController::new();
        assert_eq!(c.select_preset_duration(90), Err(EditError::UnknownPreset(90)));
        assert_eq!(c.snapshot().preset_duration_minutes, 30);
    }

    #[test]
    fn test_apply_batch() {
        let mut c = CalculatorController::new();
        let edit = CalculatorEdit {
            weight: Some(60.0),
            preset_duration: Some(15),
            custom_duration: Some("60".to_string()),
            exercise: Some("nonexistent".to_string()),
            ..CalculatorEdit::default()
        };
        assert_eq!(c.apply(&edit), Ok(180));
        assert_eq!(c.snapshot().preset_duration_minutes, 15);
    }

    #[test]
    fn test_apply_rejects_whole_batch() {
        let mut c = CalculatorController::new();
        let edit = CalculatorEdit {
            weight: Some(100.0),
            gender: Some("other".to_string()),
            ..CalculatorEdit::default()
        };
        assert_eq!(c.apply(&edit), Err(EditError::InvalidGender("other".to_string())));
        assert_eq!(c.snapshot().weight_value, 70.0);
        assert_eq!(c.calories(), 105);
    }

    #[test]
    fn test_reset() {
        let mut c = CalculatorController::new();
        c.set_mode(CalculationMode::Hr);
        c.set_weight(90.0);
        c.reset();
        assert_eq!(c.snapshot(), &InputSnapshot::default());
        assert_eq!(c.calories(), 105);
    }

    #[test]
    fn test_estimate_calories_tool() {
        let view = estimate_calories(&CalculatorEdit {
            mode: Some("HR".to_string()),
            age: Some("20".to_string()),
            heart_rate: Some("60".to_string()),
            weight: Some(100.0),
            preset_duration: Some(15),
            ..CalculatorEdit::default()
        })
        .unwrap();
        assert_eq!(view.calories, 0);
        assert_eq!(view.details.mode, "HR");

        let err = estimate_calories(&CalculatorEdit {
            unit: Some("stone".to_string()),
            ..CalculatorEdit::default()
        })
        .unwrap_err();
        assert!(err.contains("stone"));
    }

    #[test]
    fn test_list_exercises() {
        let list = list_exercises();
        assert_eq!(list.exercises.len(), 5);
        assert_eq!(list.preset_durations_minutes.first(), Some(&15));
        assert_eq!(list.default_met, 3.0);
    }

    #[test]
    fn test_edit_from_tool_arguments() {
        let edit: CalculatorEdit = serde_json::from_value(serde_json::json!({
            "weight": 80,
            "preset_duration": 45,
            "exercise": "하이킹"
        }))
        .unwrap();
        assert_eq!(edit.unit, None);
        assert_eq!(estimate_calories(&edit).unwrap().calories, 360);

        let schema = serde_json::to_value(schemars::schema_for!(CalculatorEdit)).unwrap();
        let props = &schema["properties"];
        for field in ["weight", "unit", "preset_duration", "custom_duration", "mode", "heart_rate"] {
            assert!(props.get(field).is_some(), "missing {}", field);
        }
        assert!(schema.get("required").map_or(true, |r| r.as_array().map_or(true, |a| a.is_empty())));
    }

}
