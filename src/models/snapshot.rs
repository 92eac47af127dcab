//! Calculator input snapshot
//!
//! The raw state of the calculator form. Values are kept exactly as entered;
//! unit conversion and numeric coercion happen in the engine.

use serde::{Deserialize, Serialize};

/// Preset workout durations offered by the calculator, in minutes
pub const PRESET_DURATIONS_MINUTES: &[u32] = &[15, 20, 25, 30, 35, 40, 45, 60];

/// Unit the weight was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Some(WeightUnit::Lbs),
            _ => None,
        }
    }
}

/// Which formula the calculator uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalculationMode {
    /// Activity lookup in the exercise table
    #[default]
    #[serde(rename = "MET")]
    Met,
    /// Heart-rate regression
    #[serde(rename = "HR")]
    Hr,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::Met => "MET",
            CalculationMode::Hr => "HR",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "met" => Some(CalculationMode::Met),
            "hr" | "heart_rate" | "heartrate" => Some(CalculationMode::Hr),
            _ => None,
        }
    }
}

/// Sex at birth, selects the heart-rate regression coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Everything the user has entered into the calculator.
///
/// `custom_duration_minutes` overrides `preset_duration_minutes` whenever it
/// is non-empty; there is no separate flag for which one is in effect.
/// `age` and `heart_rate_bpm` are free text and only meaningful in HR mode;
/// `selected_exercise` is only meaningful in MET mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub weight_value: f64,
    pub weight_unit: WeightUnit,
    pub preset_duration_minutes: u32,
    pub custom_duration_minutes: String,
    pub mode: CalculationMode,
    pub selected_exercise: String,
    pub age: String,
    pub gender_at_birth: Gender,
    pub heart_rate_bpm: String,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            weight_value: 70.0,
            weight_unit: WeightUnit::Kg,
            preset_duration_minutes: 30,
            custom_duration_minutes: String::new(),
            mode: CalculationMode::Met,
            selected_exercise: "걷기".to_string(),
            age: String::new(),
            gender_at_birth: Gender::Male,
            heart_rate_bpm: String::new(),
        }
    }
}

impl InputSnapshot {
    /// The duration text actually used: custom when non-empty, else the preset
    pub fn effective_duration_text(&self) -> String {
        if self.custom_duration_minutes.is_empty() {
            self.preset_duration_minutes.to_string()
        } else {
            self.custom_duration_minutes.clone()
        }
    }
}
