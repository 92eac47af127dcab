//! Calorie estimation engine
//!
//! Two formulas behind one entry point:
//!
//! * MET: `MET × weight_kg × hours`
//! * HR: a sex-specific heart-rate regression, scaled by `minutes / 4.184`
//!   (kJ per minute to kcal)
//!
//! Everything here is pure. Degenerate input (empty or non-numeric fields,
//! unknown exercises) produces a number, never an error.

use serde::Serialize;

use super::units::{coerce_number, round_half_up, to_kg};
use crate::models::{met_for, met_or_default, CalculationMode, Gender, InputSnapshot, WeightUnit};

/// Calories burned, always a non-negative whole number
pub type CalorieEstimate = u32;

/// Divisor turning the regression's kJ/min into kcal over the session
const KJ_PER_KCAL: f64 = 4.184;

/// Coefficients of `age×a + hr×h − kg×w − c`
#[derive(Debug, Clone, Copy)]
struct HrCoefficients {
    age: f64,
    heart_rate: f64,
    weight: f64,
    intercept: f64,
}

const HR_MALE: HrCoefficients = HrCoefficients {
    age: 0.2017,
    heart_rate: 0.6309,
    weight: 0.09036,
    intercept: 55.0969,
};

const HR_FEMALE: HrCoefficients = HrCoefficients {
    age: 0.074,
    heart_rate: 0.4472,
    weight: 0.05741,
    intercept: 20.4022,
};

impl HrCoefficients {
    fn for_gender(gender: Gender) -> Self {
        match gender {
            Gender::Male => HR_MALE,
            Gender::Female => HR_FEMALE,
        }
    }
}

/// Estimate calories burned for a snapshot
pub fn estimate(snapshot: &InputSnapshot) -> CalorieEstimate {
    let weight_kg = to_kg(snapshot.weight_value, snapshot.weight_unit);
    let minutes = effective_duration_minutes(snapshot);

    let raw = match snapshot.mode {
        CalculationMode::Met => met_calories(
            met_or_default(&snapshot.selected_exercise),
            weight_kg,
            minutes,
        ),
        CalculationMode::Hr => hr_calories(
            snapshot.gender_at_birth,
            coerce_number(&snapshot.age),
            coerce_number(&snapshot.heart_rate_bpm),
            weight_kg,
            minutes,
        ),
    };

    to_estimate(raw)
}

/// Resolve the duration in minutes. Custom text wins when non-empty.
pub fn effective_duration_minutes(snapshot: &InputSnapshot) -> f64 {
    if snapshot.custom_duration_minutes.is_empty() {
        f64::from(snapshot.preset_duration_minutes)
    } else {
        coerce_number(&snapshot.custom_duration_minutes)
    }
}

/// Unrounded MET estimate
pub fn met_calories(met: f64, weight_kg: f64, minutes: f64) -> f64 {
    met * weight_kg * (minutes / 60.0)
}

/// Unrounded, unclamped heart-rate estimate
pub fn hr_calories(gender: Gender, age: f64, heart_rate_bpm: f64, weight_kg: f64, minutes: f64) -> f64 {
    let c = HrCoefficients::for_gender(gender);
    (age * c.age + heart_rate_bpm * c.heart_rate - weight_kg * c.weight - c.intercept)
        * (minutes / KJ_PER_KCAL)
}

/// Clamp to zero and round. NaN and infinities collapse to zero.
fn to_estimate(raw: f64) -> CalorieEstimate {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let rounded = round_half_up(raw);
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Inputs that went into an estimate, as shown next to the result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationDetails {
    pub mode: &'static str,
    pub weight_value: f64,
    pub weight_unit: WeightUnit,
    pub weight_kg: f64,
    pub duration_minutes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,
    /// Table value; absent when the exercise is unknown even though 3.0 is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub met: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate_bpm: Option<String>,
}

/// Describe the fields that matter for the snapshot's mode
pub fn details(snapshot: &InputSnapshot) -> CalculationDetails {
    let mut d = CalculationDetails {
        mode: snapshot.mode.as_str(),
        weight_value: snapshot.weight_value,
        weight_unit: snapshot.weight_unit,
        weight_kg: to_kg(snapshot.weight_value, snapshot.weight_unit),
        duration_minutes: snapshot.effective_duration_text(),
        exercise: None,
        met: None,
        age: None,
        gender: None,
        heart_rate_bpm: None,
    };

    match snapshot.mode {
        CalculationMode::Met => {
            d.exercise = Some(snapshot.selected_exercise.clone());
            d.met = met_for(&snapshot.selected_exercise);
        }
        CalculationMode::Hr => {
            d.age = Some(snapshot.age.clone());
            d.gender = Some(snapshot.gender_at_birth.as_str());
            d.heart_rate_bpm = Some(snapshot.heart_rate_bpm.clone());
        }
    }

    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn met_snapshot(exercise: &str, weight: f64, minutes: u32) -> InputSnapshot {
        InputSnapshot {
            weight_value: weight,
            preset_duration_minutes: minutes,
            selected_exercise: exercise.to_string(),
            ..InputSnapshot::default()
        }
    }

    fn hr_snapshot(gender: Gender, age: &str, hr: &str, weight: f64, minutes: u32) -> InputSnapshot {
        InputSnapshot {
            mode: CalculationMode::Hr,
            gender_at_birth: gender,
            age: age.to_string(),
            heart_rate_bpm: hr.to_string(),
            weight_value: weight,
            preset_duration_minutes: minutes,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn test_met_walking() {
        assert_eq!(estimate(&met_snapshot("걷기", 70.0, 30)), 105);
    }

    #[test]
    fn test_met_unknown_exercise_uses_default() {
        assert_eq!(estimate(&met_snapshot("nonexistent", 60.0, 60)), 180);
    }

    #[test]
    fn test_met_hiking() {
        // 6.0 × 80 × 0.75 = 360
        assert_eq!(estimate(&met_snapshot("하이킹", 80.0, 45)), 360);
    }

    #[test]
    fn test_met_rounds_half_up() {
        // 2.5 × 70 × 0.25 = 43.75
        assert_eq!(estimate(&met_snapshot("실내 산책", 70.0, 15)), 44);
        // 3.0 × 1 × 0.5 = 1.5
        assert_eq!(estimate(&met_snapshot("걷기", 1.0, 30)), 2);
    }

    #[test]
    fn test_lbs_are_converted() {
        let mut s = met_snapshot("걷기", 154.0, 60);
        s.weight_unit = WeightUnit::Lbs;
        // 3.0 × 69.853168 = 209.56
        assert_eq!(estimate(&s), 210);
    }

    #[test]
    fn test_unit_invariance() {
        let mut lbs = met_snapshot("하이킹", 154.0, 40);
        lbs.weight_unit = WeightUnit::Lbs;
        let kg = met_snapshot("하이킹", 154.0 * 0.453592, 40);
        let diff = i64::from(estimate(&lbs)) - i64::from(estimate(&kg));
        assert!(diff.abs() <= 1);
    }

    #[test]
    fn test_custom_duration_overrides_preset() {
        for preset in [15, 30, 60] {
            let mut s = met_snapshot("걷기", 70.0, preset);
            s.custom_duration_minutes = "10".to_string();
            assert_eq!(effective_duration_minutes(&s), 10.0);
            assert_eq!(estimate(&s), 35);
        }
    }

    #[test]
    fn test_non_numeric_custom_duration_is_zero() {
        let mut s = met_snapshot("걷기", 70.0, 30);
        s.custom_duration_minutes = "abc".to_string();
        assert!(effective_duration_minutes(&s).is_nan());
        assert_eq!(estimate(&s), 0);

        s.mode = CalculationMode::Hr;
        s.age = "30".to_string();
        s.heart_rate_bpm = "150".to_string();
        assert_eq!(estimate(&s), 0);
    }

    #[test]
    fn test_met_monotonic() {
        let exercises = ["실내 산책", "걷기", "하이킹"];
        let mut last_by_met = 0;
        for ex in exercises {
            let e = estimate(&met_snapshot(ex, 70.0, 30));
            assert!(e >= last_by_met);
            last_by_met = e;
        }

        let mut last = 0;
        for w in [0.0, 10.0, 45.5, 70.0, 120.0, 200.0] {
            let e = estimate(&met_snapshot("걷기", w, 30));
            assert!(e >= last);
            last = e;
        }

        let mut last = 0;
        for &d in crate::models::PRESET_DURATIONS_MINUTES {
            let e = estimate(&met_snapshot("걷기", 70.0, d));
            assert!(e >= last);
            last = e;
        }
    }

    #[test]
    fn test_hr_negative_clamps_to_zero() {
        let s = hr_snapshot(Gender::Male, "20", "60", 100.0, 15);
        assert!(hr_calories(Gender::Male, 20.0, 60.0, 100.0, 15.0) < 0.0);
        assert_eq!(estimate(&s), 0);
    }

    #[test]
    fn test_hr_male() {
        // (30×0.2017 + 150×0.6309 − 80×0.09036 − 55.0969) × (30 / 4.184)
        // = 38.3603 × 7.1702 = 275.05
        let s = hr_snapshot(Gender::Male, "30", "150", 80.0, 30);
        assert_eq!(estimate(&s), 275);
    }

    #[test]
    fn test_hr_female() {
        // (30×0.074 + 150×0.4472 − 60×0.05741 − 20.4022) × (30 / 4.184)
        // = 45.4532 × 7.1702 = 325.9
        let s = hr_snapshot(Gender::Female, "30", "150", 60.0, 30);
        assert_eq!(estimate(&s), 326);
    }

    #[test]
    fn test_hr_empty_fields_are_zero() {
        // Only the intercept and weight terms remain, which is negative
        let s = hr_snapshot(Gender::Female, "", "", 60.0, 30);
        assert_eq!(estimate(&s), 0);
    }

    #[test]
    fn test_negative_weight_never_negative_estimate() {
        assert_eq!(estimate(&met_snapshot("걷기", -70.0, 30)), 0);
    }

    #[test]
    fn test_details_met() {
        let d = details(&met_snapshot("nonexistent", 70.0, 30));
        assert_eq!(d.mode, "MET");
        assert_eq!(d.exercise.as_deref(), Some("nonexistent"));
        assert_eq!(d.met, None);
        assert_eq!(d.duration_minutes, "30");
        assert!(d.age.is_none());
    }

    #[test]
    fn test_details_hr() {
        let mut s = hr_snapshot(Gender::Female, "41", "132", 150.0, 20);
        s.weight_unit = WeightUnit::Lbs;
        s.custom_duration_minutes = "25".to_string();
        let d = details(&s);
        assert_eq!(d.mode, "HR");
        assert_eq!(d.gender, Some("female"));
        assert_eq!(d.heart_rate_bpm.as_deref(), Some("132"));
        assert_eq!(d.duration_minutes, "25");
        assert!((d.weight_kg - 68.0388).abs() < 1e-9);
        assert!(d.exercise.is_none());
    }
}
