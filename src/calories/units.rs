//! Unit conversion and numeric coercion
//!
//! Form fields arrive as text. These helpers turn them into numbers the same
//! way a browser number field does, so degenerate input never becomes an error.

use crate::models::WeightUnit;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Convert a weight to kilograms
pub fn to_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => value,
        WeightUnit::Lbs => value * KG_PER_LB,
    }
}

/// Coerce field text to a number.
///
/// Surrounding whitespace is ignored and empty text is `0.0`. Anything that
/// does not parse as a decimal number is NaN.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let lower = trimmed.to_ascii_lowercase();
    // Rust accepts these spellings, number fields do not
    if lower.contains("inf") || lower.contains("nan") {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Round half up (toward positive infinity), e.g. `2.5 -> 3`, `-2.5 -> -2`
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
