//! Analysis result interpretation
//!
//! Turns an untrusted classify response into display strings. Every field is
//! read on its own; a missing or mistyped field only affects its own display
//! value. Nothing in this module can fail.

use serde_json::Value;

use crate::calories::{coerce_number, round_half_up};
use crate::models::{AnalysisData, AnalysisResponse, AnalysisViewModel, UNKNOWN_SENTINEL};

/// Message shown when a failed request carries no usable explanation
pub const REQUEST_FAILED_MESSAGE: &str = "요청 실패";

/// Result of reading one response field
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Present(T),
    /// Absent, null, or empty
    Missing,
    /// Present but not usable for display
    Invalid,
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    /// Keep `self` when present, otherwise try `next`
    pub fn or_else<F: FnOnce() -> Field<T>>(self, next: F) -> Field<T> {
        match self {
            Field::Present(v) => Field::Present(v),
            Field::Missing | Field::Invalid => next(),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Missing | Field::Invalid => None,
        }
    }
}

/// Interpret a classify response for display
pub fn interpret(response: &AnalysisResponse) -> AnalysisViewModel {
    let empty = AnalysisData::default();
    let data = response.data.as_ref().unwrap_or(&empty);

    let calories = read_calories(data.calories_kcal.as_ref());
    let label = read_text(data.label_ko.as_ref()).or_else(|| read_text(data.label.as_ref()));
    let confidence = read_confidence(data.confidence.as_ref());
    let serving =
        read_text(data.serving_ko.as_ref()).or_else(|| read_text(data.serving.as_ref()));
    let notes = read_text(data.notes_ko.as_ref()).or_else(|| read_text(data.notes.as_ref()));

    let calories_kcal = calories.into_option();

    AnalysisViewModel {
        calories_kcal,
        calories_display: calories_kcal
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string()),
        label_display: label.into_option().unwrap_or_else(|| UNKNOWN_SENTINEL.to_string()),
        confidence_display: confidence
            .into_option()
            .map(to_fixed_2)
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string()),
        serving_display: serving.into_option().unwrap_or_else(|| UNKNOWN_SENTINEL.to_string()),
        notes_display: notes.into_option().unwrap_or_default(),
        summary: read_text(response.text.as_ref()).into_option(),
    }
}

/// Error message for a response that came back with a non-success status
pub fn failure_message(response: &AnalysisResponse) -> String {
    read_text(response.detail.as_ref())
        .or_else(|| read_text(response.error.as_ref()))
        .into_option()
        .unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string())
}

fn read_calories(value: Option<&Value>) -> Field<i64> {
    match value {
        None | Some(Value::Null) => Field::Missing,
        Some(v) => {
            let n = to_number(v);
            if n.is_finite() {
                Field::Present(round_half_up(n) as i64)
            } else {
                Field::Invalid
            }
        }
    }
}

/// A present confidence is always shown, even when it is not a number
fn read_confidence(value: Option<&Value>) -> Field<f64> {
    match value {
        None | Some(Value::Null) => Field::Missing,
        Some(v) => Field::Present(to_number(v)),
    }
}

/// Two decimal places with ties rounded away from zero. NaN and the
/// infinities print as words.
fn to_fixed_2(c: f64) -> String {
    if c.is_nan() {
        return "NaN".to_string();
    }
    if c.is_infinite() {
        return if c > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let scaled = round_half_up(c.abs() * 100.0) / 100.0;
    format!("{:.2}", scaled.copysign(c))
}

/// Read a field as display text. Falsy values (`""`, `0`, `false`) count as
/// missing; objects and arrays have no text form.
fn read_text(value: Option<&Value>) -> Field<String> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Field::Missing,
        Some(Value::Bool(true)) => Field::Present("true".to_string()),
        Some(Value::String(s)) if s.is_empty() => Field::Missing,
        Some(Value::String(s)) => Field::Present(s.clone()),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f == 0.0 || f.is_nan() => Field::Missing,
            Some(f) => Field::Present(format_number(f)),
            None => Field::Invalid,
        },
        Some(Value::Array(_)) | Some(Value::Object(_)) => Field::Invalid,
    }
}

/// Numeric value of a JSON field, NaN when it has none
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => coerce_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [Value::Null] => 0.0,
            [Value::Bool(_)] | [Value::Object(_)] => f64::NAN,
            [single] => to_number(single),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// Whole numbers print without a fractional part
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(body: Value) -> AnalysisViewModel {
        interpret(&AnalysisResponse::from_value(body))
    }

    #[test]
    fn test_full_korean_response() {
        let vm = view(json!({
            "text": "음식 이름 : 비빔밥 (신뢰도: 0.87)",
            "data": {
                "label": "bibimbap",
                "label_ko": "비빔밥",
                "confidence": 0.87,
                "calories_kcal": 560.4,
                "serving": "1 bowl",
                "serving_ko": "1그릇",
                "notes": "estimate",
                "notes_ko": "추정치"
            }
        }));
        assert_eq!(vm.calories_kcal, Some(560));
        assert_eq!(vm.calories_display, "560");
        assert_eq!(vm.label_display, "비빔밥");
        assert_eq!(vm.confidence_display, "0.87");
        assert_eq!(vm.serving_display, "1그릇");
        assert_eq!(vm.notes_display, "추정치");
        assert_eq!(vm.summary.as_deref(), Some("음식 이름 : 비빔밥 (신뢰도: 0.87)"));
    }

    #[test]
    fn test_english_fallbacks() {
        let vm = view(json!({
            "data": {"label": "pizza", "serving": "1 slice", "notes": "cheese", "label_ko": ""}
        }));
        assert_eq!(vm.label_display, "pizza");
        assert_eq!(vm.serving_display, "1 slice");
        assert_eq!(vm.notes_display, "cheese");
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let vm = view(json!({}));
        assert_eq!(vm.calories_kcal, None);
        assert_eq!(vm.calories_display, UNKNOWN_SENTINEL);
        assert_eq!(vm.label_display, UNKNOWN_SENTINEL);
        assert_eq!(vm.confidence_display, UNKNOWN_SENTINEL);
        assert_eq!(vm.serving_display, UNKNOWN_SENTINEL);
        assert_eq!(vm.notes_display, "");
        assert_eq!(vm.summary, None);
    }

    #[test]
    fn test_fields_are_independent() {
        let vm = view(json!({"data": {"calories_kcal": {"bad": 1}, "label": "rice"}}));
        assert_eq!(vm.calories_display, UNKNOWN_SENTINEL);
        assert_eq!(vm.label_display, "rice");
    }

    #[test]
    fn test_calories_coercion() {
        assert_eq!(view(json!({"data": {"calories_kcal": "250"}})).calories_display, "250");
        assert_eq!(view(json!({"data": {"calories_kcal": 99.5}})).calories_display, "100");
        assert_eq!(view(json!({"data": {"calories_kcal": "lots"}})).calories_display, "-");
        assert_eq!(view(json!({"data": {"calories_kcal": null}})).calories_display, "-");
        // empty text coerces to zero, which is a real number
        assert_eq!(view(json!({"data": {"calories_kcal": ""}})).calories_display, "0");
        assert_eq!(view(json!({"data": {"calories_kcal": [310]}})).calories_display, "310");
    }

    #[test]
    fn test_confidence_formatting() {
        assert_eq!(view(json!({"data": {"confidence": 0.5}})).confidence_display, "0.50");
        assert_eq!(view(json!({"data": {"confidence": "0.912"}})).confidence_display, "0.91");
        assert_eq!(view(json!({"data": {"confidence": 1}})).confidence_display, "1.00");
        assert_eq!(view(json!({"data": {"confidence": 0}})).confidence_display, "0.00");
        assert_eq!(view(json!({"data": {"confidence": "high"}})).confidence_display, "NaN");
        assert_eq!(view(json!({"data": {"confidence": {"p": 1}}})).confidence_display, "NaN");
        assert_eq!(view(json!({"data": {"confidence": "1e400"}})).confidence_display, "Infinity");
    }

    #[test]
    fn test_confidence_ties_round_up() {
        let shown = |c: f64| view(json!({"data": {"confidence": c}})).confidence_display;
        assert_eq!(shown(0.125), "0.13");
        assert_eq!(shown(0.375), "0.38");
        assert_eq!(shown(0.625), "0.63");
        assert_eq!(shown(0.875), "0.88");
        assert_eq!(shown(-0.125), "-0.13");
        // 0.285 is stored just below the tie
        assert_eq!(shown(0.285), "0.28");
    }

    #[test]
    fn test_numeric_label_is_shown() {
        assert_eq!(view(json!({"data": {"label": 7}})).label_display, "7");
        assert_eq!(view(json!({"data": {"label": 0, "label_ko": false}})).label_display, "-");
        assert_eq!(view(json!({"data": {"serving": ["a"]}})).serving_display, "-");
    }

    #[test]
    fn test_interpret_is_idempotent() {
        let resp = AnalysisResponse::from_value(json!({
            "data": {"label_ko": "떡볶이", "calories_kcal": 480, "confidence": 0.66}
        }));
        assert_eq!(interpret(&resp), interpret(&resp));
    }

    #[test]
    fn test_failure_message() {
        let msg = |body: Value| failure_message(&AnalysisResponse::from_value(body));
        assert_eq!(msg(json!({"detail": "too large"})), "too large");
        assert_eq!(msg(json!({"error": "chat classify failed", "detail": "quota"})), "quota");
        assert_eq!(msg(json!({"error": "local model not available"})), "local model not available");
        assert_eq!(msg(json!({"detail": [{"loc": ["body", "image"]}]})), REQUEST_FAILED_MESSAGE);
        assert_eq!(msg(json!({})), REQUEST_FAILED_MESSAGE);
        assert_eq!(msg(Value::Null), REQUEST_FAILED_MESSAGE);
    }

    #[test]
    fn test_field_or_else() {
        let f: Field<i32> = Field::Invalid;
        assert_eq!(f.or_else(|| Field::Present(2)), Field::Present(2));
        assert!(Field::Present(1).or_else(|| Field::Present(2)).is_present());
        assert_eq!(Field::<i32>::Missing.into_option(), None);
    }
}
