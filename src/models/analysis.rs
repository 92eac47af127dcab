//! Food analysis response and view model
//!
//! The classify endpoint is an external service, so nothing about its body is
//! trusted: every field is optional and kept as a raw JSON value until the
//! interpreter decides what it can display.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Display value for anything that could not be determined
pub const UNKNOWN_SENTINEL: &str = "-";

/// The nested `data` object of a classify response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisData {
    pub calories_kcal: Option<Value>,
    pub label_ko: Option<Value>,
    pub label: Option<Value>,
    pub confidence: Option<Value>,
    pub serving_ko: Option<Value>,
    pub serving: Option<Value>,
    pub notes_ko: Option<Value>,
    pub notes: Option<Value>,
}

/// A classify response body, success or failure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    #[serde(deserialize_with = "object_or_none")]
    pub data: Option<AnalysisData>,
    /// Human-readable summary the endpoint renders next to `data`
    pub text: Option<Value>,
    pub detail: Option<Value>,
    pub error: Option<Value>,
}

impl AnalysisResponse {
    /// Build from any JSON value. Non-object bodies yield an empty response.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// `data` that is not a JSON object is treated as absent
fn object_or_none<'de, D>(deserializer: D) -> Result<Option<AnalysisData>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Display-ready projection of an [`AnalysisResponse`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisViewModel {
    /// Rounded calorie estimate, when one could be read
    pub calories_kcal: Option<i64>,
    pub calories_display: String,
    pub label_display: String,
    pub confidence_display: String,
    pub serving_display: String,
    /// Empty when the endpoint sent no notes
    pub notes_display: String,
    pub summary: Option<String>,
}
