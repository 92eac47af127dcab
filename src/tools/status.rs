//! fitcalc Status Tool
//!
//! Provides runtime status information about the fitcalc service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Calculator usage instructions for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# fitcalc Instructions

## Calorie Calculator

The calculator keeps one form. Every edit recomputes the estimate immediately.

1. Call `list_exercises` to see the exercise names, MET values and preset durations.
2. Call `update_calculator` with only the fields that changed:
   - `weight` (number) and `unit` (`kg` or `lbs`)
   - `preset_duration` (15, 20, 25, 30, 35, 40, 45, 60) or `custom_duration` (minutes as text)
   - `mode`: `MET` (uses `exercise`) or `HR` (uses `age`, `gender`, `heart_rate`)
3. Read `calories` from the response. `get_calculator` shows the current state.

Rules:
- A non-empty `custom_duration` always wins over the preset. Choosing a preset clears it.
- Unknown exercise names use MET 3.0.
- Empty age or heart rate count as 0. Heart-rate estimates below zero are reported as 0.
- `estimate_calories` computes a one-off estimate without touching the form.

## Food Photo Analysis

1. `select_food_image` with an absolute path to a photo (jpg, png, webp, ...).
2. `analyze_food_image` uploads it and returns calories, food name, confidence,
   serving and notes. `-` means the service did not provide that value.
3. Only one analysis runs at a time. If one is in progress, wait and check
   `get_food_analysis`.
4. On failure the message from the service is returned. Call `analyze_food_image`
   again to retry.
"#;

/// Runtime status of the fitcalc service
#[derive(Debug, Clone, Serialize)]
pub struct FitcalcStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Classification endpoint
    pub classify_endpoint: String,
    pub analysis_state: String,

    /// Process information
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    classify_endpoint: String,
}

impl StatusTracker {
    pub fn new(classify_endpoint: String) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            classify_endpoint,
        }
    }

    /// Get the current status
    pub fn get_status(&self, analysis_state: &str) -> FitcalcStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitcalcStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            classify_endpoint: self.classify_endpoint.clone(),
            analysis_state: analysis_state.to_string(),
            started_at: self.started_at,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
