//! Calorie estimation module
//!
//! MET and heart-rate formulas plus the unit and numeric helpers they share.

pub mod engine;
pub mod units;

pub use engine::{
    details, effective_duration_minutes, estimate, hr_calories, met_calories, CalculationDetails,
    CalorieEstimate,
};
pub use units::{coerce_number, round_half_up, to_kg, KG_PER_LB};
