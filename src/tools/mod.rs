//! fitcalc Tools module
//!
//! Session controllers and tool implementations behind the MCP server.

pub mod calculator;
pub mod food_analyzer;
pub mod status;

pub use calculator::{CalculatorController, CalculatorEdit, CalculatorView, EditError};
pub use food_analyzer::{AnalysisStatus, AnalyzeError, FoodAnalyzer, RequestState};
