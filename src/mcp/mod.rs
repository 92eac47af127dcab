//! MCP server module

mod server;

pub use server::{AnalyzeFoodImageParams, FitcalcService, SelectFoodImageParams};
