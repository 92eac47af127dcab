//! fitcalc MCP Server Implementation
//!
//! Implements the MCP server with all fitcalc tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::analysis::Classifier;
use crate::tools::calculator::{self, CalculatorController, CalculatorEdit};
use crate::tools::food_analyzer::FoodAnalyzer;
use crate::tools::status::StatusTracker;

/// fitcalc MCP Service
#[derive(Clone)]
pub struct FitcalcService {
    status_tracker: Arc<StatusTracker>,
    calculator: Arc<Mutex<CalculatorController>>,
    analyzer: FoodAnalyzer,
    tool_router: ToolRouter<FitcalcService>,
}

impl FitcalcService {
    pub fn new(classify_endpoint: String, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(classify_endpoint)),
            calculator: Arc::new(Mutex::new(CalculatorController::new())),
            analyzer: FoodAnalyzer::new(classifier),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectFoodImageParams {
    /// Path to an image file
    pub file_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeFoodImageParams {
    /// Optional image to select before analyzing
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct ToolErrorResponse {
    error: String,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn error_json(message: String) -> Result<CallToolResult, McpError> {
    to_json(&ToolErrorResponse { error: message })
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl FitcalcService {
    // --- Status ---

    #[tool(description = "Get the current status of the fitcalc service including build info, classify endpoint, analysis state, and process information")]
    async fn fitcalc_status(&self) -> Result<CallToolResult, McpError> {
        let state = self.analyzer.request_state().await;
        let status = self.status_tracker.get_status(state.as_str());
        to_json(&status)
    }

    #[tool(description = "Get instructions for using the calorie calculator and food photo analysis tools. Call this when unsure how the tools fit together.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "List exercises with their MET values and the preset workout durations")]
    fn list_exercises(&self) -> Result<CallToolResult, McpError> {
        to_json(&calculator::list_exercises())
    }

    #[tool(description = "Estimate calories for a one-off set of inputs without changing the calculator. Unspecified fields use the form defaults (70 kg, 30 min, 걷기, MET).")]
    fn estimate_calories(&self, Parameters(edit): Parameters<CalculatorEdit>) -> Result<CallToolResult, McpError> {
        match calculator::estimate_calories(&edit) {
            Ok(view) => to_json(&view),
            Err(e) => error_json(e),
        }
    }

    #[tool(description = "Get the calculator's current inputs, calorie estimate, and calculation details")]
    async fn get_calculator(&self) -> Result<CallToolResult, McpError> {
        let calc = self.calculator.lock().await;
        to_json(&calc.view())
    }

    #[tool(description = "Edit calculator fields. Only the given fields change; the estimate is recomputed after each edit. Returns the updated calculator.")]
    async fn update_calculator(&self, Parameters(edit): Parameters<CalculatorEdit>) -> Result<CallToolResult, McpError> {
        let mut calc = self.calculator.lock().await;
        calc.apply(&edit)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        to_json(&calc.view())
    }

    #[tool(description = "Reset the calculator to its initial inputs")]
    async fn reset_calculator(&self) -> Result<CallToolResult, McpError> {
        let mut calc = self.calculator.lock().await;
        calc.reset();
        to_json(&calc.view())
    }

    // --- Food Analysis ---

    #[tool(description = "Choose the food photo to analyze. Clears the previous result.")]
    async fn select_food_image(&self, Parameters(p): Parameters<SelectFoodImageParams>) -> Result<CallToolResult, McpError> {
        match self.analyzer.select_image(PathBuf::from(&p.file_path)).await {
            Ok(()) => to_json(&self.analyzer.status().await),
            Err(e) => error_json(e.to_string()),
        }
    }

    #[tool(description = "Upload the selected food photo for analysis and return estimated calories, food name, confidence, serving size and notes. Only one analysis can run at a time.")]
    async fn analyze_food_image(&self, Parameters(p): Parameters<AnalyzeFoodImageParams>) -> Result<CallToolResult, McpError> {
        if let Some(path) = p.file_path {
            if let Err(e) = self.analyzer.select_image(PathBuf::from(path)).await {
                return error_json(e.to_string());
            }
        }

        match self.analyzer.analyze().await {
            Ok(result) => to_json(&result),
            Err(e) => error_json(e.to_string()),
        }
    }

    #[tool(description = "Get the state of the food photo analysis: idle, loading, done (with result) or error (with message)")]
    async fn get_food_analysis(&self) -> Result<CallToolResult, McpError> {
        to_json(&self.analyzer.status().await)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitcalcService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fitcalc".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Fitness Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Fitness Calculator (fitcalc) - exercise calorie estimates and food photo analysis. \
                 Call calculator_instructions first if unsure. \
                 Calculator: list_exercises, get_calculator, update_calculator, reset_calculator, estimate_calories. \
                 Food photos: select_food_image, analyze_food_image, get_food_analysis. \
                 Status: fitcalc_status."
                    .into(),
            ),
        }
    }
}
