//! Fitness Calculator (fitcalc)
//!
//! An MCP server for exercise calorie estimates and food photo analysis.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use fitcalc::analysis::HttpClassifier;
use fitcalc::build_info;
use fitcalc::config::Config;
use fitcalc::mcp::FitcalcService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fitcalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env()?;
    let classifier = HttpClassifier::from_config(&config)?;
    eprintln!("Classify endpoint: {}", classifier.endpoint());

    let service = FitcalcService::new(classifier.endpoint().to_string(), Arc::new(classifier));

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
