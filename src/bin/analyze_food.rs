//! Analyze one food photo against the configured classify endpoint
//! Usage: cargo run --bin analyze_food -- path/to/photo.jpg

use std::path::PathBuf;
use std::sync::Arc;

use fitcalc::analysis::HttpClassifier;
use fitcalc::config::Config;
use fitcalc::tools::FoodAnalyzer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("Usage: analyze_food <image>")?;

    let config = Config::from_env()?;
    let classifier = HttpClassifier::from_config(&config)?;
    println!("Endpoint: {}", classifier.endpoint());

    let analyzer = FoodAnalyzer::new(Arc::new(classifier));
    analyzer.select_image(path).await?;

    match analyzer.analyze().await {
        Ok(result) => {
            println!("음식 이름 : {}", result.label_display);
            println!("칼로리    : {} kcal", result.calories_display);
            println!("신뢰도    : {}", result.confidence_display);
            println!("1회 제공량 : {}", result.serving_display);
            if !result.notes_display.is_empty() {
                println!("메모      : {}", result.notes_display);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
