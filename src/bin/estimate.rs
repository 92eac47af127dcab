//! One-shot calorie estimate from the command line
//! Usage: cargo run --bin estimate -- weight=80 unit=kg duration=45 exercise=하이킹
//!        cargo run --bin estimate -- mode=HR age=30 gender=female heart_rate=140 custom_duration=25

use fitcalc::tools::calculator::{estimate_calories, CalculatorEdit};

fn parse_edit(args: &[String]) -> Result<CalculatorEdit, String> {
    let mut edit = CalculatorEdit::default();

    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got '{}'", arg))?;

        match key {
            "weight" => {
                edit.weight = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid weight: '{}'", value))?,
                )
            }
            "unit" => edit.unit = Some(value.to_string()),
            "duration" | "preset_duration" => {
                edit.preset_duration = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid preset duration: '{}'", value))?,
                )
            }
            "custom_duration" => edit.custom_duration = Some(value.to_string()),
            "exercise" => edit.exercise = Some(value.to_string()),
            "mode" => edit.mode = Some(value.to_string()),
            "age" => edit.age = Some(value.to_string()),
            "gender" => edit.gender = Some(value.to_string()),
            "heart_rate" | "hr" => edit.heart_rate = Some(value.to_string()),
            _ => return Err(format!("Unknown field: '{}'", key)),
        }
    }

    Ok(edit)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let edit = parse_edit(&args)?;
    let view = estimate_calories(&edit)?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
