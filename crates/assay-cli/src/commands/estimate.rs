//! Estimate command - quality estimate from dataset shape alone.

use std::time::Instant;

use assay::{DatasetShape, ShapeAssessment, ShapeEstimator};
use colored::Colorize;
use serde::Serialize;

use super::load_quality_config;
use crate::cli::GlobalOptions;

#[derive(Serialize)]
struct EstimateOutput<'a> {
    #[serde(flatten)]
    assessment: &'a ShapeAssessment,
    latency_ms: f64,
}

pub fn run(
    shape: DatasetShape,
    json_output: bool,
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let estimator = ShapeEstimator::with_config(load_quality_config(global)?)?;

    let start = Instant::now();
    let assessment = estimator.estimate(&shape)?;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    if json_output {
        let output = EstimateOutput {
            assessment: &assessment,
            latency_ms,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Quality score: {} ({})",
        format!("{:.3}", assessment.quality_score).white().bold(),
        if assessment.ok_for_model {
            "ok for modeling".green()
        } else {
            "needs attention".red()
        }
    );
    println!("{}", assessment.message);
    println!();

    let flag = |set: bool| if set { "true".red() } else { "false".dimmed() };
    println!("  {:<18} {}", "too_few_rows", flag(assessment.flags.too_few_rows));
    println!("  {:<18} {}", "too_many_columns", flag(assessment.flags.too_many_columns));
    println!("  {:<18} {}", "has_high_missing", flag(assessment.flags.has_high_missing));
    println!("  {:<18} {:.2} ms", "latency", latency_ms);

    Ok(())
}
