//! Report command - write a report bundle to a directory.

use std::path::PathBuf;

use assay::ReportWriter;
use colored::Colorize;

use super::{build_assay, ensure_exists};
use crate::cli::GlobalOptions;

/// Settings specific to the report command.
pub struct ReportArgs {
    pub out_dir: PathBuf,
    pub top_k: usize,
    pub max_columns: usize,
    pub min_missing_share: f64,
    pub title: String,
}

pub fn run(
    file: PathBuf,
    args: ReportArgs,
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;
    if !(0.0..=1.0).contains(&args.min_missing_share) {
        return Err(format!(
            "--min-missing-share must be between 0 and 1, got {}",
            args.min_missing_share
        )
        .into());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let assay = build_assay(global, |config| {
        config.top_k = args.top_k;
        config.max_category_columns = args.max_columns;
    })?;
    let result = assay.analyze(&file)?;

    let written = ReportWriter::new(&args.out_dir)
        .with_title(args.title)
        .with_min_missing_share(args.min_missing_share)
        .write(&result)?;

    println!(
        "Quality score: {} ({})",
        format!("{:.3}", result.flags.quality_score).white().bold(),
        if result.flags.ok_for_model {
            "ok for modeling".green()
        } else {
            "needs attention".red()
        }
    );
    println!(
        "{} {} files to {}",
        "Wrote".green().bold(),
        written.len(),
        args.out_dir.display()
    );
    for path in &written {
        println!("  {}", path.display().to_string().dimmed());
    }

    Ok(())
}
