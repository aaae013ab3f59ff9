//! Overview command - dataset shape and per-column statistics.

use std::path::PathBuf;

use assay::ColumnKind;
use colored::Colorize;

use super::{build_assay, ensure_exists};
use crate::cli::GlobalOptions;

pub fn run(
    file: PathBuf,
    json_output: bool,
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let assay = build_assay(global, |_| {})?;
    let result = assay.analyze(&file)?;
    let rows = assay::flatten_summary(&result.summary);

    if json_output {
        let overview = serde_json::json!({
            "file": result.source.file,
            "n_rows": result.summary.n_rows,
            "n_cols": result.summary.n_cols,
            "columns": rows,
        });
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Overview of".cyan().bold(),
        result.source.file.white()
    );
    println!(
        "Rows: {}  Columns: {}  Format: {}",
        result.summary.n_rows.to_string().white().bold(),
        result.summary.n_cols.to_string().white().bold(),
        result.source.format
    );
    println!();

    println!(
        "{}",
        format!(
            "  {:<24} {:<12} {:>8} {:>8} {:>8} {:>12} {:>12} {:>12} {:>12}",
            "name", "kind", "missing", "share", "unique", "mean", "std", "min", "max"
        )
        .yellow()
        .bold()
    );

    let num = |v: Option<f64>| v.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".into());
    for row in &rows {
        let kind = match row.kind {
            ColumnKind::Numeric => format!("{:<12}", row.kind).blue(),
            ColumnKind::Categorical => format!("{:<12}", row.kind).magenta(),
            ColumnKind::Unknown => format!("{:<12}", row.kind).dimmed(),
        };
        let share = format!("{:>8.3}", row.missing_share);
        let share = if row.missing_share > 0.5 {
            share.red()
        } else if row.missing_share > 0.0 {
            share.yellow()
        } else {
            share.normal()
        };

        println!(
            "  {:<24} {} {:>8} {} {:>8} {:>12} {:>12} {:>12} {:>12}",
            row.name,
            kind,
            row.n_missing,
            share,
            row.n_unique,
            num(row.mean),
            num(row.std),
            num(row.min),
            num(row.max)
        );
    }

    Ok(())
}
