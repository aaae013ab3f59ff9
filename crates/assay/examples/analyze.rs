//! Example: Analyze a tabular data file with Assay.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- data/customers.csv

use std::env;
use std::path::Path;

use assay::Assay;

fn main() -> assay::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Assay Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let result = Assay::new().analyze(path)?;

    println!("## Source Metadata");
    println!("  File: {}", result.source.file);
    println!("  Format: {}", result.source.format);
    println!("  Rows: {}", result.source.row_count);
    println!("  Columns: {}", result.source.column_count);
    println!("  Hash: {}", result.source.hash);
    println!();

    println!("## Columns");
    for row in assay::flatten_summary(&result.summary) {
        let stats = match (row.mean, row.std) {
            (Some(mean), Some(std)) => format!("mean={:.2} std={:.2}", mean, std),
            (Some(mean), None) => format!("mean={:.2}", mean),
            _ => String::new(),
        };
        println!(
            "  {:<24} {:<12} missing={:>5.1}% unique={:<6} {}",
            row.name,
            row.kind,
            row.missing_share * 100.0,
            row.n_unique,
            stats
        );
    }
    println!();

    println!("## Quality Flags");
    for (name, value) in result.flags.entries() {
        println!("  {:<24} {}", name, value);
    }
    println!();

    let pairs = result.correlation.strongest_pairs(5);
    if !pairs.is_empty() {
        println!("## Strongest Correlations");
        for (a, b, r) in pairs {
            println!("  {} / {}: {:.3}", a, b, r);
        }
        println!();
    }

    for (column, counts) in result.top_categories.iter() {
        println!("## Top values: {}", column);
        for count in counts {
            println!("  {:<24} {}", count.value, count.count);
        }
        println!();
    }

    println!("{}", separator);
    println!(
        "Quality score: {:.3} ({})",
        result.flags.quality_score,
        if result.flags.ok_for_model {
            "ok for modeling"
        } else {
            "needs attention"
        }
    );
    println!("{}", separator);

    Ok(())
}
