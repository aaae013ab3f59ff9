//! Flags command - quality flags and the quality score.

use std::path::PathBuf;

use assay::FlagValue;
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
    let flags = &result.flags;

    if json_output {
        println!("{}", serde_json::to_string_pretty(flags)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Quality flags for".cyan().bold(),
        result.source.file.white()
    );
    println!();

    for (name, value) in flags.entries() {
        let rendered = match (name, value) {
            ("ok_for_model", FlagValue::Bool(true)) => "true".green().bold(),
            ("ok_for_model", FlagValue::Bool(false)) => "false".red().bold(),
            (_, FlagValue::Bool(true)) => "true".red(),
            (_, FlagValue::Bool(false)) => "false".dimmed(),
            (_, FlagValue::Number(n)) => format!("{:.3}", n).white().bold(),
        };
        println!("  {:<22} {}", name, rendered);
    }

    let flagged = &flags.flagged_columns;
    let groups = [
        ("Constant", &flagged.constant),
        ("High cardinality", &flagged.high_cardinality),
        ("Duplicate ids", &flagged.id_duplicates),
        ("Mostly zeros", &flagged.many_zero_values),
        ("Mostly missing", &flagged.high_missing),
    ];
    if groups.iter().any(|(_, columns)| !columns.is_empty()) {
        println!();
        println!("{}", "Flagged columns:".yellow().bold());
        for (label, columns) in groups.iter().filter(|(_, c)| !c.is_empty()) {
            println!("  {:<18} {}", label, columns.join(", "));
        }
    }

    let penalties: Vec<_> = flags.penalties.iter().filter(|(_, p)| **p > 0.0).collect();
    if !penalties.is_empty() {
        println!();
        println!("{}", "Penalties:".yellow().bold());
        for (rule, penalty) in penalties {
            println!("  {:<18} -{:.3}", rule, penalty);
        }
    }

    Ok(())
}
