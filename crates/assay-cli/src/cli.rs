//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Assay: quick data-quality triage for tabular datasets
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// TOML file with quality thresholds and score weights
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field delimiter (comma, tab, semicolon, pipe); auto-detected if omitted
    #[arg(short, long, global = true)]
    pub delimiter: Option<Delimiter>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dataset shape and per-column statistics
    Overview {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate quality flags and the quality score
    Flags {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a markdown/CSV/JSON report bundle
    Report {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "reports")]
        out_dir: PathBuf,

        /// Entries per top-categories table
        #[arg(long, default_value = "5")]
        top_k: usize,

        /// Categorical columns that get a top-categories table
        #[arg(long, default_value = "5")]
        max_columns: usize,

        /// List columns with at least this missing share as problems
        #[arg(long, default_value = "0.1")]
        min_missing_share: f64,

        /// Report heading
        #[arg(long, default_value = "EDA report")]
        title: String,
    },

    /// Estimate quality from dataset shape alone
    Estimate {
        /// Number of rows
        #[arg(long)]
        n_rows: usize,

        /// Number of columns
        #[arg(long)]
        n_cols: usize,

        /// Largest missing share over all columns (0..1)
        #[arg(long)]
        max_missing_share: f64,

        /// Number of numeric columns
        #[arg(long, default_value = "0")]
        numeric_cols: usize,

        /// Number of categorical columns
        #[arg(long, default_value = "0")]
        categorical_cols: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Field delimiter choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "," | "comma" | "csv" => Ok(Delimiter::Comma),
            "\t" | "\\t" | "tab" | "tsv" => Ok(Delimiter::Tab),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            "|" | "pipe" => Ok(Delimiter::Pipe),
            _ => Err(format!(
                "Unknown delimiter: {}. Use comma, tab, semicolon, or pipe.",
                s
            )),
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Semicolon => write!(f, "semicolon"),
            Delimiter::Pipe => write!(f, "pipe"),
        }
    }
}
