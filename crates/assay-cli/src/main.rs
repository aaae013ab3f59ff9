//! Assay CLI - data quality triage for tabular files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Log to stderr so JSON on stdout stays clean. `RUST_LOG` wins over flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose, cli.global.quiet);

    let global = cli.global;
    let result = match cli.command {
        Commands::Overview { file, json } => commands::overview::run(file, json, &global),

        Commands::Flags { file, json } => commands::flags::run(file, json, &global),

        Commands::Report {
            file,
            out_dir,
            top_k,
            max_columns,
            min_missing_share,
            title,
        } => commands::report::run(
            file,
            commands::report::ReportArgs {
                out_dir,
                top_k,
                max_columns,
                min_missing_share,
                title,
            },
            &global,
        ),

        Commands::Estimate {
            n_rows,
            n_cols,
            max_missing_share,
            numeric_cols,
            categorical_cols,
            json,
        } => commands::estimate::run(
            assay::DatasetShape {
                n_rows,
                n_cols,
                max_missing_share,
                numeric_cols,
                categorical_cols,
            },
            json,
            &global,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
