//! CLI command implementations.

pub mod estimate;
pub mod flags;
pub mod overview;
pub mod report;

use std::path::Path;

use assay::{Assay, AssayConfig, ParserConfig, QualityConfig};
use tracing::debug;

use crate::cli::GlobalOptions;

/// Quality thresholds from `--config`, or the defaults.
pub fn load_quality_config(
    global: &GlobalOptions,
) -> Result<QualityConfig, Box<dyn std::error::Error>> {
    match &global.config {
        Some(path) => {
            debug!(path = %path.display(), "loading quality config");
            Ok(QualityConfig::from_file(path)?)
        }
        None => Ok(QualityConfig::default()),
    }
}

/// Build the engine from global options plus command-specific settings.
pub fn build_assay(
    global: &GlobalOptions,
    configure: impl FnOnce(&mut AssayConfig),
) -> Result<Assay, Box<dyn std::error::Error>> {
    let mut parser = ParserConfig::default();
    if let Some(delimiter) = global.delimiter {
        parser = parser.with_delimiter(delimiter.as_byte());
    }

    let mut config = AssayConfig {
        parser,
        quality: load_quality_config(global)?,
        ..AssayConfig::default()
    };
    configure(&mut config);

    Ok(Assay::with_config(config)?)
}

/// Fail early with a readable message when the input is missing.
pub fn ensure_exists(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}
