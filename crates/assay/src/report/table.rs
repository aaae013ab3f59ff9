//! Flat tabular view of a dataset summary.

use serde::{Deserialize, Serialize};

use crate::dataset::ColumnKind;
use crate::profile::DatasetSummary;

/// One column of a summary, flattened for display or CSV output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub kind: ColumnKind,
    pub n_missing: usize,
    pub missing_share: f64,
    pub n_unique: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Flatten a summary into one row per column, in column order.
pub fn flatten_summary(summary: &DatasetSummary) -> Vec<SummaryRow> {
    summary
        .columns
        .iter()
        .map(|c| SummaryRow {
            name: c.name.clone(),
            kind: c.kind,
            n_missing: c.n_missing,
            missing_share: c.missing_share,
            n_unique: c.n_unique,
            mean: c.mean,
            std: c.std,
            min: c.min,
            max: c.max,
        })
        .collect()
}
