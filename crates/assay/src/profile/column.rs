//! Per-column profiling.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::streaming::StreamingStats;
use crate::dataset::{Column, ColumnKind, StorageType};
use crate::error::{AssayError, Result};

/// Statistics computed for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Analysis kind.
    pub kind: ColumnKind,
    /// Physical storage type.
    pub storage: StorageType,
    /// Number of missing values.
    pub n_missing: usize,
    /// `n_missing / n_rows`.
    pub missing_share: f64,
    /// Number of distinct non-missing values.
    pub n_unique: usize,
    /// First few distinct values, rendered as text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// Sample standard deviation; absent with fewer than two values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Number of non-missing values, given the dataset row count.
    pub fn non_missing(&self, n_rows: usize) -> usize {
        n_rows.saturating_sub(self.n_missing)
    }

    /// Returns true if the column holds at most one distinct value.
    pub fn is_constant(&self) -> bool {
        self.kind != ColumnKind::Unknown && self.n_unique <= 1
    }
}

/// Computes [`ColumnSummary`] values.
#[derive(Debug, Clone)]
pub struct ColumnProfiler {
    /// Maximum distinct values kept as examples.
    max_examples: usize,
}

impl ColumnProfiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self { max_examples: 3 }
    }

    /// Keep up to `max_examples` example values per column.
    pub fn with_max_examples(mut self, max_examples: usize) -> Self {
        self.max_examples = max_examples;
        self
    }

    /// Profile one column of a dataset with `n_rows` rows.
    pub fn profile(&self, column: &Column, n_rows: usize) -> Result<ColumnSummary> {
        if n_rows == 0 {
            return Err(AssayError::EmptyDataset {
                rows: 0,
                columns: 1,
            });
        }
        if column.len() != n_rows {
            return Err(AssayError::MalformedInput(format!(
                "column '{}' has {} rows, expected {}",
                column.name(),
                column.len(),
                n_rows
            )));
        }

        let kind = column.kind()?;
        let n_missing = column.missing_count();

        let mut seen = HashSet::new();
        let mut example_values = Vec::new();
        for value in column.present() {
            if seen.insert(value.key()) && example_values.len() < self.max_examples {
                example_values.push(value.to_string());
            }
        }

        let stats: Option<StreamingStats> = (kind == ColumnKind::Numeric)
            .then(|| column.present().filter_map(|v| v.as_f64()).collect());

        Ok(ColumnSummary {
            name: column.name().to_string(),
            kind,
            storage: column.storage_type(),
            n_missing,
            missing_share: n_missing as f64 / n_rows as f64,
            n_unique: seen.len(),
            example_values,
            mean: stats.as_ref().and_then(StreamingStats::mean),
            std: stats.as_ref().and_then(StreamingStats::sample_std),
            min: stats.as_ref().and_then(StreamingStats::min),
            max: stats.as_ref().and_then(StreamingStats::max),
        })
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}
