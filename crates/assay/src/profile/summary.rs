//! Dataset-level summary.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::column::{ColumnProfiler, ColumnSummary};
use crate::dataset::{ColumnKind, Dataset};
use crate::error::Result;

/// Shape plus one [`ColumnSummary`] per column, in dataset order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Get a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column summaries of a given kind.
    pub fn columns_of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = &ColumnSummary> {
        self.columns.iter().filter(move |c| c.kind == kind)
    }

    /// Number of numeric columns.
    pub fn numeric_count(&self) -> usize {
        self.columns_of_kind(ColumnKind::Numeric).count()
    }

    /// Number of categorical columns.
    pub fn categorical_count(&self) -> usize {
        self.columns_of_kind(ColumnKind::Categorical).count()
    }
}

/// Applies a [`ColumnProfiler`] to every column of a dataset.
#[derive(Debug, Clone, Default)]
pub struct DatasetSummarizer {
    profiler: ColumnProfiler,
}

impl DatasetSummarizer {
    /// Create a summarizer with the default column profiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a summarizer with a custom column profiler.
    pub fn with_profiler(profiler: ColumnProfiler) -> Self {
        Self { profiler }
    }

    /// Summarize a dataset. Fails on a dataset with no rows or no columns.
    pub fn summarize(&self, dataset: &Dataset) -> Result<DatasetSummary> {
        dataset.ensure_not_empty()?;

        let n_rows = dataset.n_rows();
        let columns = dataset
            .columns()
            .iter()
            .map(|column| self.profiler.profile(column, n_rows))
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = n_rows, columns = columns.len(), "summarized dataset");

        Ok(DatasetSummary {
            n_rows,
            n_cols: dataset.n_cols(),
            columns,
        })
    }
}
