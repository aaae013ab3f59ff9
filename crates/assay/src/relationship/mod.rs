//! Cross-column relationships: numeric correlation and category frequencies.

mod categories;
mod correlation;

pub use categories::{CategoryCount, TopCategories};
pub use correlation::CorrelationMatrix;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;

/// Default number of categorical columns that get a frequency table.
pub const DEFAULT_MAX_CATEGORY_COLUMNS: usize = 5;
/// Default length of each frequency table.
pub const DEFAULT_TOP_K: usize = 5;
/// Default cap on numeric columns entering the correlation matrix.
pub const DEFAULT_MAX_CORRELATION_COLUMNS: usize = 1000;

/// Output of a [`RelationshipAnalyzer`] pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationships {
    pub correlation: CorrelationMatrix,
    pub top_categories: TopCategories,
}

/// Computes correlations and top categories with bounded cost.
#[derive(Debug, Clone)]
pub struct RelationshipAnalyzer {
    /// Categorical columns that get a frequency table.
    max_columns: usize,
    /// Entries per frequency table.
    top_k: usize,
    /// Numeric columns allowed into the correlation matrix.
    max_correlation_columns: usize,
}

impl RelationshipAnalyzer {
    /// Create an analyzer with default limits.
    pub fn new() -> Self {
        Self {
            max_columns: DEFAULT_MAX_CATEGORY_COLUMNS,
            top_k: DEFAULT_TOP_K,
            max_correlation_columns: DEFAULT_MAX_CORRELATION_COLUMNS,
        }
    }

    /// Limit frequency tables to the first `max_columns` categorical columns.
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    /// Keep at most `top_k` values per frequency table.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Refuse correlation over more than `limit` numeric columns.
    pub fn with_max_correlation_columns(mut self, limit: usize) -> Self {
        self.max_correlation_columns = limit;
        self
    }

    /// Run both analyses.
    pub fn analyze(&self, dataset: &Dataset) -> Result<Relationships> {
        let correlation = CorrelationMatrix::from_dataset(dataset, self.max_correlation_columns)?;
        let top_categories = TopCategories::from_dataset(dataset, self.max_columns, self.top_k);

        debug!(
            numeric_columns = correlation.len(),
            category_tables = top_categories.len(),
            "analyzed relationships"
        );

        Ok(Relationships {
            correlation,
            top_categories,
        })
    }
}

impl Default for RelationshipAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
