//! Most frequent values of categorical columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataset::{ColumnKind, Dataset};

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Frequency tables keyed by categorical column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopCategories {
    columns: IndexMap<String, Vec<CategoryCount>>,
}

impl TopCategories {
    /// Count values of the first `max_columns` categorical columns and keep
    /// the `top_k` most frequent per column. Ties keep first-seen order.
    pub fn from_dataset(dataset: &Dataset, max_columns: usize, top_k: usize) -> Self {
        let columns = dataset
            .columns()
            .iter()
            .filter(|c| matches!(c.kind(), Ok(ColumnKind::Categorical)))
            .take(max_columns)
            .map(|column| {
                let mut counts: IndexMap<String, usize> = IndexMap::new();
                for value in column.present() {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }

                let mut rows: Vec<CategoryCount> = counts
                    .into_iter()
                    .map(|(value, count)| CategoryCount { value, count })
                    .collect();
                // Stable sort keeps insertion (first occurrence) order on ties.
                rows.sort_by(|a, b| b.count.cmp(&a.count));
                rows.truncate(top_k);

                (column.name().to_string(), rows)
            })
            .collect();

        Self { columns }
    }

    /// Frequency table for a column.
    pub fn get(&self, column: &str) -> Option<&[CategoryCount]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Iterate over `(column, table)` pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CategoryCount])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of columns with a table.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column has a table.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
