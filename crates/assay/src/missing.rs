//! Per-column missingness analysis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;

/// Missing-value counts for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub missing_count: usize,
    /// `missing_count / n_rows`.
    pub missing_share: f64,
}

/// Missing-value table keyed by column name, in dataset column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissingTable {
    entries: IndexMap<String, MissingEntry>,
}

impl MissingTable {
    /// Compute the table for a dataset. Fails on an empty dataset.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        dataset.ensure_not_empty()?;

        let n_rows = dataset.n_rows() as f64;
        let entries: IndexMap<String, MissingEntry> = dataset
            .columns()
            .iter()
            .map(|column| {
                let missing_count = column.missing_count();
                let entry = MissingEntry {
                    missing_count,
                    missing_share: missing_count as f64 / n_rows,
                };
                (column.name().to_string(), entry)
            })
            .collect();

        debug!(columns = entries.len(), "computed missing table");

        Ok(Self { entries })
    }

    /// Get the entry for a column.
    pub fn get(&self, name: &str) -> Option<&MissingEntry> {
        self.entries.get(name)
    }

    /// Iterate over `(column, entry)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MissingEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest missing share over all columns (0.0 for an empty table).
    pub fn max_missing_share(&self) -> f64 {
        self.entries
            .values()
            .map(|e| e.missing_share)
            .fold(0.0, f64::max)
    }

    /// Total number of missing cells.
    pub fn total_missing(&self) -> usize {
        self.entries.values().map(|e| e.missing_count).sum()
    }

    /// Columns whose missing share is at or above `threshold`, sorted by
    /// share descending (column order on ties).
    pub fn problem_columns(&self, threshold: f64) -> Vec<(&str, &MissingEntry)> {
        let mut problems: Vec<_> = self
            .iter()
            .filter(|(_, e)| e.missing_share >= threshold && e.missing_count > 0)
            .collect();
        problems.sort_by(|a, b| b.1.missing_share.total_cmp(&a.1.missing_share));
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::error::AssayError;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::integer("age", vec![Some(10), Some(20), Some(30), None]),
            Column::integer("height", vec![Some(140), Some(150), Some(160), Some(170)]),
            Column::text("city", vec![Some("A"), None, Some("A"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn test_missing_counts() {
        let table = MissingTable::from_dataset(&sample()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("age").unwrap().missing_count, 1);
        assert_eq!(table.get("age").unwrap().missing_share, 0.25);
        assert_eq!(table.get("height").unwrap().missing_count, 0);
        assert_eq!(table.get("city").unwrap().missing_share, 0.5);
        assert_eq!(table.max_missing_share(), 0.5);
        assert_eq!(table.total_missing(), 3);
    }

    #[test]
    fn test_preserves_column_order() {
        let table = MissingTable::from_dataset(&sample()).unwrap();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["age", "height", "city"]);
    }

    #[test]
    fn test_problem_columns() {
        let table = MissingTable::from_dataset(&sample()).unwrap();
        let problems = table.problem_columns(0.2);
        let names: Vec<_> = problems.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["city", "age"]);
        assert!(table.problem_columns(0.0).iter().all(|(n, _)| *n != "height"));
    }

    #[test]
    fn test_serializes_as_map() {
        let table = MissingTable::from_dataset(&sample()).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["age"]["missing_count"], 1);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let ds = Dataset::new(Vec::new()).unwrap();
        assert!(matches!(
            MissingTable::from_dataset(&ds),
            Err(AssayError::EmptyDataset { .. })
        ));
    }
}
