//! Dataset: an ordered set of equally long named columns.

use std::collections::HashSet;

use crate::error::{AssayError, Result};
use crate::input::DataTable;

use super::column::Column;
use super::infer::infer_column;

/// An immutable rectangular dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset, checking that all columns have the same length and
    /// that column names are unique.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.len() != n_rows {
                return Err(AssayError::MalformedInput(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    n_rows
                )));
            }
            if !seen.insert(column.name()) {
                return Err(AssayError::MalformedInput(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Build a typed dataset from parsed text, inferring each column's
    /// storage type once.
    pub fn from_table(table: &DataTable) -> Result<Self> {
        let columns = table
            .headers()
            .iter()
            .enumerate()
            .map(|(index, name)| infer_column(name, table.column_values(index)))
            .collect();
        Self::new(columns)
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Returns true if there are no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    /// Fail with [`AssayError::EmptyDataset`] if there is nothing to analyze.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(AssayError::EmptyDataset {
                rows: self.n_rows,
                columns: self.columns.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::StorageType;

    #[test]
    fn test_shape() {
        let ds = Dataset::new(vec![
            Column::integer("a", vec![Some(1), Some(2)]),
            Column::text("b", vec![Some("x"), None]),
        ])
        .unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.n_cols(), 2);
        assert_eq!(ds.column_names(), vec!["a", "b"]);
        assert!(ds.ensure_not_empty().is_ok());
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Dataset::new(vec![
            Column::integer("a", vec![Some(1), Some(2)]),
            Column::integer("b", vec![Some(1)]),
        ])
        .unwrap_err();
        assert!(matches!(err, AssayError::MalformedInput(_)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Dataset::new(vec![
            Column::integer("a", vec![Some(1)]),
            Column::integer("a", vec![Some(2)]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_detection() {
        let no_cols = Dataset::new(Vec::new()).unwrap();
        assert!(matches!(
            no_cols.ensure_not_empty(),
            Err(AssayError::EmptyDataset { rows: 0, columns: 0 })
        ));

        let no_rows = Dataset::new(vec![Column::integer("a", Vec::new())]).unwrap();
        assert!(no_rows.is_empty());
    }

    #[test]
    fn test_from_table() {
        let table = DataTable::new(
            vec!["age".to_string(), "city".to_string()],
            vec![
                vec!["10".to_string(), "A".to_string()],
                vec!["NA".to_string(), "B".to_string()],
            ],
            b',',
        );
        let ds = Dataset::from_table(&table).unwrap();
        assert_eq!(ds.column("age").unwrap().storage_type(), StorageType::Integer);
        assert_eq!(ds.column("city").unwrap().storage_type(), StorageType::Text);
        assert_eq!(ds.column("age").unwrap().missing_count(), 1);
    }
}
