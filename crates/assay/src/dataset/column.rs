//! Column storage and value access.

use std::fmt;

use crate::error::{AssayError, Result};

use super::types::{ColumnKind, StorageType};

/// Values of a single column, stored by type. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<Option<i64>>),
    /// A `NaN` or infinite value is treated the same as `None`.
    Float(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
    Binary(Vec<Option<Vec<u8>>>),
}

impl ColumnValues {
    /// Number of cells, missing included.
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Binary(v) => v.len(),
        }
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The storage type of these values.
    pub fn storage_type(&self) -> StorageType {
        match self {
            ColumnValues::Integer(_) => StorageType::Integer,
            ColumnValues::Float(_) => StorageType::Float,
            ColumnValues::Boolean(_) => StorageType::Boolean,
            ColumnValues::Text(_) => StorageType::Text,
            ColumnValues::Binary(_) => StorageType::Binary,
        }
    }

    /// Get the value at a row, or `None` if the cell is missing or out of range.
    pub fn get(&self, row: usize) -> Option<Value<'_>> {
        match self {
            ColumnValues::Integer(v) => v.get(row).copied().flatten().map(Value::Integer),
            ColumnValues::Float(v) => v
                .get(row)
                .copied()
                .flatten()
                .filter(|f| f.is_finite())
                .map(Value::Float),
            ColumnValues::Boolean(v) => v.get(row).copied().flatten().map(Value::Boolean),
            ColumnValues::Text(v) => v.get(row).and_then(|s| s.as_deref()).map(Value::Text),
            ColumnValues::Binary(v) => v.get(row).and_then(|b| b.as_deref()).map(Value::Binary),
        }
    }

    /// Iterate over all cells in row order.
    pub fn iter(&self) -> impl Iterator<Item = Option<Value<'_>>> + '_ {
        (0..self.len()).map(move |row| self.get(row))
    }

    /// Count missing cells.
    pub fn missing_count(&self) -> usize {
        self.iter().filter(Option::is_none).count()
    }

    /// Numeric view of the column. `None` for non-numeric storage.
    pub fn as_f64(&self) -> Option<Vec<Option<f64>>> {
        if !self.storage_type().is_numeric() {
            return None;
        }
        Some(self.iter().map(|v| v.and_then(|v| v.as_f64())).collect())
    }
}

/// A borrowed, non-missing cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(&'a str),
    Binary(&'a [u8]),
}

impl<'a> Value<'a> {
    /// Numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Integer(i) => Some(i as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Returns true for a numeric zero (including `-0.0`).
    pub fn is_zero(&self) -> bool {
        self.as_f64().is_some_and(|f| f == 0.0)
    }

    /// Hashable identity used for distinct counting and duplicate detection.
    pub fn key(&self) -> ValueKey<'a> {
        match *self {
            Value::Integer(i) => ValueKey::Integer(i),
            // -0.0 and 0.0 compare equal, so they must share a key.
            Value::Float(f) if f == 0.0 => ValueKey::Float(0.0f64.to_bits()),
            Value::Float(f) => ValueKey::Float(f.to_bits()),
            Value::Boolean(b) => ValueKey::Boolean(b),
            Value::Text(s) => ValueKey::Text(s),
            Value::Binary(b) => ValueKey::Binary(b),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
            Value::Binary(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Equality key for a [`Value`]. Floats compare by bit pattern after
/// normalizing negative zero; non-finite floats never reach here because they
/// are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Integer(i64),
    Float(u64),
    Boolean(bool),
    Text(&'a str),
    Binary(&'a [u8]),
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    /// Create a column from typed values.
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create an integer column.
    pub fn integer(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        Self::new(name, ColumnValues::Integer(values))
    }

    /// Create a float column.
    pub fn float(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnValues::Float(values))
    }

    /// Create a boolean column.
    pub fn boolean(name: impl Into<String>, values: Vec<Option<bool>>) -> Self {
        Self::new(name, ColumnValues::Boolean(values))
    }

    /// Create a text column.
    pub fn text<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(name, ColumnValues::Text(values))
    }

    /// Create a binary column.
    pub fn binary(name: impl Into<String>, values: Vec<Option<Vec<u8>>>) -> Self {
        Self::new(name, ColumnValues::Binary(values))
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Typed values.
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Storage type of the column.
    pub fn storage_type(&self) -> StorageType {
        self.values.storage_type()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.missing_count()
    }

    /// Iterate over the non-missing values in row order.
    pub fn present(&self) -> impl Iterator<Item = Value<'_>> + '_ {
        self.values.iter().flatten()
    }

    /// Decide the analysis kind of this column.
    ///
    /// A column whose cells are all missing is `Unknown` regardless of storage.
    /// Binary data with any value present cannot be analyzed.
    pub fn kind(&self) -> Result<ColumnKind> {
        if self.missing_count() == self.len() {
            return Ok(ColumnKind::Unknown);
        }

        let storage = self.storage_type();
        if storage.is_numeric() {
            Ok(ColumnKind::Numeric)
        } else if storage.is_categorical() {
            Ok(ColumnKind::Categorical)
        } else {
            Err(AssayError::UnsupportedColumnType {
                column: self.name.clone(),
                storage: storage.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_missing() {
        let col = Column::float("x", vec![Some(1.0), Some(f64::NAN), None]);
        assert_eq!(col.missing_count(), 2);
        assert_eq!(col.present().count(), 1);
    }

    #[test]
    fn test_infinity_is_missing() {
        let col = Column::float(
            "x",
            vec![Some(f64::INFINITY), Some(2.0), Some(f64::NEG_INFINITY)],
        );
        assert_eq!(col.missing_count(), 2);
        assert_eq!(col.values().as_f64(), Some(vec![None, Some(2.0), None]));
    }

    #[test]
    fn test_kind_inference() {
        assert_eq!(
            Column::integer("a", vec![Some(1), None]).kind().unwrap(),
            ColumnKind::Numeric
        );
        assert_eq!(
            Column::boolean("b", vec![Some(true)]).kind().unwrap(),
            ColumnKind::Categorical
        );
        assert_eq!(
            Column::text("c", vec![None::<&str>, None]).kind().unwrap(),
            ColumnKind::Unknown
        );
        assert_eq!(
            Column::binary("d", vec![None]).kind().unwrap(),
            ColumnKind::Unknown
        );
    }

    #[test]
    fn test_binary_with_values_is_unsupported() {
        let col = Column::binary("blob", vec![Some(vec![0xde, 0xad])]);
        assert!(matches!(
            col.kind(),
            Err(AssayError::UnsupportedColumnType { .. })
        ));
    }

    #[test]
    fn test_negative_zero_shares_key() {
        assert_eq!(Value::Float(-0.0).key(), Value::Float(0.0).key());
        assert!(Value::Float(-0.0).is_zero());
        assert!(!Value::Text("0").is_zero());
    }

    #[test]
    fn test_as_f64_only_for_numeric() {
        let ints = ColumnValues::Integer(vec![Some(2), None]);
        assert_eq!(ints.as_f64(), Some(vec![Some(2.0), None]));
        let text = ColumnValues::Text(vec![Some("2".to_string())]);
        assert_eq!(text.as_f64(), None);
    }
}
