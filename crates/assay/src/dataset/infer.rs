//! Storage type inference for text cells.

use crate::input::is_null_marker;

use super::column::{Column, ColumnValues};
use super::types::StorageType;

/// Build a typed column from raw text cells.
///
/// The storage type is the narrowest one that every non-missing cell parses
/// as: integer, then float, then boolean, falling back to text. A column with
/// no values at all is stored as text.
pub fn infer_column<'a>(name: &str, cells: impl Iterator<Item = &'a str>) -> Column {
    let cells: Vec<Option<&str>> = cells
        .map(|c| {
            if is_null_marker(c) {
                None
            } else {
                Some(c.trim())
            }
        })
        .collect();

    let values = match infer_storage_type(&cells) {
        StorageType::Integer => ColumnValues::Integer(
            cells
                .iter()
                .map(|c| c.and_then(|v| v.parse::<i64>().ok()))
                .collect(),
        ),
        StorageType::Float => ColumnValues::Float(
            cells
                .iter()
                .map(|c| c.and_then(|v| v.parse::<f64>().ok()))
                .collect(),
        ),
        StorageType::Boolean => {
            ColumnValues::Boolean(cells.iter().map(|c| c.and_then(parse_bool)).collect())
        }
        _ => ColumnValues::Text(cells.iter().map(|c| c.map(str::to_string)).collect()),
    };

    Column::new(name, values)
}

/// Pick the storage type shared by all present cells.
fn infer_storage_type(cells: &[Option<&str>]) -> StorageType {
    let mut present = cells.iter().flatten().peekable();
    if present.peek().is_none() {
        return StorageType::Text;
    }

    let mut all_integer = true;
    let mut all_float = true;
    let mut all_boolean = true;

    for value in present {
        if all_integer && value.parse::<i64>().is_err() {
            all_integer = false;
        }
        if all_float && !is_finite_float(value) {
            all_float = false;
        }
        if all_boolean && parse_bool(value).is_none() {
            all_boolean = false;
        }
        if !all_integer && !all_float && !all_boolean {
            return StorageType::Text;
        }
    }

    if all_integer {
        StorageType::Integer
    } else if all_float {
        StorageType::Float
    } else if all_boolean {
        StorageType::Boolean
    } else {
        StorageType::Text
    }
}

/// Accepts literal `true`/`false` only, case-insensitive.
fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// "inf" and "infinity" parse as f64 but are words in a text column.
fn is_finite_float(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}
