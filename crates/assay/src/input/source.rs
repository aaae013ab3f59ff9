//! Parsed text tables and the provenance of the file they came from.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Cell contents treated as missing, compared case-insensitively after trimming.
const NULL_MARKERS: &[&str] = &["na", "n/a", "nan", "null", "none", "nil", "#n/a", ".", "-"];

/// Returns true if a raw cell means "no value": blank or a null marker.
pub fn is_null_marker(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty()
        || NULL_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

/// Short format name for a field delimiter.
pub fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Where an analyzed table came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without directories.
    pub file: String,
    pub path: PathBuf,
    /// `sha256:` followed by the hex digest of the raw bytes.
    pub hash: String,
    pub size_bytes: u64,
    /// Format name derived from the delimiter (csv, tsv, ...).
    pub format: String,
    /// Field delimiter the table was split on, configured or detected.
    pub delimiter: char,
    /// Data rows, header excluded.
    pub row_count: usize,
    pub column_count: usize,
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe the raw `contents` read from `path` and the table parsed from them.
    pub fn describe(path: &Path, contents: &[u8], table: &DataTable) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(contents);

        Self {
            file,
            path: path.to_path_buf(),
            hash: format!("sha256:{:x}", hasher.finalize()),
            size_bytes: contents.len() as u64,
            format: format_name(table.delimiter()).to_string(),
            delimiter: char::from(table.delimiter()),
            row_count: table.row_count(),
            column_count: table.column_count(),
            analyzed_at: Utc::now(),
        }
    }
}

/// Header names plus the raw text cells of a delimited file, row by row.
///
/// Every row has exactly one cell per header.
#[derive(Debug, Clone)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    delimiter: u8,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The delimiter the rows were split on.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows, header excluded.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of one column in row order. Out-of-range cells read as blank.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map_or("", String::as_str))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}
