//! Core type definitions for column storage and analysis kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Text/string values.
    Text,
    /// Opaque byte strings.
    Binary,
}

impl StorageType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, StorageType::Integer | StorageType::Float)
    }

    /// Returns true if values of this type are treated as categories.
    pub fn is_categorical(&self) -> bool {
        matches!(self, StorageType::Boolean | StorageType::Text)
    }

    /// Get a lowercase label for the storage type.
    pub fn label(&self) -> &'static str {
        match self {
            StorageType::Integer => "integer",
            StorageType::Float => "float",
            StorageType::Boolean => "boolean",
            StorageType::Text => "text",
            StorageType::Binary => "binary",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Analysis kind of a column, decided once from its storage type and contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or float storage with at least one value present.
    Numeric,
    /// Text or boolean storage with at least one value present.
    Categorical,
    /// Every value is missing.
    Unknown,
}

impl ColumnKind {
    /// Get a lowercase label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
