//! Typed, validated, in-memory representation of a tabular dataset.

mod column;
mod infer;
mod table;
mod types;

pub use column::{Column, ColumnValues, Value, ValueKey};
pub use infer::infer_column;
pub use table::Dataset;
pub use types::{ColumnKind, StorageType};
