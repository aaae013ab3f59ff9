//! Column and dataset profiling.
//!
//! [`ColumnProfiler`] characterizes a single column; [`DatasetSummarizer`]
//! applies it to every column of a [`Dataset`](crate::Dataset) in order.

mod column;
mod streaming;
mod summary;

pub use column::{ColumnProfiler, ColumnSummary};
pub use streaming::StreamingStats;
pub use summary::{DatasetSummarizer, DatasetSummary};
