//! Assay: quick data-quality triage for tabular datasets.
//!
//! Assay profiles every column of a rectangular dataset, measures
//! missingness, correlates numeric columns, counts the most frequent
//! categories and condenses all of it into explainable quality flags plus a
//! single score in [0, 1].
//!
//! # Core Principles
//!
//! - **Explainable**: every flag is a named rule with a documented threshold
//! - **Deterministic**: the same input always yields the same output
//! - **Read-only**: analyses borrow the dataset and never modify it
//!
//! # Example
//!
//! ```no_run
//! use assay::Assay;
//!
//! let assay = Assay::new();
//! let result = assay.analyze("data.csv").unwrap();
//!
//! println!("Columns: {}", result.summary.n_cols);
//! println!("Quality score: {:.2}", result.flags.quality_score);
//! ```
//!
//! The individual passes are also available on an in-memory [`Dataset`]:
//!
//! ```
//! use assay::{Column, Dataset};
//!
//! let dataset = Dataset::new(vec![
//!     Column::integer("user_id", vec![Some(1), Some(1), Some(2), Some(3)]),
//!     Column::integer("x", vec![Some(0), Some(0), Some(1), Some(2)]),
//! ])
//! .unwrap();
//!
//! let summary = assay::summarize(&dataset).unwrap();
//! let missing = assay::missing_table(&dataset).unwrap();
//! let flags = assay::compute_quality_flags(&summary, &missing, &dataset).unwrap();
//!
//! assert!(flags.has_id_duplicates);
//! assert!(flags.has_many_zero_values);
//! ```

pub mod dataset;
pub mod error;
pub mod input;
pub mod missing;
pub mod profile;
pub mod quality;
pub mod relationship;
pub mod report;

mod assay;

pub use crate::assay::{AnalysisResult, Assay, AssayConfig, DatasetAnalysis};
pub use dataset::{Column, ColumnKind, ColumnValues, Dataset, StorageType, Value};
pub use error::{AssayError, Result};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use missing::{MissingEntry, MissingTable};
pub use profile::{ColumnProfiler, ColumnSummary, DatasetSummarizer, DatasetSummary};
pub use quality::{
    DatasetShape, FlagValue, QualityConfig, QualityFlagEngine, QualityFlags, ScoreWeights,
    ShapeAssessment, ShapeEstimator,
};
pub use relationship::{
    CategoryCount, CorrelationMatrix, RelationshipAnalyzer, Relationships, TopCategories,
};
pub use report::{ReportWriter, SummaryRow};

/// Profile every column of a dataset.
pub fn summarize(dataset: &Dataset) -> Result<DatasetSummary> {
    DatasetSummarizer::new().summarize(dataset)
}

/// Per-column missing counts and shares.
pub fn missing_table(dataset: &Dataset) -> Result<MissingTable> {
    MissingTable::from_dataset(dataset)
}

/// Pearson correlation over all numeric columns, with the default column cap.
pub fn correlation_matrix(dataset: &Dataset) -> Result<CorrelationMatrix> {
    CorrelationMatrix::from_dataset(dataset, relationship::DEFAULT_MAX_CORRELATION_COLUMNS)
}

/// The `top_k` most frequent values of the first `max_columns` categorical
/// columns.
pub fn top_categories(dataset: &Dataset, max_columns: usize, top_k: usize) -> TopCategories {
    TopCategories::from_dataset(dataset, max_columns, top_k)
}

/// Quality flags and score with default thresholds.
pub fn compute_quality_flags(
    summary: &DatasetSummary,
    missing: &MissingTable,
    dataset: &Dataset,
) -> Result<QualityFlags> {
    QualityFlagEngine::new().evaluate(summary, missing, dataset)
}

/// Flatten a summary into display rows.
pub fn flatten_summary(summary: &DatasetSummary) -> Vec<SummaryRow> {
    report::flatten_summary(summary)
}

/// Shape-only quality estimate with default thresholds.
pub fn estimate_from_shape(shape: &DatasetShape) -> Result<ShapeAssessment> {
    ShapeEstimator::new().estimate(shape)
}
