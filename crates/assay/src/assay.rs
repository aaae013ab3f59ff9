//! Main Assay struct and public API.

use std::path::Path;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::missing::MissingTable;
use crate::profile::{DatasetSummarizer, DatasetSummary};
use crate::quality::{QualityConfig, QualityFlagEngine, QualityFlags};
use crate::relationship::{
    CorrelationMatrix, DEFAULT_MAX_CATEGORY_COLUMNS, DEFAULT_TOP_K, RelationshipAnalyzer,
    TopCategories,
};

/// Configuration for Assay analysis.
#[derive(Debug, Clone)]
pub struct AssayConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Quality rule thresholds and score weights.
    pub quality: QualityConfig,
    /// Entries per top-categories table.
    pub top_k: usize,
    /// Categorical columns that get a top-categories table.
    pub max_category_columns: usize,
}

impl Default for AssayConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            quality: QualityConfig::default(),
            top_k: DEFAULT_TOP_K,
            max_category_columns: DEFAULT_MAX_CATEGORY_COLUMNS,
        }
    }
}

/// Everything computed for an in-memory dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub summary: DatasetSummary,
    pub missing: MissingTable,
    pub correlation: CorrelationMatrix,
    pub top_categories: TopCategories,
    pub flags: QualityFlags,
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Per-column profiles.
    pub summary: DatasetSummary,
    /// Missing counts per column.
    pub missing: MissingTable,
    /// Pearson correlation over numeric columns.
    pub correlation: CorrelationMatrix,
    /// Most frequent values of categorical columns.
    pub top_categories: TopCategories,
    /// Quality flags and score.
    pub flags: QualityFlags,
}

impl AnalysisResult {
    fn from_parts(source: SourceMetadata, analysis: DatasetAnalysis) -> Self {
        Self {
            source,
            summary: analysis.summary,
            missing: analysis.missing,
            correlation: analysis.correlation,
            top_categories: analysis.top_categories,
            flags: analysis.flags,
        }
    }
}

/// The main Assay analysis engine.
#[derive(Debug, Clone)]
pub struct Assay {
    parser: Parser,
    summarizer: DatasetSummarizer,
    relationships: RelationshipAnalyzer,
    flag_engine: QualityFlagEngine,
}

impl Assay {
    /// Create a new Assay instance with default configuration.
    pub fn new() -> Self {
        let config = AssayConfig::default();
        Self {
            parser: Parser::with_config(config.parser),
            summarizer: DatasetSummarizer::new(),
            relationships: RelationshipAnalyzer::new(),
            flag_engine: QualityFlagEngine::new(),
        }
    }

    /// Create an Assay instance with custom configuration.
    ///
    /// Fails if the quality configuration is invalid.
    pub fn with_config(config: AssayConfig) -> Result<Self> {
        let relationships = RelationshipAnalyzer::new()
            .with_top_k(config.top_k)
            .with_max_columns(config.max_category_columns)
            .with_max_correlation_columns(config.quality.max_correlation_columns);
        let flag_engine = QualityFlagEngine::with_config(config.quality)?;

        Ok(Self {
            parser: Parser::with_config(config.parser),
            summarizer: DatasetSummarizer::new(),
            relationships,
            flag_engine,
        })
    }

    /// Analyze a delimited data file.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let path = path.as_ref();

        let (table, source) = self.parser.parse_file(path)?;
        info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "analyzing file"
        );

        let dataset = Dataset::from_table(&table)?;
        let analysis = self.analyze_dataset(&dataset)?;

        if analysis.flags.ok_for_model {
            info!(
                file = %source.file,
                score = analysis.flags.quality_score,
                "analysis complete"
            );
        } else {
            warn!(
                file = %source.file,
                score = analysis.flags.quality_score,
                flags = ?analysis.flags.raised(),
                "dataset scored below acceptance threshold"
            );
        }

        Ok(AnalysisResult::from_parts(source, analysis))
    }

    /// Analyze an in-memory dataset.
    ///
    /// The summarizer, missingness and relationship passes share the dataset
    /// read-only and run on separate threads.
    pub fn analyze_dataset(&self, dataset: &Dataset) -> Result<DatasetAnalysis> {
        dataset.ensure_not_empty()?;

        let (summary, missing, relationships) = thread::scope(|s| {
            let summary = s.spawn(|| self.summarizer.summarize(dataset));
            let missing = s.spawn(|| MissingTable::from_dataset(dataset));
            let relationships = s.spawn(|| self.relationships.analyze(dataset));
            (
                join(summary),
                join(missing),
                join(relationships),
            )
        });
        let (summary, missing, relationships) = (summary?, missing?, relationships?);

        let flags = self.flag_engine.evaluate(&summary, &missing, dataset)?;

        Ok(DatasetAnalysis {
            summary,
            missing,
            correlation: relationships.correlation,
            top_categories: relationships.top_categories,
            flags,
        })
    }

    /// The quality flag engine in use.
    pub fn flag_engine(&self) -> &QualityFlagEngine {
        &self.flag_engine
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}

/// Join a scoped worker, re-raising its panic on this thread.
fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}
