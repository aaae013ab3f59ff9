//! Quality estimate from dataset shape alone.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::QualityConfig;
use crate::error::{AssayError, Result};
use crate::missing::MissingTable;
use crate::profile::DatasetSummary;

/// Declared shape of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetShape {
    pub n_rows: usize,
    pub n_cols: usize,
    /// Largest missing share over all columns.
    pub max_missing_share: f64,
    pub numeric_cols: usize,
    pub categorical_cols: usize,
}

impl DatasetShape {
    /// Shape of an already summarized dataset.
    pub fn from_summary(summary: &DatasetSummary, missing: &MissingTable) -> Self {
        Self {
            n_rows: summary.n_rows,
            n_cols: summary.n_cols,
            max_missing_share: missing.max_missing_share(),
            numeric_cols: summary.numeric_count(),
            categorical_cols: summary.categorical_count(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.n_rows == 0 || self.n_cols == 0 {
            return Err(AssayError::EmptyDataset {
                rows: self.n_rows,
                columns: self.n_cols,
            });
        }
        if !(0.0..=1.0).contains(&self.max_missing_share) {
            return Err(AssayError::MalformedInput(format!(
                "max_missing_share must be between 0 and 1, got {}",
                self.max_missing_share
            )));
        }
        if self.numeric_cols + self.categorical_cols > self.n_cols {
            return Err(AssayError::MalformedInput(format!(
                "{} numeric and {} categorical columns exceed {} total",
                self.numeric_cols, self.categorical_cols, self.n_cols
            )));
        }
        Ok(())
    }
}

/// Flags derivable from shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeFlags {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub has_high_missing: bool,
    pub max_missing_share: f64,
}

/// Result of a shape-only estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeAssessment {
    pub quality_score: f64,
    pub ok_for_model: bool,
    /// One-line verdict.
    pub message: String,
    pub flags: ShapeFlags,
}

/// Scores a dataset from its shape using the same thresholds as the flag
/// engine. Rules that need the data itself do not contribute.
#[derive(Debug, Clone, Default)]
pub struct ShapeEstimator {
    config: QualityConfig,
}

impl ShapeEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with custom thresholds.
    pub fn with_config(config: QualityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Estimate quality for a declared shape.
    pub fn estimate(&self, shape: &DatasetShape) -> Result<ShapeAssessment> {
        shape.validate()?;

        let config = &self.config;
        let weights = &config.weights;
        let flags = ShapeFlags {
            too_few_rows: shape.n_rows < config.min_rows,
            too_many_columns: shape.n_cols > config.max_columns,
            has_high_missing: shape.max_missing_share > config.max_missing_share,
            max_missing_share: shape.max_missing_share,
        };

        let mut score = 1.0 - weights.missing * shape.max_missing_share;
        if flags.too_few_rows {
            score -= weights.too_few_rows;
        }
        if flags.too_many_columns {
            score -= weights.too_many_columns;
        }
        let quality_score = score.clamp(0.0, 1.0);
        let ok_for_model = quality_score >= config.acceptance_threshold;

        let message = if ok_for_model {
            "Data looks good enough for modeling".to_string()
        } else {
            let mut reasons = Vec::new();
            if flags.has_high_missing {
                reasons.push("too many missing values");
            }
            if flags.too_few_rows {
                reasons.push("too few rows");
            }
            if flags.too_many_columns {
                reasons.push("too many columns");
            }
            if reasons.is_empty() {
                "Quality score is below the acceptance threshold".to_string()
            } else {
                format!("Data needs work before modeling: {}", reasons.join(", "))
            }
        };

        debug!(score = quality_score, ok_for_model, "estimated quality from shape");

        Ok(ShapeAssessment {
            quality_score,
            ok_for_model,
            message,
            flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(n_rows: usize, n_cols: usize, max_missing_share: f64) -> DatasetShape {
        DatasetShape {
            n_rows,
            n_cols,
            max_missing_share,
            numeric_cols: n_cols / 2,
            categorical_cols: n_cols - n_cols / 2,
        }
    }

    #[test]
    fn test_good_shape() {
        let result = ShapeEstimator::new().estimate(&shape(5000, 20, 0.1)).unwrap();
        assert!((result.quality_score - 0.9).abs() < 1e-12);
        assert!(result.ok_for_model);
        assert!(!result.flags.too_few_rows);
    }

    #[test]
    fn test_small_dataset() {
        let result = ShapeEstimator::new().estimate(&shape(50, 5, 0.2)).unwrap();
        assert!(result.flags.too_few_rows);
        assert!((result.quality_score - 0.6).abs() < 1e-12);
        assert!(!result.ok_for_model);
        assert!(result.message.contains("too few rows"));
    }

    #[test]
    fn test_heavy_missing() {
        let result = ShapeEstimator::new().estimate(&shape(2000, 15, 0.8)).unwrap();
        assert!(result.flags.has_high_missing);
        assert!(!result.ok_for_model);
        assert!(result.message.contains("missing"));
    }

    #[test]
    fn test_too_many_columns() {
        let result = ShapeEstimator::new().estimate(&shape(3000, 150, 0.15)).unwrap();
        assert!(result.flags.too_many_columns);
        assert!((result.quality_score - 0.75).abs() < 1e-12);
        assert!(result.ok_for_model);
    }

    #[test]
    fn test_invalid_shapes() {
        let estimator = ShapeEstimator::new();
        assert!(matches!(
            estimator.estimate(&shape(0, 5, 0.0)),
            Err(AssayError::EmptyDataset { .. })
        ));
        assert!(matches!(
            estimator.estimate(&shape(10, 5, 1.5)),
            Err(AssayError::MalformedInput(_))
        ));

        let mut bad = shape(10, 4, 0.0);
        bad.numeric_cols = 5;
        assert!(matches!(
            estimator.estimate(&bad),
            Err(AssayError::MalformedInput(_))
        ));
    }
}
