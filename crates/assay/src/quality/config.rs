//! Thresholds and score weights for the quality rules.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};

/// Default pattern for identifier-like column names: `id` or `*_id`.
pub(crate) const DEFAULT_ID_PATTERN: &str = r"(?i)^(id|.*_id)$";

/// Thresholds for every quality rule.
///
/// All fields have defaults, so a TOML file only needs the values it changes:
///
/// ```toml
/// high_cardinality_threshold = 100
/// min_rows = 500
///
/// [weights]
/// id_duplicates = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// A categorical column with at least this many distinct values is
    /// high-cardinality.
    pub high_cardinality_threshold: usize,
    /// Optional relative cardinality trigger: `n_unique / n_rows` at or above
    /// this share.
    pub high_cardinality_share: Option<f64>,
    /// Share of zeros among present values that marks a numeric column.
    pub zero_share_threshold: f64,
    /// A column with a missing share strictly above this is flagged.
    pub max_missing_share: f64,
    /// Fewer rows than this sets `too_few_rows`.
    pub min_rows: usize,
    /// More columns than this sets `too_many_columns`.
    pub max_columns: usize,
    /// Regex matched against column names to find identifier columns.
    pub id_column_pattern: String,
    /// Minimum score for `ok_for_model`.
    pub acceptance_threshold: f64,
    /// Numeric columns allowed into the correlation matrix.
    pub max_correlation_columns: usize,
    /// Penalty per rule.
    pub weights: ScoreWeights,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            high_cardinality_threshold: 50,
            high_cardinality_share: None,
            zero_share_threshold: 0.5,
            max_missing_share: 0.5,
            min_rows: 100,
            max_columns: 100,
            id_column_pattern: DEFAULT_ID_PATTERN.to_string(),
            acceptance_threshold: 0.7,
            max_correlation_columns: 1000,
            weights: ScoreWeights::default(),
        }
    }
}

impl QualityConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AssayError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Set the high-cardinality threshold.
    pub fn with_high_cardinality_threshold(mut self, threshold: usize) -> Self {
        self.high_cardinality_threshold = threshold;
        self
    }

    /// Set the zero-share threshold.
    pub fn with_zero_share_threshold(mut self, share: f64) -> Self {
        self.zero_share_threshold = share;
        self
    }

    /// Set the missing-share ceiling.
    pub fn with_max_missing_share(mut self, share: f64) -> Self {
        self.max_missing_share = share;
        self
    }

    /// Set the minimum row count.
    pub fn with_min_rows(mut self, rows: usize) -> Self {
        self.min_rows = rows;
        self
    }

    /// Set the identifier column pattern.
    pub fn with_id_column_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.id_column_pattern = pattern.into();
        self
    }

    /// Set the acceptance threshold for `ok_for_model`.
    pub fn with_acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    /// Set the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Check that shares lie in [0, 1] and weights are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let shares = [
            ("zero_share_threshold", Some(self.zero_share_threshold)),
            ("max_missing_share", Some(self.max_missing_share)),
            ("acceptance_threshold", Some(self.acceptance_threshold)),
            ("high_cardinality_share", self.high_cardinality_share),
        ];
        for (name, value) in shares {
            if let Some(value) = value {
                if !(0.0..=1.0).contains(&value) {
                    return Err(AssayError::Config(format!(
                        "{name} must be between 0 and 1, got {value}"
                    )));
                }
            }
        }

        for (name, weight) in self.weights.entries() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AssayError::Config(format!(
                    "weight '{name}' must be a non-negative number, got {weight}"
                )));
            }
        }

        if self.id_column_pattern.trim().is_empty() {
            return Err(AssayError::Config(
                "id_column_pattern must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Score penalty per rule. Each is the most that rule can subtract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Multiplied by the largest column missing share.
    pub missing: f64,
    pub too_few_rows: f64,
    pub too_many_columns: f64,
    pub constant_columns: f64,
    pub high_cardinality: f64,
    pub id_duplicates: f64,
    pub many_zero_values: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            missing: 1.0,
            too_few_rows: 0.2,
            too_many_columns: 0.1,
            constant_columns: 0.1,
            high_cardinality: 0.1,
            id_duplicates: 0.15,
            many_zero_values: 0.1,
        }
    }
}

impl ScoreWeights {
    /// `(rule, weight)` pairs in a fixed order.
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("missing", self.missing),
            ("too_few_rows", self.too_few_rows),
            ("too_many_columns", self.too_many_columns),
            ("constant_columns", self.constant_columns),
            ("high_cardinality", self.high_cardinality),
            ("id_duplicates", self.id_duplicates),
            ("many_zero_values", self.many_zero_values),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = QualityConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.high_cardinality_threshold, 50);
        assert_eq!(config.zero_share_threshold, 0.5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = QualityConfig::from_toml_str(
            "min_rows = 10\n\n[weights]\nid_duplicates = 0.3\n",
        )
        .unwrap();
        assert_eq!(config.min_rows, 10);
        assert_eq!(config.weights.id_duplicates, 0.3);
        assert_eq!(config.weights.missing, 1.0);
        assert_eq!(config.max_columns, 100);
    }

    #[test]
    fn test_out_of_range_share_rejected() {
        let err = QualityConfig::default()
            .with_zero_share_threshold(1.5)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("zero_share_threshold"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoreWeights {
            constant_columns: -0.1,
            ..ScoreWeights::default()
        };
        let err = QualityConfig::default()
            .with_weights(weights)
            .validate()
            .unwrap_err();
        assert!(matches!(err, AssayError::Config(_)));
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(matches!(
            QualityConfig::from_toml_str("min_rows = \"many\""),
            Err(AssayError::Toml(_))
        ));
    }
}
