//! Quality flag evaluation and scoring.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{DEFAULT_ID_PATTERN, QualityConfig};
use crate::dataset::{Column, ColumnKind, Dataset};
use crate::error::{AssayError, Result};
use crate::missing::MissingTable;
use crate::profile::DatasetSummary;

static DEFAULT_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_ID_PATTERN).expect("default identifier pattern is valid"));

/// Columns that triggered each column-level rule, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlaggedColumns {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constant: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub high_cardinality: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_duplicates: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub many_zero_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub high_missing: Vec<String>,
}

/// Diagnostic flags and the aggregate score for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub has_constant_columns: bool,
    pub has_high_num_unique: bool,
    pub has_id_duplicates: bool,
    pub has_many_zero_values: bool,
    pub has_high_missing: bool,
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    /// Largest missing share over all columns.
    pub max_missing_share: f64,
    /// Aggregate score in [0, 1].
    pub quality_score: f64,
    /// `quality_score` at or above the acceptance threshold.
    pub ok_for_model: bool,
    /// Columns behind each column-level flag.
    #[serde(default)]
    pub flagged_columns: FlaggedColumns,
    /// Amount each rule subtracted from the score.
    #[serde(default)]
    pub penalties: IndexMap<String, f64>,
}

/// A single flag value: boolean or numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(f64),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{b}"),
            FlagValue::Number(n) => write!(f, "{n:.3}"),
        }
    }
}

impl QualityFlags {
    /// Flat `name -> value` view of every flag, score included.
    pub fn entries(&self) -> IndexMap<&'static str, FlagValue> {
        IndexMap::from([
            ("has_constant_columns", FlagValue::Bool(self.has_constant_columns)),
            ("has_high_num_unique", FlagValue::Bool(self.has_high_num_unique)),
            ("has_id_duplicates", FlagValue::Bool(self.has_id_duplicates)),
            ("has_many_zero_values", FlagValue::Bool(self.has_many_zero_values)),
            ("has_high_missing", FlagValue::Bool(self.has_high_missing)),
            ("too_few_rows", FlagValue::Bool(self.too_few_rows)),
            ("too_many_columns", FlagValue::Bool(self.too_many_columns)),
            ("max_missing_share", FlagValue::Number(self.max_missing_share)),
            ("quality_score", FlagValue::Number(self.quality_score)),
            ("ok_for_model", FlagValue::Bool(self.ok_for_model)),
        ])
    }

    /// Names of the boolean flags that are set, excluding `ok_for_model`.
    pub fn raised(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(name, value)| *name != "ok_for_model" && *value == FlagValue::Bool(true))
            .map(|(name, _)| name)
            .collect()
    }
}

/// Evaluates quality rules against a summarized dataset.
#[derive(Debug, Clone)]
pub struct QualityFlagEngine {
    config: QualityConfig,
    id_pattern: Regex,
}

impl QualityFlagEngine {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self {
            config: QualityConfig::default(),
            id_pattern: DEFAULT_ID_REGEX.clone(),
        }
    }

    /// Create an engine with custom thresholds. Fails if the configuration
    /// is out of range or the identifier pattern does not compile.
    pub fn with_config(config: QualityConfig) -> Result<Self> {
        config.validate()?;
        let id_pattern = Regex::new(&config.id_column_pattern)?;
        Ok(Self { config, id_pattern })
    }

    /// The active configuration.
    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Returns true if the column name looks like an identifier.
    pub fn is_id_column(&self, name: &str) -> bool {
        self.id_pattern.is_match(name)
    }

    /// Compute all flags and the score.
    ///
    /// `summary` and `missing` must have been computed from `dataset`.
    pub fn evaluate(
        &self,
        summary: &DatasetSummary,
        missing: &MissingTable,
        dataset: &Dataset,
    ) -> Result<QualityFlags> {
        dataset.ensure_not_empty()?;
        check_consistency(summary, missing, dataset)?;

        let config = &self.config;
        let n_rows = summary.n_rows;

        let mut flagged = FlaggedColumns::default();

        for column in &summary.columns {
            if column.is_constant() {
                flagged.constant.push(column.name.clone());
            }

            if column.kind == ColumnKind::Categorical {
                let by_count = column.n_unique >= config.high_cardinality_threshold;
                let by_share = config
                    .high_cardinality_share
                    .is_some_and(|share| column.n_unique as f64 / n_rows as f64 >= share);
                if by_count || by_share {
                    flagged.high_cardinality.push(column.name.clone());
                }
            }

            if column.kind == ColumnKind::Numeric {
                if let Some(raw) = dataset.column(&column.name) {
                    if zero_share(raw) >= config.zero_share_threshold {
                        flagged.many_zero_values.push(column.name.clone());
                    }
                }
            }
        }

        for raw in dataset.columns() {
            if self.is_id_column(raw.name()) && has_duplicates(raw) {
                flagged.id_duplicates.push(raw.name().to_string());
            }
        }

        for (name, entry) in missing.iter() {
            if entry.missing_share > config.max_missing_share {
                flagged.high_missing.push(name.to_string());
            }
        }

        let max_missing_share = missing.max_missing_share();
        let too_few_rows = n_rows < config.min_rows;
        let too_many_columns = summary.n_cols > config.max_columns;

        let weights = &config.weights;
        let rule_penalty = |triggered: bool, weight: f64| if triggered { weight } else { 0.0 };
        let penalties: IndexMap<String, f64> = [
            (
                "missing",
                (weights.missing * max_missing_share).clamp(0.0, weights.missing),
            ),
            ("too_few_rows", rule_penalty(too_few_rows, weights.too_few_rows)),
            (
                "too_many_columns",
                rule_penalty(too_many_columns, weights.too_many_columns),
            ),
            (
                "constant_columns",
                rule_penalty(!flagged.constant.is_empty(), weights.constant_columns),
            ),
            (
                "high_cardinality",
                rule_penalty(!flagged.high_cardinality.is_empty(), weights.high_cardinality),
            ),
            (
                "id_duplicates",
                rule_penalty(!flagged.id_duplicates.is_empty(), weights.id_duplicates),
            ),
            (
                "many_zero_values",
                rule_penalty(!flagged.many_zero_values.is_empty(), weights.many_zero_values),
            ),
        ]
        .into_iter()
        .map(|(rule, penalty)| (rule.to_string(), penalty))
        .collect();

        let quality_score = (1.0 - penalties.values().sum::<f64>()).clamp(0.0, 1.0);
        let ok_for_model = quality_score >= config.acceptance_threshold;

        debug!(
            score = quality_score,
            ok_for_model,
            "evaluated quality flags"
        );

        Ok(QualityFlags {
            has_constant_columns: !flagged.constant.is_empty(),
            has_high_num_unique: !flagged.high_cardinality.is_empty(),
            has_id_duplicates: !flagged.id_duplicates.is_empty(),
            has_many_zero_values: !flagged.many_zero_values.is_empty(),
            has_high_missing: !flagged.high_missing.is_empty(),
            too_few_rows,
            too_many_columns,
            max_missing_share,
            quality_score,
            ok_for_model,
            flagged_columns: flagged,
            penalties,
        })
    }
}

impl Default for QualityFlagEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject a summary or missing table that was not computed from `dataset`.
fn check_consistency(
    summary: &DatasetSummary,
    missing: &MissingTable,
    dataset: &Dataset,
) -> Result<()> {
    if summary.n_rows != dataset.n_rows() || summary.n_cols != dataset.n_cols() {
        return Err(AssayError::MalformedInput(format!(
            "summary shape {}x{} does not match dataset shape {}x{}",
            summary.n_rows,
            summary.n_cols,
            dataset.n_rows(),
            dataset.n_cols()
        )));
    }

    let names: HashSet<&str> = dataset.column_names().into_iter().collect();
    let summary_matches = summary.columns.len() == names.len()
        && summary.columns.iter().all(|c| names.contains(c.name.as_str()));
    let missing_matches =
        missing.len() == names.len() && missing.column_names().all(|n| names.contains(n));

    if !summary_matches || !missing_matches {
        return Err(AssayError::MalformedInput(
            "summary or missing table columns do not match the dataset".to_string(),
        ));
    }
    Ok(())
}

/// Share of zeros among present values (0.0 when nothing is present).
fn zero_share(column: &Column) -> f64 {
    let (zeros, present) = column
        .present()
        .fold((0usize, 0usize), |(z, p), v| (z + usize::from(v.is_zero()), p + 1));
    if present == 0 {
        0.0
    } else {
        zeros as f64 / present as f64
    }
}

/// Returns true if any present value occurs more than once.
fn has_duplicates(column: &Column) -> bool {
    let mut seen = HashSet::new();
    column.present().any(|v| !seen.insert(v.key()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::profile::DatasetSummarizer;

    fn evaluate(ds: &Dataset) -> QualityFlags {
        evaluate_with(&QualityFlagEngine::new(), ds)
    }

    fn evaluate_with(engine: &QualityFlagEngine, ds: &Dataset) -> QualityFlags {
        let summary = DatasetSummarizer::new().summarize(ds).unwrap();
        let missing = MissingTable::from_dataset(ds).unwrap();
        engine.evaluate(&summary, &missing, ds).unwrap()
    }

    #[test]
    fn test_constant_columns() {
        let ds = Dataset::new(vec![
            Column::integer("id", vec![Some(1), Some(2), Some(3)]),
            Column::integer("constant_col", vec![Some(5), Some(5), Some(5)]),
            Column::integer("value", vec![Some(10), Some(20), Some(30)]),
        ])
        .unwrap();
        let flags = evaluate(&ds);

        assert!(flags.has_constant_columns);
        assert_eq!(flags.flagged_columns.constant, vec!["constant_col"]);
        assert!(!flags.has_id_duplicates);
    }

    #[test]
    fn test_all_missing_column_is_not_constant() {
        let ds = Dataset::new(vec![
            Column::integer("a", vec![Some(1), Some(2)]),
            Column::text("empty", vec![None::<&str>, None]),
        ])
        .unwrap();
        assert!(!evaluate(&ds).has_constant_columns);
    }

    #[test]
    fn test_high_cardinality() {
        let values: Vec<_> = (0..60).map(|i| Some(format!("user_{i}"))).collect();
        let ds = Dataset::new(vec![Column::text("category", values)]).unwrap();
        let flags = evaluate(&ds);

        assert!(flags.has_high_num_unique);
        assert_eq!(flags.flagged_columns.high_cardinality, vec!["category"]);
    }

    #[test]
    fn test_numeric_column_never_high_cardinality() {
        let values: Vec<_> = (0..60).map(Some).collect();
        let ds = Dataset::new(vec![Column::integer("amount", values)]).unwrap();
        assert!(!evaluate(&ds).has_high_num_unique);
    }

    #[test]
    fn test_relative_cardinality_share() {
        let ds = Dataset::new(vec![Column::text(
            "code",
            vec![Some("a"), Some("b"), Some("c"), Some("a")],
        )])
        .unwrap();
        let mut config = QualityConfig::default();
        config.high_cardinality_share = Some(0.75);
        let engine = QualityFlagEngine::with_config(config).unwrap();
        assert!(evaluate_with(&engine, &ds).has_high_num_unique);
    }

    #[test]
    fn test_id_duplicates() {
        let ds = Dataset::new(vec![
            Column::integer("user_id", vec![Some(1), Some(1), Some(2), Some(3)]),
            Column::integer("value", vec![Some(10), Some(20), Some(30), Some(40)]),
        ])
        .unwrap();
        let flags = evaluate(&ds);

        assert!(flags.has_id_duplicates);
        assert_eq!(flags.flagged_columns.id_duplicates, vec!["user_id"]);
    }

    #[test]
    fn test_id_missing_values_are_not_duplicates() {
        let ds = Dataset::new(vec![Column::text(
            "ID",
            vec![Some("a"), None, Some("b"), None],
        )])
        .unwrap();
        assert!(!evaluate(&ds).has_id_duplicates);
    }

    #[test]
    fn test_non_id_duplicates_ignored() {
        let ds = Dataset::new(vec![Column::integer(
            "valid",
            vec![Some(1), Some(1), Some(2)],
        )])
        .unwrap();
        assert!(!evaluate(&ds).has_id_duplicates);
    }

    #[test]
    fn test_many_zero_values() {
        let ds = Dataset::new(vec![
            Column::integer("x", vec![Some(0), Some(0), Some(1), Some(2)]),
            Column::integer("y", vec![Some(5), Some(6), Some(7), Some(8)]),
        ])
        .unwrap();
        let flags = evaluate(&ds);

        assert!(flags.has_many_zero_values);
        assert_eq!(flags.flagged_columns.many_zero_values, vec!["x"]);
    }

    #[test]
    fn test_zero_share_ignores_missing() {
        let ds = Dataset::new(vec![Column::float(
            "x",
            vec![Some(0.0), None, None, Some(1.0), Some(2.0)],
        )])
        .unwrap();
        assert!(!evaluate(&ds).has_many_zero_values);
    }

    #[test]
    fn test_high_missing_and_score() {
        let ds = Dataset::new(vec![
            Column::integer("a", vec![Some(1), None, None, None]),
            Column::integer("b", vec![Some(1), Some(2), Some(3), Some(4)]),
        ])
        .unwrap();
        let flags = evaluate(&ds);

        assert!(flags.has_high_missing);
        assert_eq!(flags.max_missing_share, 0.75);
        assert!(flags.too_few_rows);
        // 1.0 - 0.75 (missing) - 0.2 (too few rows) - 0.1 (constant "a")
        assert!(flags.quality_score < 1e-9);
        assert_eq!(flags.quality_score, 0.0);
        assert!(!flags.ok_for_model);
    }

    #[test]
    fn test_clean_dataset_scores_high() {
        let n = 200;
        let ds = Dataset::new(vec![
            Column::integer("record_id", (0..n).map(Some).collect()),
            Column::float("value", (0..n).map(|i| Some(i as f64 * 1.5 + 1.0)).collect()),
            Column::text(
                "group",
                (0..n).map(|i| Some(["a", "b", "c"][i as usize % 3])).collect::<Vec<_>>(),
            ),
        ])
        .unwrap();
        let flags = evaluate(&ds);

        assert!(flags.raised().is_empty(), "raised: {:?}", flags.raised());
        assert_eq!(flags.quality_score, 1.0);
        assert!(flags.ok_for_model);
    }

    #[test]
    fn test_entries_have_fixed_names() {
        let ds = Dataset::new(vec![Column::integer("x", vec![Some(1), Some(2)])]).unwrap();
        let flags = evaluate(&ds);
        let entries = flags.entries();

        assert_eq!(entries.len(), 10);
        assert_eq!(entries["too_few_rows"], FlagValue::Bool(true));
        assert!(matches!(entries["quality_score"], FlagValue::Number(_)));
    }

    #[test]
    fn test_mismatched_summary_rejected() {
        let ds_a = Dataset::new(vec![Column::integer("a", vec![Some(1)])]).unwrap();
        let ds_b = Dataset::new(vec![Column::integer("b", vec![Some(1)])]).unwrap();
        let summary = DatasetSummarizer::new().summarize(&ds_a).unwrap();
        let missing = MissingTable::from_dataset(&ds_a).unwrap();

        let err = QualityFlagEngine::new()
            .evaluate(&summary, &missing, &ds_b)
            .unwrap_err();
        assert!(matches!(err, AssayError::MalformedInput(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = QualityConfig::default().with_id_column_pattern("(unclosed");
        assert!(matches!(
            QualityFlagEngine::with_config(config),
            Err(AssayError::Regex(_))
        ));
    }

    #[test]
    fn test_custom_weights_change_score() {
        let ds = Dataset::new(vec![Column::integer("k", vec![Some(5), Some(5)])]).unwrap();
        let config = QualityConfig::default()
            .with_min_rows(1)
            .with_weights(crate::quality::ScoreWeights {
                constant_columns: 0.4,
                ..Default::default()
            });
        let engine = QualityFlagEngine::with_config(config).unwrap();
        let flags = evaluate_with(&engine, &ds);

        assert!((flags.quality_score - 0.6).abs() < 1e-12);
        assert_eq!(flags.penalties["constant_columns"], 0.4);
    }
}
