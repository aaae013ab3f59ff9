//! Pairwise Pearson correlation over numeric columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::{ColumnKind, Dataset};
use crate::error::{AssayError, Result};

/// Symmetric correlation matrix keyed by column name.
///
/// A coefficient is `None` when the pair has fewer than two rows where both
/// values are present, or when either side has zero variance over those rows.
/// The diagonal is always 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationMatrix {
    rows: IndexMap<String, IndexMap<String, Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlate all numeric columns of a dataset.
    ///
    /// Fewer than two numeric columns yields an empty matrix. More than
    /// `max_columns` numeric columns fails before any pair is computed.
    pub fn from_dataset(dataset: &Dataset, max_columns: usize) -> Result<Self> {
        let numeric: Vec<(&str, Vec<Option<f64>>)> = dataset
            .columns()
            .iter()
            .filter(|c| matches!(c.kind(), Ok(ColumnKind::Numeric)))
            .filter_map(|c| c.values().as_f64().map(|v| (c.name(), v)))
            .collect();

        if numeric.len() > max_columns {
            return Err(AssayError::InputTooLarge {
                numeric_columns: numeric.len(),
                limit: max_columns,
            });
        }

        if numeric.len() < 2 {
            debug!(
                numeric_columns = numeric.len(),
                "not enough numeric columns to correlate"
            );
            return Ok(Self::default());
        }

        let n = numeric.len();
        let mut coefficients = vec![vec![None; n]; n];
        for i in 0..n {
            coefficients[i][i] = Some(1.0);
            for j in (i + 1)..n {
                let r = pearson(&numeric[i].1, &numeric[j].1);
                if r.is_none() {
                    debug!(
                        left = numeric[i].0,
                        right = numeric[j].0,
                        "correlation undefined for pair"
                    );
                }
                coefficients[i][j] = r;
                coefficients[j][i] = r;
            }
        }

        let rows = numeric
            .iter()
            .zip(coefficients)
            .map(|((name, _), row)| {
                let row = numeric
                    .iter()
                    .zip(row)
                    .map(|((other, _), r)| (other.to_string(), r))
                    .collect();
                (name.to_string(), row)
            })
            .collect();

        Ok(Self { rows })
    }

    /// Coefficient between two columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.rows.get(a)?.get(b).copied().flatten()
    }

    /// Column names in matrix order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Number of columns in the matrix.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over each unordered pair once as `(a, b, coefficient)`.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, Option<f64>)> {
        self.rows.iter().enumerate().flat_map(|(i, (a, row))| {
            row.iter()
                .skip(i + 1)
                .map(move |(b, r)| (a.as_str(), b.as_str(), *r))
        })
    }

    /// Defined pairs sorted by absolute coefficient, strongest first.
    pub fn strongest_pairs(&self, limit: usize) -> Vec<(&str, &str, f64)> {
        let mut pairs: Vec<_> = self
            .pairs()
            .filter_map(|(a, b, r)| r.map(|r| (a, b, r)))
            .collect();
        pairs.sort_by(|x, y| y.2.abs().total_cmp(&x.2.abs()));
        pairs.truncate(limit);
        pairs
    }
}

/// Pearson coefficient over rows where both values are present.
///
/// Each side is divided by its largest magnitude before summing, so values
/// near `f64::MAX` cannot overflow. Two passes: means first, then centered
/// sums, so large offsets do not cancel out.
fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let (scale_x, scale_y) = pairs
        .iter()
        .fold((0.0f64, 0.0f64), |(sx, sy), (a, b)| (sx.max(a.abs()), sy.max(b.abs())));
    if scale_x == 0.0 || scale_y == 0.0 {
        return None;
    }
    let pairs: Vec<(f64, f64)> = pairs
        .into_iter()
        .map(|(a, b)| (a / scale_x, b / scale_y))
        .collect();

    let n = pairs.len() as f64;
    let (sum_x, sum_y) = pairs
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (a, b)| (sx + a, sy + b));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("coefficient should be defined");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_perfect_correlation_ignores_missing_pairwise() {
        let ds = Dataset::new(vec![
            Column::integer("age", vec![Some(10), Some(20), Some(30), None]),
            Column::integer("height", vec![Some(140), Some(150), Some(160), Some(170)]),
            Column::float("neg", vec![Some(-1.0), Some(-2.0), None, Some(-4.0)]),
        ])
        .unwrap();
        let matrix = CorrelationMatrix::from_dataset(&ds, 10).unwrap();

        assert_eq!(matrix.len(), 3);
        assert_close(matrix.get("age", "height"), 1.0);
        assert_close(matrix.get("height", "neg"), -1.0);
        assert_eq!(matrix.get("age", "age"), Some(1.0));
    }

    #[test]
    fn test_symmetric() {
        let ds = Dataset::new(vec![
            Column::float("x", vec![Some(1.0), Some(2.0), Some(3.0), Some(5.0)]),
            Column::float("y", vec![Some(2.0), Some(1.0), Some(4.0), Some(3.0)]),
        ])
        .unwrap();
        let matrix = CorrelationMatrix::from_dataset(&ds, 10).unwrap();
        assert_eq!(matrix.get("x", "y"), matrix.get("y", "x"));
        let r = matrix.get("x", "y").unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn test_single_numeric_column_is_empty() {
        let ds = Dataset::new(vec![
            Column::integer("x", vec![Some(1), Some(2)]),
            Column::text("c", vec![Some("a"), Some("b")]),
        ])
        .unwrap();
        let matrix = CorrelationMatrix::from_dataset(&ds, 10).unwrap();
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_constant_column_has_undefined_coefficient() {
        let ds = Dataset::new(vec![
            Column::integer("x", vec![Some(1), Some(2), Some(3)]),
            Column::integer("k", vec![Some(5), Some(5), Some(5)]),
        ])
        .unwrap();
        let matrix = CorrelationMatrix::from_dataset(&ds, 10).unwrap();
        assert_eq!(matrix.get("x", "k"), None);
        assert_eq!(matrix.get("k", "k"), Some(1.0));
        let json = serde_json::to_value(&matrix).unwrap();
        assert!(json["x"]["k"].is_null());
    }

    #[test]
    fn test_too_many_columns_rejected() {
        let columns = (0..4)
            .map(|i| Column::integer(format!("c{i}"), vec![Some(i), Some(i + 1)]))
            .collect();
        let ds = Dataset::new(columns).unwrap();
        let err = CorrelationMatrix::from_dataset(&ds, 3).unwrap_err();
        assert!(matches!(
            err,
            AssayError::InputTooLarge {
                numeric_columns: 4,
                limit: 3
            }
        ));
    }

    #[test]
    fn test_values_near_max_stay_in_range() {
        let ds = Dataset::new(vec![
            Column::float("x", vec![Some(1e308), Some(1e308), Some(-1e308)]),
            Column::integer("y", vec![Some(1), Some(2), Some(3)]),
        ])
        .unwrap();
        let matrix = CorrelationMatrix::from_dataset(&ds, 10).unwrap();
        // Centered x is (2, 2, -4) / 3 and centered y is (-1, 0, 1).
        assert_close(matrix.get("x", "y"), -(3.0f64.sqrt()) / 2.0);
    }

    #[test]
    fn test_infinite_cells_are_skipped() {
        let ds = Dataset::new(vec![
            Column::float(
                "x",
                vec![Some(1.0), Some(f64::INFINITY), Some(2.0), Some(3.0)],
            ),
            Column::float(
                "y",
                vec![Some(2.0), Some(0.0), Some(4.0), Some(f64::NEG_INFINITY)],
            ),
        ])
        .unwrap();
        let matrix = CorrelationMatrix::from_dataset(&ds, 10).unwrap();
        assert_close(matrix.get("x", "y"), 1.0);
    }

    #[test]
    fn test_pairs_and_strongest() {
        let ds = Dataset::new(vec![
            Column::float("a", vec![Some(1.0), Some(2.0), Some(3.0)]),
            Column::float("b", vec![Some(2.0), Some(4.0), Some(6.0)]),
            Column::float("c", vec![Some(3.0), Some(1.0), Some(2.0)]),
        ])
        .unwrap();
        let matrix = CorrelationMatrix::from_dataset(&ds, 10).unwrap();
        assert_eq!(matrix.pairs().count(), 3);
        let strongest = matrix.strongest_pairs(1);
        assert_eq!((strongest[0].0, strongest[0].1), ("a", "b"));
    }
}
