//! Property-based tests for the Assay analyzers.
//!
//! These tests use proptest to generate random datasets and verify that the
//! analyzers keep their invariants under all inputs.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p assay --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p assay --test property_tests
//! ```

use assay::{Column, Dataset, MissingTable, QualityFlags};
use proptest::prelude::*;

// =============================================================================
// Test Strategies
// =============================================================================

/// One column of `rows` cells with a random storage type and missing cells.
fn column(index: usize, rows: usize) -> impl Strategy<Value = Column> {
    let name = if index == 0 {
        "id".to_string()
    } else {
        format!("col_{index}")
    };
    prop_oneof![
        prop::collection::vec(prop::option::weighted(0.8, -5i64..5), rows)
            .prop_map({
                let name = name.clone();
                move |v| Column::integer(name.clone(), v)
            }),
        prop::collection::vec(prop::option::weighted(0.8, -1e6f64..1e6), rows)
            .prop_map({
                let name = name.clone();
                move |v| Column::float(name.clone(), v)
            }),
        prop::collection::vec(prop::option::weighted(0.8, any::<bool>()), rows)
            .prop_map({
                let name = name.clone();
                move |v| Column::boolean(name.clone(), v)
            }),
        prop::collection::vec(prop::option::weighted(0.8, "[a-d]{1,2}"), rows)
            .prop_map(move |v| Column::text(name.clone(), v)),
    ]
}

/// A dataset with 1..=6 columns and 1..=40 rows.
fn dataset() -> impl Strategy<Value = Dataset> {
    (1usize..=6, 1usize..=40)
        .prop_flat_map(|(cols, rows)| {
            (0..cols)
                .map(|i| column(i, rows))
                .collect::<Vec<_>>()
        })
        .prop_map(|columns| Dataset::new(columns).expect("generated columns are consistent"))
}

fn flags_for(dataset: &Dataset) -> QualityFlags {
    let summary = assay::summarize(dataset).unwrap();
    let missing = assay::missing_table(dataset).unwrap();
    assay::compute_quality_flags(&summary, &missing, dataset).unwrap()
}

/// The boolean flags, in a fixed order.
fn booleans(flags: &QualityFlags) -> [bool; 8] {
    [
        flags.has_constant_columns,
        flags.has_high_num_unique,
        flags.has_id_duplicates,
        flags.has_many_zero_values,
        flags.has_high_missing,
        flags.too_few_rows,
        flags.too_many_columns,
        flags.ok_for_model,
    ]
}

// =============================================================================
// Summary Properties
// =============================================================================

proptest! {
    /// Summary shape always matches the dataset.
    #[test]
    fn summary_shape_matches_dataset(ds in dataset()) {
        let summary = assay::summarize(&ds).unwrap();
        prop_assert_eq!(summary.n_rows, ds.n_rows());
        prop_assert_eq!(summary.n_cols, ds.n_cols());
        prop_assert_eq!(summary.columns.len(), ds.n_cols());
    }

    /// Summarizing twice gives the same result.
    #[test]
    fn summarize_is_deterministic(ds in dataset()) {
        prop_assert_eq!(assay::summarize(&ds).unwrap(), assay::summarize(&ds).unwrap());
    }

    /// Missing counts agree between the summary and the missing table.
    #[test]
    fn missing_table_agrees_with_summary(ds in dataset()) {
        let summary = assay::summarize(&ds).unwrap();
        let missing = MissingTable::from_dataset(&ds).unwrap();

        for column in &summary.columns {
            let entry = missing.get(&column.name).unwrap();
            prop_assert_eq!(column.n_missing, entry.missing_count);
            prop_assert_eq!(column.missing_share, entry.missing_share);
            prop_assert!((0.0..=1.0).contains(&entry.missing_share));
        }
    }

    /// Numeric moments are ordered when present.
    #[test]
    fn numeric_moments_are_consistent(ds in dataset()) {
        let summary = assay::summarize(&ds).unwrap();
        for column in &summary.columns {
            if let (Some(min), Some(mean), Some(max)) = (column.min, column.mean, column.max) {
                prop_assert!(min <= max);
                prop_assert!(mean >= min - 1e-6 && mean <= max + 1e-6);
            }
            if let Some(std) = column.std {
                prop_assert!(std >= 0.0);
            }
        }
    }
}

// =============================================================================
// Flag Properties
// =============================================================================

proptest! {
    /// The score stays within [0, 1].
    #[test]
    fn quality_score_is_bounded(ds in dataset()) {
        let flags = flags_for(&ds);
        prop_assert!((0.0..=1.0).contains(&flags.quality_score));
        prop_assert_eq!(flags.ok_for_model, flags.quality_score >= 0.7);
    }

    /// Reversing column order does not change any flag.
    #[test]
    fn flags_ignore_column_order(ds in dataset()) {
        let reversed: Vec<Column> = ds.columns().iter().rev().cloned().collect();
        let reversed = Dataset::new(reversed).unwrap();

        let a = flags_for(&ds);
        let b = flags_for(&reversed);
        prop_assert_eq!(booleans(&a), booleans(&b));
        prop_assert_eq!(a.max_missing_share, b.max_missing_share);
    }
}

// =============================================================================
// Relationship Properties
// =============================================================================

proptest! {
    /// Correlation is symmetric and within [-1, 1].
    #[test]
    fn correlation_is_symmetric_and_bounded(ds in dataset()) {
        let matrix = assay::correlation_matrix(&ds).unwrap();
        let columns: Vec<&str> = matrix.columns().collect();

        for a in &columns {
            prop_assert_eq!(matrix.get(a, a), Some(1.0));
            for b in &columns {
                prop_assert_eq!(matrix.get(a, b), matrix.get(b, a));
                if let Some(r) = matrix.get(a, b) {
                    prop_assert!((-1.0..=1.0).contains(&r));
                }
            }
        }
    }

    /// Top categories respect both limits and are sorted by count.
    #[test]
    fn top_categories_respect_limits(ds in dataset(), max_columns in 0usize..4, top_k in 0usize..4) {
        let top = assay::top_categories(&ds, max_columns, top_k);
        prop_assert!(top.len() <= max_columns);

        for (_, counts) in top.iter() {
            prop_assert!(counts.len() <= top_k);
            prop_assert!(counts.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }
}
