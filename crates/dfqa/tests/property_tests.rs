//! Property-based tests for the dfqa assessments.
//!
//! Property-based tests verify:
//! 1. **No panics**: assessments never crash on any table
//! 2. **Determinism**: the same table always yields the same report
//! 3. **Non-destructive**: the input table is never modified
//! 4. **Invariants**: report shape follows the table
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p dfqa --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use dfqa::{
    CellValue, Column, ColumnKind, FindingCategory, Table, check_completeness,
    check_type_consistency, check_uniqueness, detect_inconsistencies, quality::parse_date,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn cell_value() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        any::<bool>().prop_map(CellValue::Boolean),
        (-5i64..5).prop_map(CellValue::Integer),
        prop_oneof![Just(0.0), Just(1.0), Just(2.5), (-100.0f64..100.0)].prop_map(CellValue::Float),
        prop_oneof![
            Just("Yes".to_string()),
            Just("NA".to_string()),
            Just(String::new()),
            Just("2023-01-05".to_string()),
            Just("01/06/2023".to_string()),
            Just("café".to_string()),
            "[a-zA-Z0-9/\\- ]{0,12}",
        ]
        .prop_map(CellValue::Text),
    ]
}

fn column_kind() -> impl Strategy<Value = ColumnKind> {
    prop_oneof![
        Just(ColumnKind::Text),
        Just(ColumnKind::Numeric),
        Just(ColumnKind::Other),
    ]
}

fn table() -> impl Strategy<Value = Table> {
    (0usize..8, 1usize..5).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(
            (column_kind(), prop::collection::vec(cell_value(), rows)),
            cols,
        )
        .prop_map(|specs| {
            let columns = specs
                .into_iter()
                .enumerate()
                .map(|(i, (kind, values))| Column::new(format!("col_{}", i), kind, values))
                .collect();
            Table::new(columns).expect("generated columns are aligned and uniquely named")
        })
    })
}

// =============================================================================
// Detector Properties
// =============================================================================

proptest! {
    #[test]
    fn detect_is_deterministic_and_non_destructive(table in table()) {
        let before = table.clone();
        let first = detect_inconsistencies(&table);
        let second = detect_inconsistencies(&table);

        prop_assert_eq!(&table, &before);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn report_follows_table_column_order(table in table()) {
        let report = detect_inconsistencies(&table);
        let names = table.column_names();

        let positions: Vec<usize> = report
            .column_names()
            .map(|c| names.iter().position(|n| *n == c).expect("reported column exists"))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn at_most_one_finding_per_category(table in table()) {
        let report = detect_inconsistencies(&table);
        for (_, findings) in report.iter() {
            prop_assert!(!findings.is_empty());
            let categories: HashSet<FindingCategory> = findings.iter().map(|f| f.category).collect();
            prop_assert_eq!(categories.len(), findings.len());
        }
    }

    #[test]
    fn numeric_type_and_precision_are_exclusive(table in table()) {
        let report = detect_inconsistencies(&table);
        for (_, findings) in report.iter() {
            let has_type = findings.iter().any(|f| f.category == FindingCategory::NumericTypeMix);
            let has_precision = findings
                .iter()
                .any(|f| f.category == FindingCategory::NumericPrecisionMix);
            prop_assert!(!(has_type && has_precision));
        }
    }

    #[test]
    fn other_columns_never_flagged(table in table()) {
        let report = detect_inconsistencies(&table);
        for column in table.columns() {
            if column.kind == ColumnKind::Other {
                prop_assert!(report.findings(&column.name).is_none());
            }
        }
    }

    #[test]
    fn summaries_cover_every_column(table in table()) {
        match check_completeness(&table) {
            Ok(rows) => {
                prop_assert!(!table.is_empty());
                prop_assert_eq!(rows.len(), table.column_count());
                for row in &rows {
                    prop_assert!((0.0..=100.0).contains(&row.missing_percentage));
                }
                prop_assert_eq!(check_uniqueness(&table).unwrap().len(), table.column_count());
                prop_assert_eq!(check_type_consistency(&table).unwrap().len(), table.column_count());
            }
            Err(_) => {
                prop_assert!(table.is_empty());
            }
        }
    }

    #[test]
    fn parse_date_never_panics(s in "\\PC{0,30}") {
        let _ = parse_date(&s);
    }
}
