//! Heuristic inconsistency detection.
//!
//! Scans every column of a [`Table`] and reports format, type and encoding
//! anomalies as human-readable findings. Textual columns go through the date,
//! boolean, placeholder and encoding checks; numeric columns go through the
//! representation and precision checks. Each check contributes at most one
//! finding per column, and findings keep the order the checks run in.
//!
//! The detector observes; it never fails. A value that cannot be parsed as a
//! date is simply skipped, and a table without rows produces an empty report.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::dates::{canonical_form, parse_date};
use crate::model::{CellValue, Column, Table, ValueType};

/// Textual spellings of boolean values. Matching is case-sensitive.
pub const BOOLEAN_TEXT_TOKENS: &[&str] = &[
    "TRUE", "FALSE", "True", "False", "T", "F", "t", "f", "YES", "NO", "Yes", "No", "Y", "N",
    "y", "n",
];

/// Numeric literals treated as boolean, in both integer and float form.
pub const BOOLEAN_NUMBERS: &[i64] = &[0, 1];

/// Strings commonly used in place of a missing value. Matching is case-sensitive.
pub const MISSING_PLACEHOLDERS: &[&str] = &["NA", "N/A", "null", "none", "None", "-", "", "missing"];

/// Category of a detected inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    /// Dates resolving to different calendar days in mixed layouts.
    DateFormat,
    /// Boolean-like tokens among the column's values.
    BooleanRepresentation,
    /// String placeholders standing in for missing values.
    MissingPlaceholder,
    /// Characters outside 7-bit ASCII.
    Encoding,
    /// More than one runtime representation in a numeric column.
    NumericTypeMix,
    /// Integral and fractional floats in the same column.
    NumericPrecisionMix,
}

impl FindingCategory {
    /// Get a human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            FindingCategory::DateFormat => "Date Format",
            FindingCategory::BooleanRepresentation => "Boolean Representation",
            FindingCategory::MissingPlaceholder => "Missing Placeholder",
            FindingCategory::Encoding => "Encoding",
            FindingCategory::NumericTypeMix => "Numeric Type Mix",
            FindingCategory::NumericPrecisionMix => "Numeric Precision Mix",
        }
    }
}

/// One detected anomaly in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Affected column name.
    pub column: String,
    /// Heuristic that produced the finding.
    pub category: FindingCategory,
    /// Human-readable description, embedding the offending values.
    pub message: String,
}

impl Finding {
    fn new(column: &Column, category: FindingCategory, message: impl Into<String>) -> Self {
        Self {
            column: column.name.clone(),
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.column, self.message)
    }
}

/// Findings grouped by column, in table column order.
///
/// Only columns with at least one finding are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InconsistencyReport {
    columns: IndexMap<String, Vec<Finding>>,
}

impl InconsistencyReport {
    /// True when no column has a finding.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of flagged columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Total number of findings across all columns.
    pub fn total_findings(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Findings for a column, if it was flagged.
    pub fn findings(&self, column: &str) -> Option<&[Finding]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Finding messages for a column, empty if it was not flagged.
    pub fn messages(&self, column: &str) -> Vec<&str> {
        self.findings(column)
            .map(|f| f.iter().map(|f| f.message.as_str()).collect())
            .unwrap_or_default()
    }

    /// Flagged column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Iterate over (column, findings) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Finding])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Two-column form: column name and its ordered messages.
    pub fn to_rows(&self) -> Vec<(String, Vec<String>)> {
        self.columns
            .iter()
            .map(|(name, findings)| {
                (
                    name.clone(),
                    findings.iter().map(|f| f.message.clone()).collect(),
                )
            })
            .collect()
    }
}

/// Runs the fixed set of inconsistency heuristics over a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct InconsistencyDetector;

impl InconsistencyDetector {
    pub fn new() -> Self {
        Self
    }

    /// Inspect every column and collect its findings.
    pub fn detect(&self, table: &Table) -> InconsistencyReport {
        let mut report = InconsistencyReport::default();

        for column in table.columns() {
            let findings = self.inspect_column(column);
            if !findings.is_empty() {
                tracing::debug!(
                    column = %column.name,
                    findings = findings.len(),
                    "column has inconsistencies"
                );
                report.columns.insert(column.name.clone(), findings);
            }
        }

        tracing::debug!(
            columns = table.column_count(),
            rows = table.row_count(),
            flagged = report.len(),
            "inconsistency scan complete"
        );

        report
    }

    /// Run every applicable check against a single column.
    pub fn inspect_column(&self, column: &Column) -> Vec<Finding> {
        let mut findings = Vec::new();

        if column.kind.is_text() {
            let distinct: IndexSet<&CellValue> = column.present().collect();

            findings.extend(self.check_date_formats(column));
            findings.extend(self.check_boolean_values(column, &distinct));
            findings.extend(self.check_missing_placeholders(column, &distinct));
            findings.extend(self.check_encoding(column));
        }

        if column.kind.is_numeric() {
            match self.check_numeric_types(column) {
                Some(finding) => findings.push(finding),
                None => findings.extend(self.check_numeric_precision(column)),
            }
        }

        findings
    }

    fn check_date_formats(&self, column: &Column) -> Option<Finding> {
        let mut forms: BTreeSet<String> = BTreeSet::new();

        for text in column.present().filter_map(CellValue::as_text) {
            match parse_date(text) {
                Some(date) => {
                    forms.insert(canonical_form(date));
                }
                None => tracing::trace!(column = %column.name, value = text, "not a date"),
            }
        }

        (forms.len() > 1).then(|| {
            Finding::new(
                column,
                FindingCategory::DateFormat,
                format!(
                    "Inconsistent date formats: {}",
                    render_set(forms.iter().map(|f| format!("{:?}", f)))
                ),
            )
        })
    }

    /// Reports the column's whole distinct-value set, not just the
    /// boolean-like members. Whole floats and equal integers count once.
    fn check_boolean_values(
        &self,
        column: &Column,
        distinct: &IndexSet<&CellValue>,
    ) -> Option<Finding> {
        distinct.iter().any(|v| is_boolean_like(v)).then(|| {
            Finding::new(
                column,
                FindingCategory::BooleanRepresentation,
                format!(
                    "Possible inconsistent boolean values: {}",
                    render_set(distinct.iter())
                ),
            )
        })
    }

    fn check_missing_placeholders(
        &self,
        column: &Column,
        distinct: &IndexSet<&CellValue>,
    ) -> Option<Finding> {
        let found: Vec<&&CellValue> = distinct
            .iter()
            .filter(|v| v.as_text().is_some_and(|s| MISSING_PLACEHOLDERS.contains(&s)))
            .collect();

        (!found.is_empty()).then(|| {
            Finding::new(
                column,
                FindingCategory::MissingPlaceholder,
                format!("Missing value placeholders: {}", render_set(found)),
            )
        })
    }

    fn check_encoding(&self, column: &Column) -> Option<Finding> {
        column
            .present()
            .any(|v| !v.to_text().is_ascii())
            .then(|| {
                Finding::new(
                    column,
                    FindingCategory::Encoding,
                    "Non-ASCII or encoding anomalies detected",
                )
            })
    }

    fn check_numeric_types(&self, column: &Column) -> Option<Finding> {
        let types: IndexSet<ValueType> = column.present().filter_map(CellValue::value_type).collect();

        (types.len() > 1).then(|| {
            let names: Vec<&str> = types.iter().map(ValueType::name).collect();
            Finding::new(
                column,
                FindingCategory::NumericTypeMix,
                format!("Mixed numeric types: [{}]", names.join(", ")),
            )
        })
    }

    fn check_numeric_precision(&self, column: &Column) -> Option<Finding> {
        let mut integral = false;
        let mut fractional = false;

        for value in column.present() {
            if let CellValue::Float(f) = value {
                if f.is_nan() {
                    continue;
                }
                if f.is_finite() && f.fract() == 0.0 {
                    integral = true;
                } else {
                    fractional = true;
                }
            }
        }

        (integral && fractional).then(|| {
            Finding::new(
                column,
                FindingCategory::NumericPrecisionMix,
                "Inconsistent numeric precision (int vs float)",
            )
        })
    }
}

/// Detect inconsistencies with the default detector.
pub fn detect_inconsistencies(table: &Table) -> InconsistencyReport {
    InconsistencyDetector::new().detect(table)
}

fn is_boolean_like(value: &CellValue) -> bool {
    match value {
        CellValue::Text(s) => BOOLEAN_TEXT_TOKENS.contains(&s.as_str()),
        CellValue::Integer(i) => BOOLEAN_NUMBERS.contains(i),
        CellValue::Float(f) => BOOLEAN_NUMBERS.iter().any(|n| *n as f64 == *f),
        CellValue::Boolean(_) => true,
        CellValue::Missing => false,
    }
}

fn render_set<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    let parts: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    format!("{{{}}}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnKind;

    fn table(columns: Vec<Column>) -> Table {
        Table::new(columns).unwrap()
    }

    fn categories(report: &InconsistencyReport, column: &str) -> Vec<FindingCategory> {
        report
            .findings(column)
            .map(|f| f.iter().map(|f| f.category).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_same_date_in_two_layouts_is_consistent() {
        let report = detect_inconsistencies(&table(vec![Column::text(
            "visit",
            ["2023-01-05", "01/05/2023"],
        )]));
        assert!(report.is_empty());
    }

    #[test]
    fn test_distinct_dates_are_reported() {
        let report = detect_inconsistencies(&table(vec![Column::text(
            "visit",
            ["2023-02-05", "2023-01-05", "not a date"],
        )]));
        assert_eq!(
            report.messages("visit"),
            vec![r#"Inconsistent date formats: {"2023-01-05", "2023-02-05"}"#]
        );
    }

    #[test]
    fn test_boolean_finding_lists_every_distinct_value() {
        let report = detect_inconsistencies(&table(vec![Column::text(
            "consent",
            ["Yes", "No", "Maybe", "Yes"],
        )]));
        assert_eq!(
            report.messages("consent"),
            vec![r#"Possible inconsistent boolean values: {"Yes", "No", "Maybe"}"#]
        );
    }

    #[test]
    fn test_boolean_numbers_in_text_column() {
        let column = Column::new(
            "flag",
            ColumnKind::Text,
            vec![CellValue::from("on"), CellValue::from(1.0), CellValue::from(0)],
        );
        let report = detect_inconsistencies(&table(vec![column]));
        assert_eq!(
            report.messages("flag"),
            vec![r#"Possible inconsistent boolean values: {"on", 1.0, 0}"#]
        );
    }

    #[test]
    fn test_whole_float_and_integer_are_one_distinct_value() {
        let column = Column::new(
            "flag",
            ColumnKind::Text,
            vec![CellValue::from(1), CellValue::from("y"), CellValue::from(1.0)],
        );
        let report = detect_inconsistencies(&table(vec![column]));
        assert_eq!(
            report.messages("flag"),
            vec![r#"Possible inconsistent boolean values: {1, "y"}"#]
        );
    }

    #[test]
    fn test_placeholder_finding_lists_only_matches() {
        let report = detect_inconsistencies(&table(vec![Column::text(
            "status",
            ["NA", "active", "inactive"],
        )]));
        assert_eq!(
            report.messages("status"),
            vec![r#"Missing value placeholders: {"NA"}"#]
        );
    }

    #[test]
    fn test_placeholders_are_case_sensitive() {
        let report = detect_inconsistencies(&table(vec![Column::text(
            "status",
            ["na", "NULL", "Missing", "ok"],
        )]));
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_string_placeholder_is_not_missing() {
        let column = Column::text("note", [Some("x"), Some(""), None]);
        let report = detect_inconsistencies(&table(vec![column]));
        assert_eq!(
            report.messages("note"),
            vec![r#"Missing value placeholders: {""}"#]
        );
    }

    #[test]
    fn test_encoding_anomaly() {
        let report = detect_inconsistencies(&table(vec![
            Column::text("accented", ["café", "tea"]),
            Column::text("plain", ["cafe", "tea"]),
        ]));
        assert_eq!(
            report.messages("accented"),
            vec!["Non-ASCII or encoding anomalies detected"]
        );
        assert!(report.findings("plain").is_none());
    }

    #[test]
    fn test_mixed_numeric_types_skip_precision() {
        let column = Column::numeric(
            "dose",
            [CellValue::from(1), CellValue::from(2.5), CellValue::from(3)],
        );
        let report = detect_inconsistencies(&table(vec![column]));
        assert_eq!(
            categories(&report, "dose"),
            vec![FindingCategory::NumericTypeMix]
        );
        assert_eq!(
            report.messages("dose"),
            vec!["Mixed numeric types: [int, float]"]
        );
    }

    #[test]
    fn test_precision_mix() {
        let mixed = Column::numeric("mixed", [1.0, 2.0, 3.5]);
        let whole = Column::numeric("whole", [1.0, 2.0, 3.0]);
        let ints = Column::numeric("ints", [1, 2, 3]);
        let report = detect_inconsistencies(&table(vec![mixed, whole, ints]));

        assert_eq!(
            report.messages("mixed"),
            vec!["Inconsistent numeric precision (int vs float)"]
        );
        assert!(report.findings("whole").is_none());
        assert!(report.findings("ints").is_none());
    }

    #[test]
    fn test_findings_follow_check_order() {
        let column = Column::text(
            "messy",
            ["2023-01-05", "2024-03-01", "Y", "N/A", "naïve"],
        );
        let report = detect_inconsistencies(&table(vec![column]));
        assert_eq!(
            categories(&report, "messy"),
            vec![
                FindingCategory::DateFormat,
                FindingCategory::BooleanRepresentation,
                FindingCategory::MissingPlaceholder,
                FindingCategory::Encoding,
            ]
        );
    }

    #[test]
    fn test_other_columns_are_ignored() {
        let flags = Column::new(
            "flag",
            ColumnKind::Other,
            vec![CellValue::from(true), CellValue::from("Y")],
        );
        let report = detect_inconsistencies(&table(vec![flags]));
        assert!(report.is_empty());
    }

    #[test]
    fn test_zero_rows_gives_empty_report() {
        let report = detect_inconsistencies(&table(vec![
            Column::text("a", Vec::<&str>::new()),
            Column::numeric("b", Vec::<f64>::new()),
        ]));
        assert!(report.is_empty());
        assert_eq!(report.total_findings(), 0);
    }

    #[test]
    fn test_report_preserves_column_order() {
        let report = detect_inconsistencies(&table(vec![
            Column::text("z", ["é"]),
            Column::text("a", ["NA"]),
            Column::text("m", ["ok"]),
        ]));
        assert_eq!(report.column_names().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(report.to_rows()[1].1, vec![r#"Missing value placeholders: {"NA"}"#]);
    }

    #[test]
    fn test_report_serializes_as_map() {
        let report = detect_inconsistencies(&table(vec![Column::text("a", ["NA"])]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["a"][0]["category"], "missing_placeholder");
    }
}
