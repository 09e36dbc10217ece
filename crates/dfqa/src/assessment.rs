//! Main dfqa struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::model::Table;
use crate::quality::{
    CompletenessRow, InconsistencyDetector, InconsistencyReport, TypeConsistencyRow,
    UniquenessRow, check_completeness, check_type_consistency, check_uniqueness,
};

/// Configuration for an assessment run.
#[derive(Debug, Clone, Default)]
pub struct DfqaConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
}

/// Every assessment of one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Metadata about the source file, when loaded from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Missing cells per column.
    pub completeness: Vec<CompletenessRow>,
    /// Distinct values per column.
    pub uniqueness: Vec<UniquenessRow>,
    /// Runtime types per column.
    pub type_consistency: Vec<TypeConsistencyRow>,
    /// Heuristic findings per column.
    pub inconsistencies: InconsistencyReport,
    /// Headline counts.
    pub summary: AssessmentSummary,
}

/// Headline counts across all assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub total_columns: usize,
    pub total_rows: usize,
    /// Columns with at least one missing cell.
    pub columns_with_missing: usize,
    /// Columns holding more than one runtime type.
    pub columns_with_mixed_types: usize,
    /// Columns with at least one inconsistency finding.
    pub columns_with_findings: usize,
    pub total_findings: usize,
    /// Columns whose values are all present and distinct.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_keys: Vec<String>,
}

/// Loads tables and runs the assessments.
pub struct Dfqa {
    parser: Parser,
    detector: InconsistencyDetector,
}

impl Dfqa {
    /// Create an instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(DfqaConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: DfqaConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            detector: InconsistencyDetector::new(),
        }
    }

    /// Load a delimited file and assess it.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AssessmentResult> {
        let (table, source) = self.parser.parse_file(path)?;
        let mut result = self.assess(&table)?;
        result.source = Some(source);
        Ok(result)
    }

    /// Assess an in-memory table.
    ///
    /// Fails with [`DfqaError::EmptyData`](crate::DfqaError::EmptyData) when
    /// the table has no rows or no columns.
    pub fn assess(&self, table: &Table) -> Result<AssessmentResult> {
        let completeness = check_completeness(table)?;
        let uniqueness = check_uniqueness(table)?;
        let type_consistency = check_type_consistency(table)?;
        let inconsistencies = self.detector.detect(table);

        let summary = compute_summary(
            table,
            &completeness,
            &uniqueness,
            &type_consistency,
            &inconsistencies,
        );

        tracing::debug!(
            columns = summary.total_columns,
            rows = summary.total_rows,
            findings = summary.total_findings,
            "assessment complete"
        );

        Ok(AssessmentResult {
            source: None,
            completeness,
            uniqueness,
            type_consistency,
            inconsistencies,
            summary,
        })
    }
}

impl Default for Dfqa {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_summary(
    table: &Table,
    completeness: &[CompletenessRow],
    uniqueness: &[UniquenessRow],
    type_consistency: &[TypeConsistencyRow],
    inconsistencies: &InconsistencyReport,
) -> AssessmentSummary {
    AssessmentSummary {
        total_columns: table.column_count(),
        total_rows: table.row_count(),
        columns_with_missing: completeness.iter().filter(|r| r.missing > 0).count(),
        columns_with_mixed_types: type_consistency
            .iter()
            .filter(|r| !r.is_consistent())
            .count(),
        columns_with_findings: inconsistencies.len(),
        total_findings: inconsistencies.total_findings(),
        possible_keys: uniqueness
            .iter()
            .filter(|r| r.possible_key)
            .map(|r| r.column.clone())
            .collect(),
    }
}
