//! Completeness summary: missing cells per column.

use serde::{Deserialize, Serialize};

use super::{ensure_not_empty, percentage};
use crate::error::Result;
use crate::model::Table;

/// Missingness of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessRow {
    pub column: String,
    /// Number of missing cells.
    pub missing: usize,
    /// Missing cells as a percentage of rows, rounded to two decimals.
    pub missing_percentage: f64,
}

/// Count missing cells in every column.
///
/// Only [`CellValue::Missing`](crate::model::CellValue::Missing) counts;
/// textual placeholders such as `"NA"` are reported by the inconsistency
/// detector instead.
pub fn check_completeness(table: &Table) -> Result<Vec<CompletenessRow>> {
    ensure_not_empty(table)?;

    let total = table.row_count();
    Ok(table
        .columns()
        .iter()
        .map(|column| {
            let missing = column.missing_count();
            CompletenessRow {
                column: column.name.clone(),
                missing,
                missing_percentage: percentage(missing, total),
            }
        })
        .collect())
}
