//! Uniqueness summary: distinct values per column.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::{ensure_not_empty, percentage};
use crate::error::Result;
use crate::model::{CellValue, Table};

/// Number of distinct values shown per column.
pub const SAMPLE_SIZE: usize = 5;

/// Uniqueness of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniquenessRow {
    pub column: String,
    /// Distinct non-missing values.
    pub unique_count: usize,
    /// First distinct values in row order, missing included.
    pub sample: Vec<CellValue>,
    /// Distinct values as a percentage of rows, rounded to two decimals.
    pub unique_percentage: f64,
    /// Every row holds a distinct, present value.
    pub possible_key: bool,
}

/// Count distinct values in every column.
pub fn check_uniqueness(table: &Table) -> Result<Vec<UniquenessRow>> {
    ensure_not_empty(table)?;

    let total = table.row_count();
    Ok(table
        .columns()
        .iter()
        .map(|column| {
            let distinct: IndexSet<&CellValue> = column.values.iter().collect();
            let unique_count = distinct.iter().filter(|v| !v.is_missing()).count();

            UniquenessRow {
                column: column.name.clone(),
                unique_count,
                sample: distinct.into_iter().take(SAMPLE_SIZE).cloned().collect(),
                unique_percentage: percentage(unique_count, total),
                possible_key: unique_count == total,
            }
        })
        .collect())
}
