//! In-memory tables.

use std::collections::HashSet;

use serde::Serialize;

use super::column::Column;
use super::value::CellValue;
use crate::error::{DfqaError, Result};

/// An ordered set of uniquely named, positionally aligned columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, rejecting duplicate names and ragged columns.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut names = HashSet::with_capacity(columns.len());
        if let Some(duplicate) = columns.iter().find(|c| !names.insert(c.name.as_str())) {
            return Err(DfqaError::InvalidTable(format!(
                "duplicate column name '{}'",
                duplicate.name
            )));
        }
        drop(names);

        let row_count = columns.first().map_or(0, Column::len);
        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(DfqaError::InvalidTable(format!(
                "column '{}' has {} values, expected {}",
                ragged.name,
                ragged.len(),
                row_count
            )));
        }

        Ok(Self { columns, row_count })
    }

    /// Build a table from headers and row-major cells, inferring column kinds.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut columns: Vec<Vec<CellValue>> = headers
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(DfqaError::InvalidTable(format!(
                    "row {} has {} values, expected {}",
                    row_idx,
                    row.len(),
                    headers.len()
                )));
            }
            for (values, cell) in columns.iter_mut().zip(row) {
                values.push(cell);
            }
        }

        Self::new(
            headers
                .into_iter()
                .zip(columns)
                .map(|(name, values)| Column::inferred(name, values))
                .collect(),
        )
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// True when the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.columns.get(col).and_then(|c| c.values.get(row))
    }
}
