//! Type-consistency summary: runtime types per column.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::ensure_not_empty;
use crate::error::Result;
use crate::model::{CellValue, Table, ValueType};

/// Runtime types found in a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeConsistencyRow {
    pub column: String,
    /// Number of distinct runtime types among present values.
    pub type_count: usize,
    /// Distinct runtime types in order of first appearance.
    pub types: Vec<ValueType>,
}

impl TypeConsistencyRow {
    /// Comma-separated type names, e.g. `int, str`.
    pub fn type_list(&self) -> String {
        self.types
            .iter()
            .map(ValueType::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// At most one runtime type.
    pub fn is_consistent(&self) -> bool {
        self.type_count <= 1
    }
}

/// Tally the runtime types of every column. Missing cells are not a type.
pub fn check_type_consistency(table: &Table) -> Result<Vec<TypeConsistencyRow>> {
    ensure_not_empty(table)?;

    Ok(table
        .columns()
        .iter()
        .map(|column| {
            let types: IndexSet<ValueType> =
                column.values.iter().filter_map(CellValue::value_type).collect();

            TypeConsistencyRow {
                column: column.name.clone(),
                type_count: types.len(),
                types: types.into_iter().collect(),
            }
        })
        .collect())
}
