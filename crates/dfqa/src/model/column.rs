//! Named columns and their declared kinds.

use serde::{Deserialize, Serialize};

use super::value::{CellValue, ValueType};

/// Declared kind of a column, used to select which heuristics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free-form values, possibly of mixed runtime types.
    Text,
    /// Integer and floating-point values.
    Numeric,
    /// Anything else (booleans, all-missing columns).
    #[default]
    Other,
}

impl ColumnKind {
    /// Infer a kind from the runtime types of the non-missing values.
    ///
    /// All-numeric values give `Numeric`, all-boolean or all-missing values
    /// give `Other`, and everything else is `Text`.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut seen_any = false;
        let mut all_numeric = true;
        let mut all_boolean = true;

        for value_type in values.into_iter().filter_map(CellValue::value_type) {
            seen_any = true;
            all_numeric &= value_type.is_numeric();
            all_boolean &= value_type == ValueType::Boolean;
        }

        if !seen_any || all_boolean {
            ColumnKind::Other
        } else if all_numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ColumnKind::Text)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

/// A single named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within a table.
    pub name: String,
    /// Declared kind.
    pub kind: ColumnKind,
    /// Cell values in row order.
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a column with an explicit kind.
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Create a column whose kind is inferred from its values.
    pub fn inferred(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        let kind = ColumnKind::infer(&values);
        Self::new(name, kind, values)
    }

    /// Shorthand for a textual column.
    pub fn text<V: Into<CellValue>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(name, ColumnKind::Text, values.into_iter().map(Into::into).collect())
    }

    /// Shorthand for a numeric column.
    pub fn numeric<V: Into<CellValue>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(name, ColumnKind::Numeric, values.into_iter().map(Into::into).collect())
    }

    /// Number of cells, including missing ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the non-missing cells.
    pub fn present(&self) -> impl Iterator<Item = &CellValue> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }
}
