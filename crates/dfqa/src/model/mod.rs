//! Tabular data model with explicitly tagged cells.

mod column;
mod table;
mod value;

pub use column::{Column, ColumnKind};
pub use table::Table;
pub use value::{CellValue, ValueType};
