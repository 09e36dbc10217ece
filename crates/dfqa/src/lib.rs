//! dfqa: data-quality assessment for tabular datasets.
//!
//! dfqa summarises the columns of a table (missingness, value uniqueness,
//! runtime type consistency) and runs a small, fixed set of heuristics that
//! flag format, type and encoding inconsistencies.
//!
//! # Core Principles
//!
//! - **Explicit values**: every cell is tagged as missing, boolean, integer,
//!   float or text when the table is built
//! - **Non-destructive**: assessments never modify the table
//! - **Observations, not failures**: odd values become findings
//!
//! # Example
//!
//! ```
//! use dfqa::{Column, Table, detect_inconsistencies};
//!
//! let table = Table::new(vec![
//!     Column::text("status", ["NA", "active", "inactive"]),
//!     Column::numeric("score", [1.0, 2.0, 3.5]),
//! ])
//! .unwrap();
//!
//! let report = detect_inconsistencies(&table);
//! assert_eq!(report.messages("status"), vec![r#"Missing value placeholders: {"NA"}"#]);
//! assert_eq!(
//!     report.messages("score"),
//!     vec!["Inconsistent numeric precision (int vs float)"]
//! );
//! ```

pub mod error;
pub mod input;
pub mod model;
pub mod quality;

mod assessment;

pub use crate::assessment::{AssessmentResult, AssessmentSummary, Dfqa, DfqaConfig};
pub use error::{DfqaError, Result};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use model::{CellValue, Column, ColumnKind, Table, ValueType};
pub use quality::{
    CompletenessRow, Finding, FindingCategory, InconsistencyDetector, InconsistencyReport,
    TypeConsistencyRow, UniquenessRow, check_completeness, check_type_consistency,
    check_uniqueness, detect_inconsistencies,
};
