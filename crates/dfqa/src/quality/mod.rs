//! Column-level quality assessments.

mod completeness;
mod dates;
mod inconsistency;
mod types;
mod uniqueness;

pub use completeness::{CompletenessRow, check_completeness};
pub use dates::{canonical_form, parse_date};
pub use inconsistency::{
    BOOLEAN_NUMBERS, BOOLEAN_TEXT_TOKENS, Finding, FindingCategory, InconsistencyDetector,
    InconsistencyReport, MISSING_PLACEHOLDERS, detect_inconsistencies,
};
pub use types::{TypeConsistencyRow, check_type_consistency};
pub use uniqueness::{SAMPLE_SIZE, UniquenessRow, check_uniqueness};

use crate::error::{DfqaError, Result};
use crate::model::Table;

/// Summaries need at least one row and one column.
fn ensure_not_empty(table: &Table) -> Result<()> {
    if table.is_empty() {
        return Err(DfqaError::EmptyData(
            "table has no rows or no columns".to_string(),
        ));
    }
    Ok(())
}

/// `count / total` as a percentage rounded to two decimals.
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 * 100.0 / total as f64;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 10), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }
}
