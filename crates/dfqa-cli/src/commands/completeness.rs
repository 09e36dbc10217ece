//! Completeness command - missing values per column.

use colored::Colorize;
use dfqa::{CompletenessRow, check_completeness};

use super::{CommandResult, heading, load, print_json};
use crate::cli::InputArgs;

pub fn run(input: InputArgs) -> CommandResult {
    let (table, source) = load(&input)?;
    let rows = check_completeness(&table)?;

    if input.json {
        return print_json(&rows);
    }

    heading("Missing values", &source);
    print_rows(&rows);
    Ok(())
}

pub fn print_rows(rows: &[CompletenessRow]) {
    for row in rows {
        let pct = format!("{:>7.2}%", row.missing_percentage);
        println!(
            "  {:24} {:>8} {}",
            row.column,
            row.missing,
            if row.missing > 0 { pct.red() } else { pct.green() }
        );
    }
}
