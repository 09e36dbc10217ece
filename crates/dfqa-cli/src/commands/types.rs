//! Types command - runtime value types per column.

use colored::Colorize;
use dfqa::{TypeConsistencyRow, check_type_consistency};

use super::{CommandResult, heading, load, print_json};
use crate::cli::InputArgs;

pub fn run(input: InputArgs) -> CommandResult {
    let (table, source) = load(&input)?;
    let rows = check_type_consistency(&table)?;

    if input.json {
        return print_json(&rows);
    }

    heading("Data types", &source);
    print_rows(&rows);
    Ok(())
}

pub fn print_rows(rows: &[TypeConsistencyRow]) {
    for row in rows {
        let count = row.type_count.to_string();
        println!(
            "  {:24} {:>3} {}",
            row.column,
            if row.is_consistent() { count.green() } else { count.yellow().bold() },
            row.type_list()
        );
    }
}
