//! Uniqueness command - distinct values per column.

use colored::Colorize;
use dfqa::{UniquenessRow, check_uniqueness};

use super::{CommandResult, heading, load, print_json};
use crate::cli::InputArgs;

pub fn run(input: InputArgs) -> CommandResult {
    let (table, source) = load(&input)?;
    let rows = check_uniqueness(&table)?;

    if input.json {
        return print_json(&rows);
    }

    heading("Unique values", &source);
    print_rows(&rows);
    Ok(())
}

pub fn print_rows(rows: &[UniquenessRow]) {
    for row in rows {
        let sample: Vec<String> = row.sample.iter().map(ToString::to_string).collect();
        println!(
            "  {:24} {:>8} {:>7.2}%  [{}]{}",
            row.column,
            row.unique_count,
            row.unique_percentage,
            sample.join(", ").dimmed(),
            if row.possible_key {
                format!(" {}", "PK?".green().bold())
            } else {
                String::new()
            }
        );
    }
}
