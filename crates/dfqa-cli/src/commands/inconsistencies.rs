//! Inconsistencies command - heuristic format, type and encoding checks.

use colored::Colorize;
use dfqa::{InconsistencyDetector, InconsistencyReport};

use super::{CommandResult, heading, load, print_json};
use crate::cli::InputArgs;

pub fn run(input: InputArgs) -> CommandResult {
    let (table, source) = load(&input)?;
    let report = InconsistencyDetector::new().detect(&table);

    if input.json {
        return print_json(&report);
    }

    heading("Inconsistencies", &source);
    print_report(&report);
    Ok(())
}

pub fn print_report(report: &InconsistencyReport) {
    if report.is_empty() {
        println!("  {}", "No inconsistencies found".green());
        return;
    }

    for (column, findings) in report.iter() {
        println!("  {}", column.white().bold());
        for finding in findings {
            println!(
                "    {} {} {}",
                "-".yellow(),
                format!("[{}]", finding.category.label()).dimmed(),
                finding.message
            );
        }
    }
}
