//! Assess command - every assessment plus a summary.

use colored::Colorize;
use dfqa::{Dfqa, DfqaConfig};

use super::{CommandResult, parser_config, print_json};
use crate::cli::InputArgs;

pub fn run(input: InputArgs) -> CommandResult {
    if !input.file.exists() {
        return Err(format!("File not found: {}", input.file.display()).into());
    }

    let config = DfqaConfig {
        parser: parser_config(&input),
    };
    let result = Dfqa::with_config(config).analyze(&input.file)?;

    if input.json {
        return print_json(&result);
    }

    if let Some(ref source) = result.source {
        println!(
            "{} {} ({}, {:.3} MB)",
            "Assessing".cyan().bold(),
            source.file.white(),
            source.format,
            source.size_mb()
        );
    }

    println!();
    println!("{}", "Missing values:".yellow().bold());
    super::completeness::print_rows(&result.completeness);

    println!();
    println!("{}", "Unique values:".yellow().bold());
    super::uniqueness::print_rows(&result.uniqueness);

    println!();
    println!("{}", "Data types:".yellow().bold());
    super::types::print_rows(&result.type_consistency);

    println!();
    println!("{}", "Inconsistencies:".yellow().bold());
    super::inconsistencies::print_report(&result.inconsistencies);

    let summary = &result.summary;
    println!();
    println!(
        "{} rows x {} columns: {} with missing values, {} with mixed types, {} findings in {} columns",
        summary.total_rows.to_string().white().bold(),
        summary.total_columns.to_string().white().bold(),
        summary.columns_with_missing.to_string().red(),
        summary.columns_with_mixed_types.to_string().yellow(),
        summary.total_findings.to_string().yellow(),
        summary.columns_with_findings
    );

    if summary.total_findings == 0 && summary.columns_with_mixed_types == 0 {
        println!("{}", "No issues found - data looks clean!".green());
    }

    Ok(())
}
