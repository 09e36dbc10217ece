//! CLI command implementations.

pub mod assess;
pub mod completeness;
pub mod inconsistencies;
pub mod types;
pub mod uniqueness;

use colored::Colorize;
use dfqa::{Parser, ParserConfig, SourceMetadata, Table};

use crate::cli::InputArgs;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load the input file described by the shared arguments.
pub fn load(input: &InputArgs) -> Result<(Table, SourceMetadata), Box<dyn std::error::Error>> {
    if !input.file.exists() {
        return Err(format!("File not found: {}", input.file.display()).into());
    }

    Ok(Parser::with_config(parser_config(input)).parse_file(&input.file)?)
}

/// Parser settings derived from the shared arguments.
pub fn parser_config(input: &InputArgs) -> ParserConfig {
    ParserConfig {
        delimiter: input.delimiter,
        has_header: !input.no_header,
        promote_numeric: !input.no_promote,
        ..ParserConfig::default()
    }
}

/// Print a section heading for human-readable output.
pub fn heading(title: &str, source: &SourceMetadata) {
    println!(
        "{} {} {}",
        title.cyan().bold(),
        "for".cyan(),
        source.file.white()
    );
}

/// Print a value as JSON on stdout.
pub fn print_json(value: &impl serde::Serialize) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
