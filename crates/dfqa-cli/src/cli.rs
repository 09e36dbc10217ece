//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dfqa: data-quality assessment for tabular files
#[derive(Parser)]
#[command(name = "dfqa")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count missing values per column
    Completeness {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Count distinct values per column
    Uniqueness {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Tally runtime value types per column
    Types {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Detect format, type and encoding inconsistencies
    Inconsistencies {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Run every assessment and print a summary
    Assess {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Options shared by every command.
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Path to the data file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter: a single ASCII character or "tab" (default: auto-detect)
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// The file has no header row
    #[arg(long)]
    pub no_header: bool,

    /// Keep integer cells as integers in columns that also hold floats
    #[arg(long)]
    pub no_promote: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(format!(
            "'{}' is not a single ASCII character or \"tab\"",
            other
        )),
    }
}
