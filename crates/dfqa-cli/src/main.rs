//! dfqa CLI - data-quality assessment for tabular files.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("Warning: {}", e);
    }

    let result = match cli.command {
        Commands::Completeness { input } => commands::completeness::run(input),
        Commands::Uniqueness { input } => commands::uniqueness::run(input),
        Commands::Types { input } => commands::types::run(input),
        Commands::Inconsistencies { input } => commands::inconsistencies::run(input),
        Commands::Assess { input } => commands::assess::run(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
