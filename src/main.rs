//! gitref - resolve git references to commits
//!
//! Command line entry point: parses arguments, sets up logging and prints a
//! single `Error: ...` line with exit status 1 on failure.

use clap::Parser;

use gitref::cli::Cli;
use gitref::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::run(cli) {
        tracing::debug!(kind = %e.kind(), "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
