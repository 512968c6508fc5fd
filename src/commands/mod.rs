//! Command implementations for the gitref CLI

pub mod completions;
pub mod lookup;
pub mod version;

use crate::cli::{Cli, Commands};
use crate::error::Result;

/// Run the parsed command line
///
/// # Errors
///
/// Returns whatever error the selected command fails with.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Lookup(args) => lookup::run(&args),
        Commands::Version => version::run(),
        Commands::Completions(args) => completions::run(args),
    }
}
