//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - lookup: Lookup command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod lookup;

pub use completions::CompletionsArgs;
pub use lookup::{LookupArgs, OutputFormat};

/// gitref - resolve git references to commits
///
/// Report the commit a branch, tag or HEAD points to, in a local checkout or
/// a remote repository.
#[derive(Parser, Debug)]
#[command(
    name = "gitref",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Resolve git branches and tags to commits",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  gitref lookup                                      \x1b[90m# HEAD of the current checkout\x1b[0m\n   \
                  gitref lookup --path ../infra --tag v1.2.0         \x1b[90m# A tag in another checkout\x1b[0m\n   \
                  gitref lookup --url https://host/r.git --branch main \x1b[90m# A remote branch\x1b[0m\n   \
                  gitref lookup --format json                        \x1b[90m# Machine-readable output\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a reference and print its attributes
    Lookup(LookupArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
