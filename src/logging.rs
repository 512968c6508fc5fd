//! Logging setup
//!
//! Logs go to stderr so that stdout only ever carries the lookup result.
//! `RUST_LOG` is honoured unless `--verbose` forces debug output.

use tracing_subscriber::EnvFilter;

/// Level used when neither `--verbose` nor `RUST_LOG` says otherwise
pub const DEFAULT_LEVEL: &str = "warn";

fn filter_directive(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Install the global tracing subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let directive = filter_directive(verbose, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
