//! gitref - resolve git references to commits
//!
//! Looks up a branch, a tag or HEAD in a local checkout or a remote
//! repository and reports the commit it points to, along with the branch
//! and the latest tag on that commit.
//!
//! ```no_run
//! use gitref::config::{LookupRequest, ProviderConfig};
//!
//! # fn main() -> gitref::error::Result<()> {
//! let transport = ProviderConfig::default().into_transport()?;
//! let params = LookupRequest {
//!     url: Some("https://github.com/rust-lang/log.git".to_string()),
//!     branch: Some("master".to_string()),
//!     ..LookupRequest::default()
//! }
//! .into_params()?;
//! let result = gitref::lookup::lookup(&params, &transport)?;
//! println!("{}", result.commit_sha);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod lookup;
pub mod temp;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::{ErrorKind, GitRefError, Result};
pub use lookup::{LookupResult, lookup};
