//! Typed configuration for lookups
//!
//! This module contains:
//! - [`ProviderConfig`] - credentials and TLS policy, turned into a [`Transport`] once
//! - [`LookupRequest`] - what a single lookup asks for, turned into [`RepoParams`]
//!
//! Both reject empty option values and mutually exclusive options, so that
//! the engine only ever sees well-formed input.
//!
//! [`Transport`]: crate::git::Transport
//! [`RepoParams`]: crate::git::RepoParams

pub mod provider;
pub mod request;

pub use provider::ProviderConfig;
pub use request::LookupRequest;

use crate::error::{Result, config};

/// Reject `Some("")` for the option called `name`
pub(crate) fn require_non_empty(name: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.is_empty() => Err(config::invalid(format!(
            "option '{name}' must not be empty"
        ))),
        _ => Ok(()),
    }
}
