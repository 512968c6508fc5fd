//! Git operations behind a lookup
//!
//! This module handles:
//! - Turning credential material into an auth handle ([`auth`], [`key`])
//! - Configuring outbound transport ([`transport`])
//! - Opening a checkout or cloning a single ref ([`locate`], [`clone`])
//! - Resolving branches, tags and HEAD to commits ([`refs`])
//! - Finding the latest tag on a commit ([`tags`])

pub mod auth;
pub mod clone;
pub mod error;
pub mod key;
pub mod locate;
pub mod refs;
pub mod tags;
pub mod transport;
pub mod url;

pub use auth::{AuthHandle, Credentials, HostKeyPolicy};
pub use locate::{RepoParams, RepositoryHandle, find_repository_root, locate};
pub use refs::{ReferenceKind, ReferenceName, ResolvedReference, resolve_reference};
pub use tags::{TagEntry, entries_pointing_at, latest_entry, select_latest, tags_pointing_at};
pub use transport::Transport;
