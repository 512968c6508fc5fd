//! Error types and handling for gitref
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every failure site has its own variant so the message names the operation
//! that failed. [`GitRefError::kind`] folds the variants back into the small
//! taxonomy callers act on:
//! - [`ErrorKind::Config`]: malformed credentials, conflicting options
//! - [`ErrorKind::NotFound`]: no repository at a path, no reference by a name
//! - [`ErrorKind::Network`]: clone/fetch failures
//! - [`ErrorKind::Auth`]: the remote rejected the credentials
//! - [`ErrorKind::Repository`]: an existing local store could not be read
//!
//! Constructor helpers live in sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`git`]: Git operation errors

pub mod config;
pub mod git;


use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Coarse classification of a [`GitRefError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    NotFound,
    Network,
    Auth,
    Repository,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "config",
            ErrorKind::NotFound => "not found",
            ErrorKind::Network => "network",
            ErrorKind::Auth => "auth",
            ErrorKind::Repository => "repository",
        };
        f.write_str(name)
    }
}

/// Main error type for gitref operations
#[derive(Error, Diagnostic, Debug)]
pub enum GitRefError {
    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(gitref::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Options '{first}' and '{second}' cannot be used together")]
    #[diagnostic(
        code(gitref::config::conflicting_options),
        help("Set only one of the two options (check the GIT_* environment variables too)")
    )]
    ConflictingOptions { first: String, second: String },

    #[error("Invalid private key: {reason}")]
    #[diagnostic(
        code(gitref::config::private_key_invalid),
        help("Provide a PEM-encoded private key, and its passphrase if the key is encrypted")
    )]
    PrivateKeyInvalid { reason: String },

    #[error("Failed to read private key file '{path}': {reason}")]
    #[diagnostic(code(gitref::config::private_key_read_failed))]
    PrivateKeyReadFailed { path: String, reason: String },

    // Lookup errors
    #[error("No git repository found at '{path}' or any parent directory")]
    #[diagnostic(
        code(gitref::git::repository_not_found),
        help("Pass --path pointing inside a git checkout, or --url for a remote repository")
    )]
    RepositoryNotFound { path: String },

    #[error("Reference '{reference}' not found")]
    #[diagnostic(
        code(gitref::git::ref_not_found),
        help("Branch and tag names are matched exactly; short hashes are not accepted")
    )]
    RefNotFound { reference: String },

    #[error("Reference '{reference}' not found on remote {url}")]
    #[diagnostic(code(gitref::git::remote_ref_not_found))]
    RemoteRefNotFound { url: String, reference: String },

    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(gitref::git::clone_failed),
        help("Check that URL is correct and the host is reachable")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Authentication failed for {url}: {reason}")]
    #[diagnostic(
        code(gitref::git::auth_failed),
        help("Check the configured username/password or private key (GIT_USERNAME, GIT_PRIVATE_KEY, ...)")
    )]
    GitAuthFailed { url: String, reason: String },

    #[error("Failed to open repository at '{path}': {reason}")]
    #[diagnostic(code(gitref::git::open_failed))]
    GitOpenFailed { path: String, reason: String },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(gitref::git::ref_resolve_failed))]
    GitRefResolveFailed { git_ref: String, reason: String },

    #[error("Failed to list tags: {reason}")]
    #[diagnostic(code(gitref::git::tag_list_failed))]
    TagListFailed { reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(gitref::fs::io_error))]
    IoError { message: String },
}

impl GitRefError {
    /// Classify this error into the lookup error taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GitRefError::ConfigInvalid { .. }
            | GitRefError::ConflictingOptions { .. }
            | GitRefError::PrivateKeyInvalid { .. }
            | GitRefError::PrivateKeyReadFailed { .. } => ErrorKind::Config,
            GitRefError::RepositoryNotFound { .. }
            | GitRefError::RefNotFound { .. }
            | GitRefError::RemoteRefNotFound { .. } => ErrorKind::NotFound,
            GitRefError::GitCloneFailed { .. } => ErrorKind::Network,
            GitRefError::GitAuthFailed { .. } => ErrorKind::Auth,
            GitRefError::GitOpenFailed { .. }
            | GitRefError::GitRefResolveFailed { .. }
            | GitRefError::TagListFailed { .. }
            | GitRefError::IoError { .. } => ErrorKind::Repository,
        }
    }
}

impl From<std::io::Error> for GitRefError {
    fn from(err: std::io::Error) -> Self {
        GitRefError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GitRefError {
    fn from(err: serde_json::Error) -> Self {
        GitRefError::IoError {
            message: format!("failed to encode output: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GitRefError>;
