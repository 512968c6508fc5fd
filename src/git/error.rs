//! Git error handling
//!
//! This module handles:
//! - Interpreting git2 errors into user-friendly messages
//! - Categorizing remote failures (auth rejected vs. everything else)
//! - Turning clone failures into the matching [`GitRefError`]

use git2::{Error, ErrorClass, ErrorCode};

use crate::error::{GitRefError, git as git_err};

/// What went wrong talking to a remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailure {
    RepositoryNotFound,
    AuthenticationFailed,
    PermissionDenied,
    NetworkError,
    HttpCertificate,
    HttpSsl,
    HostKey,
    Other(ErrorClass),
}

type ErrorCheck = fn(&str, ErrorClass) -> bool;

// Order matters: more specific patterns first.
const ERROR_CLASSIFICATIONS: &[(ErrorCheck, RemoteFailure)] = &[
    (
        |msg, class| {
            class == ErrorClass::Ssh && (msg.contains("host key") || msg.contains("hostkey"))
        },
        RemoteFailure::HostKey,
    ),
    (
        |msg, _| msg.contains("authentication") || msg.contains("credentials"),
        RemoteFailure::AuthenticationFailed,
    ),
    (
        |msg, _| {
            msg.contains("not found")
                || msg.contains("404")
                || msg.contains("does not appear to be a git repository")
        },
        RemoteFailure::RepositoryNotFound,
    ),
    (
        |msg, _| msg.contains("permission denied") || msg.contains("access denied"),
        RemoteFailure::PermissionDenied,
    ),
    (
        |msg, _| msg.contains("certificate"),
        RemoteFailure::HttpCertificate,
    ),
    (
        |msg, class| class == ErrorClass::Http && msg.contains("ssl"),
        RemoteFailure::HttpSsl,
    ),
    (
        |msg, _| {
            msg.contains("connection")
                || msg.contains("network")
                || msg.contains("resolve")
                || msg.contains("timeout")
                || msg.contains("timed out")
        },
        RemoteFailure::NetworkError,
    ),
];

/// Classify a git2 error raised while talking to a remote
pub fn classify(err: &Error) -> RemoteFailure {
    if err.code() == ErrorCode::Auth {
        return RemoteFailure::AuthenticationFailed;
    }
    if err.code() == ErrorCode::Certificate {
        return RemoteFailure::HttpCertificate;
    }

    let message = err.message().to_lowercase();
    for (check, result) in ERROR_CLASSIFICATIONS {
        if check(&message, err.class()) {
            return *result;
        }
    }
    RemoteFailure::Other(err.class())
}

/// Interpret a git2 error and provide a more user-friendly message
pub fn interpret_git_error(err: &Error) -> String {
    match classify(err) {
        RemoteFailure::RepositoryNotFound => "Repository not found".to_string(),
        RemoteFailure::AuthenticationFailed => format!("Authentication failed: {}", err.message()),
        RemoteFailure::PermissionDenied => "Permission denied".to_string(),
        RemoteFailure::NetworkError => format!("Network error: {}", err.message()),
        RemoteFailure::HttpCertificate => format!("Certificate error: {}", err.message()),
        RemoteFailure::HttpSsl => format!("SSL error: {}", err.message()),
        RemoteFailure::HostKey => format!("Host key verification failed: {}", err.message()),
        RemoteFailure::Other(class) => match class {
            ErrorClass::Http | ErrorClass::Ssh => {
                format!("{} error: {}", error_class_name(class), err.message())
            }
            _ => err.message().to_string(),
        },
    }
}

/// Map a failure during clone/fetch of `url` to the reported error
///
/// Rejected credentials become [`GitRefError::GitAuthFailed`]; every other
/// remote failure is a [`GitRefError::GitCloneFailed`].
pub fn clone_error(url: &str, err: &Error) -> GitRefError {
    let reason = interpret_git_error(err);
    match classify(err) {
        RemoteFailure::AuthenticationFailed | RemoteFailure::PermissionDenied => {
            git_err::auth_failed(url, reason)
        }
        _ => git_err::clone_failed(url, reason),
    }
}

/// Get display name for error class
fn error_class_name(class: ErrorClass) -> &'static str {
    match class {
        ErrorClass::Http => "HTTP",
        ErrorClass::Ssh => "SSH",
        _ => "Unknown",
    }
}
