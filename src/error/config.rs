//! Configuration errors

use super::GitRefError;

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> GitRefError {
    GitRefError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates an error for two mutually exclusive options both being set
pub fn conflicting(first: impl Into<String>, second: impl Into<String>) -> GitRefError {
    GitRefError::ConflictingOptions {
        first: first.into(),
        second: second.into(),
    }
}

/// Creates an invalid private key error
pub fn private_key_invalid(reason: impl Into<String>) -> GitRefError {
    GitRefError::PrivateKeyInvalid {
        reason: reason.into(),
    }
}

/// Creates a private key file read error
pub fn private_key_read_failed(path: impl Into<String>, reason: impl Into<String>) -> GitRefError {
    GitRefError::PrivateKeyReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
