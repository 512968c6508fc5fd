//! Git operation errors

use super::GitRefError;

pub fn repository_not_found(path: impl Into<String>) -> GitRefError {
    GitRefError::RepositoryNotFound { path: path.into() }
}

pub fn ref_not_found(reference: impl Into<String>) -> GitRefError {
    GitRefError::RefNotFound {
        reference: reference.into(),
    }
}

pub fn remote_ref_not_found(url: impl Into<String>, reference: impl Into<String>) -> GitRefError {
    GitRefError::RemoteRefNotFound {
        url: url.into(),
        reference: reference.into(),
    }
}

pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> GitRefError {
    GitRefError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

pub fn auth_failed(url: impl Into<String>, reason: impl Into<String>) -> GitRefError {
    GitRefError::GitAuthFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

pub fn open_failed(path: impl Into<String>, reason: impl Into<String>) -> GitRefError {
    GitRefError::GitOpenFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn ref_resolve_failed(git_ref: impl Into<String>, reason: impl Into<String>) -> GitRefError {
    GitRefError::GitRefResolveFailed {
        git_ref: git_ref.into(),
        reason: reason.into(),
    }
}

pub fn tag_list_failed(reason: impl Into<String>) -> GitRefError {
    GitRefError::TagListFailed {
        reason: reason.into(),
    }
}
