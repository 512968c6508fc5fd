//! Git reference resolution
//!
//! This module handles:
//! - Naming the branch or tag a lookup asks for ([`ReferenceName`])
//! - Resolving that name, or HEAD, to a commit ([`resolve_reference`])
//!
//! Names are matched exactly. There is no fallback from a missing branch to
//! HEAD, no guessing between branches and tags, and no short-hash lookup.

use std::fmt;

use git2::{ErrorCode, Reference, Repository};

use crate::error::{Result, git as git_err};

/// A branch or tag name requested by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceName {
    Branch(String),
    Tag(String),
}

impl ReferenceName {
    /// The short name, e.g. `main` or `v1.0.0`
    #[must_use]
    pub fn short_name(&self) -> &str {
        match self {
            ReferenceName::Branch(name) | ReferenceName::Tag(name) => name,
        }
    }

    /// The full reference name, e.g. `refs/heads/main`
    #[must_use]
    pub fn full_name(&self) -> String {
        match self {
            ReferenceName::Branch(name) => format!("refs/heads/{name}"),
            ReferenceName::Tag(name) => format!("refs/tags/{name}"),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ReferenceKind {
        match self {
            ReferenceName::Branch(_) => ReferenceKind::Branch,
            ReferenceName::Tag(_) => ReferenceKind::Tag,
        }
    }
}

impl fmt::Display for ReferenceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// What kind of reference a lookup resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Branch,
    Tag,
    /// HEAD points straight at a commit
    Detached,
}

/// The reference reported by a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    kind: ReferenceKind,
    short_name: String,
    hash: String,
}

impl ResolvedReference {
    #[must_use]
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Full 40 character commit hash
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    #[must_use]
    pub fn is_tag(&self) -> bool {
        self.kind == ReferenceKind::Tag
    }
}

fn peeled_hash(reference: &Reference<'_>, name: &str) -> Result<String> {
    reference
        .peel_to_commit()
        .map(|commit| commit.id().to_string())
        .map_err(|e| git_err::ref_resolve_failed(name, e.message()))
}

fn resolve_head(repo: &Repository) -> Result<ResolvedReference> {
    let head = repo.head().map_err(|e| match e.code() {
        ErrorCode::UnbornBranch | ErrorCode::NotFound => git_err::ref_not_found("HEAD"),
        _ => git_err::ref_resolve_failed("HEAD", e.message()),
    })?;

    let hash = peeled_hash(&head, "HEAD")?;

    // A HEAD resolving to a tag is reported as that tag
    let shorthand = || head.shorthand().unwrap_or_default().to_string();
    let (kind, short_name) = if head.is_branch() {
        (ReferenceKind::Branch, shorthand())
    } else if head.is_tag() {
        (ReferenceKind::Tag, shorthand())
    } else {
        (ReferenceKind::Detached, "HEAD".to_string())
    };

    Ok(ResolvedReference {
        kind,
        short_name,
        hash,
    })
}

fn resolve_named(repo: &Repository, name: &ReferenceName) -> Result<ResolvedReference> {
    let full_name = name.full_name();
    let reference = repo.find_reference(&full_name).map_err(|e| match e.code() {
        ErrorCode::NotFound | ErrorCode::InvalidSpec => git_err::ref_not_found(&full_name),
        _ => git_err::ref_resolve_failed(&full_name, e.message()),
    })?;

    Ok(ResolvedReference {
        kind: name.kind(),
        short_name: name.short_name().to_string(),
        hash: peeled_hash(&reference, &full_name)?,
    })
}

/// Resolve the requested reference, or HEAD when none is given
///
/// # Errors
///
/// Fails with a not-found error when the branch or tag does not exist or HEAD
/// is unborn, and with a resolve error when the reference does not lead to a
/// commit.
pub fn resolve_reference(
    repo: &Repository,
    name: Option<&ReferenceName>,
) -> Result<ResolvedReference> {
    let resolved = match name {
        Some(name) => resolve_named(repo, name)?,
        None => resolve_head(repo)?,
    };
    tracing::debug!(
        kind = ?resolved.kind,
        name = %resolved.short_name,
        hash = %resolved.hash,
        "resolved reference"
    );
    Ok(resolved)
}
