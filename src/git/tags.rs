//! Tag index
//!
//! Enumerates the tags whose target peels to a given commit and picks the
//! "latest" of them. Selection happens in two tiers: if any name parses as a
//! version the highest version wins, otherwise names are compared as plain
//! strings.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use git2::{Oid, Reference, Repository};
use semver::Version;

use crate::error::{Result, git as git_err};

const TAG_PREFIX: &str = "refs/tags/";

/// A tag together with the commit it dereferences to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub name: String,
    /// Peeled commit id
    pub target: Oid,
    /// The name read as a version, see [`parse_version`]
    pub version: Option<Version>,
}

fn entry_for(reference: &Reference<'_>) -> Option<TagEntry> {
    let name = reference.name()?.strip_prefix(TAG_PREFIX)?.to_string();
    // Tags on trees or blobs have no commit to report
    let target = reference.peel_to_commit().ok()?.id();
    let version = parse_version(&name);
    Some(TagEntry {
        name,
        target,
        version,
    })
}

/// List every tag that dereferences to a commit
///
/// # Errors
///
/// Fails when the tag references cannot be read.
pub fn list_tags(repo: &Repository) -> Result<Vec<TagEntry>> {
    let references = repo
        .references()
        .map_err(|e| git_err::tag_list_failed(e.message()))?;

    let mut entries = Vec::new();
    for reference in references {
        let reference = reference.map_err(|e| git_err::tag_list_failed(e.message()))?;
        if let Some(entry) = entry_for(&reference) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// All tags, lightweight or annotated, whose commit is `target`
///
/// # Errors
///
/// Fails when the tag references cannot be read.
pub fn entries_pointing_at(repo: &Repository, target: Oid) -> Result<Vec<TagEntry>> {
    let entries: Vec<TagEntry> = list_tags(repo)?
        .into_iter()
        .filter(|entry| entry.target == target)
        .collect();
    tracing::debug!(commit = %target, count = entries.len(), "tags pointing at commit");
    Ok(entries)
}

/// Names of all tags, lightweight or annotated, whose commit is `target`
///
/// # Errors
///
/// Fails when the tag references cannot be read.
pub fn tags_pointing_at(repo: &Repository, target: Oid) -> Result<BTreeSet<String>> {
    Ok(entries_pointing_at(repo, target)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

/// Parse a tag name as a semantic version
///
/// One leading `v`/`V` is ignored and missing minor or patch components
/// count as zero, so `v2` is 2.0.0 and `1.4` is 1.4.0.
#[must_use]
pub fn parse_version(name: &str) -> Option<Version> {
    let bare = name
        .strip_prefix('v')
        .or_else(|| name.strip_prefix('V'))
        .unwrap_or(name);
    if let Ok(version) = Version::parse(bare) {
        return Some(version);
    }

    let split = bare.find(['-', '+']).unwrap_or(bare.len());
    let (core, suffix) = bare.split_at(split);
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() >= 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    Version::parse(&padded).ok()
}

/// Ordering of two candidates: any version beats any plain name, versions
/// compare by precedence, and the name breaks the remaining ties
fn precedence(a: (Option<&Version>, &str), b: (Option<&Version>, &str)) -> Ordering {
    match (a.0, b.0) {
        (Some(va), Some(vb)) => va.cmp(vb).then_with(|| a.1.cmp(b.1)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.1.cmp(b.1),
    }
}

/// Pick the latest of `entries` using their parsed versions
#[must_use]
pub fn latest_entry(entries: &[TagEntry]) -> Option<&TagEntry> {
    entries.iter().max_by(|a, b| {
        precedence(
            (a.version.as_ref(), a.name.as_str()),
            (b.version.as_ref(), b.name.as_str()),
        )
    })
}

/// Pick the latest tag name
///
/// Returns `None` only when `names` is empty. The result does not depend
/// on the order of `names`.
pub fn select_latest<I, S>(names: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidates: Vec<(Option<Version>, String)> = names
        .into_iter()
        .map(|name| (parse_version(name.as_ref()), name.as_ref().to_string()))
        .collect();
    candidates
        .into_iter()
        .max_by(|(va, na), (vb, nb)| precedence((va.as_ref(), na), (vb.as_ref(), nb)))
        .map(|(_, name)| name)
}
