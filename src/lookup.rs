//! Reference lookup
//!
//! Locates the repository, resolves the requested reference and assembles
//! the attributes reported for it. Either every attribute is computed or
//! the lookup fails; partial results are never returned.

use git2::Oid;
use serde::Serialize;

use crate::error::{Result, git as git_err};
use crate::git::locate::{RepoParams, locate};
use crate::git::refs::{ReferenceKind, resolve_reference};
use crate::git::tags::{entries_pointing_at, latest_entry};
use crate::git::transport::Transport;

/// Attributes of a resolved reference
///
/// Empty strings stand for "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    /// Stable identifier, the commit hash
    pub id: String,
    pub url: String,
    /// Repository root for checkouts, empty for clones
    pub path: String,
    pub branch: String,
    pub tag: String,
    pub commit_sha: String,
}

/// Look up the reference described by `params`
///
/// # Errors
///
/// Fails with the locator's errors (not found, network, auth), with a
/// not-found error when the reference does not exist, or with a repository
/// error when the repository's refs cannot be read.
pub fn lookup(params: &RepoParams, transport: &Transport) -> Result<LookupResult> {
    let handle = locate(params, transport)?;
    let repo = handle.repo();
    let resolved = resolve_reference(repo, params.reference.as_ref())?;

    let branch = match resolved.kind() {
        ReferenceKind::Branch => resolved.short_name().to_string(),
        ReferenceKind::Tag | ReferenceKind::Detached => String::new(),
    };

    let tag = if resolved.is_tag() {
        resolved.short_name().to_string()
    } else {
        let commit = Oid::from_str(resolved.hash())
            .map_err(|e| git_err::ref_resolve_failed(resolved.short_name(), e.message()))?;
        let entries = entries_pointing_at(repo, commit)?;
        latest_entry(&entries)
            .map(|entry| entry.name.clone())
            .unwrap_or_default()
    };

    let url = params.url.clone().unwrap_or_else(|| handle.remote_url());
    let path = handle
        .root()
        .map(|root| root.display().to_string())
        .unwrap_or_default();

    let result = LookupResult {
        id: resolved.hash().to_string(),
        url,
        path,
        branch,
        tag,
        commit_sha: resolved.hash().to_string(),
    };
    tracing::info!(
        commit = %result.commit_sha,
        branch = %result.branch,
        tag = %result.tag,
        "lookup complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::git::refs::ReferenceName;
    use crate::test_fixtures::TestRepo;

    fn local(fixture: &TestRepo, reference: Option<ReferenceName>) -> RepoParams {
        RepoParams {
            path: Some(fixture.path_buf()),
            reference,
            ..RepoParams::default()
        }
    }

    #[test]
    fn test_lookup_head() {
        let fixture = TestRepo::new();
        let commit = fixture.commit("initial");

        let result = lookup(&local(&fixture, None), &Transport::default()).unwrap();
        assert_eq!(result.commit_sha, commit.to_string());
        assert_eq!(result.id, result.commit_sha);
        assert_eq!(result.branch, "master");
        assert_eq!(result.tag, "");
        assert_eq!(result.path, fixture.path().display().to_string());
        assert_eq!(result.url, "");
    }

    #[test]
    fn test_lookup_head_reports_latest_tag() {
        let fixture = TestRepo::new();
        let commit = fixture.commit("initial");
        fixture.lightweight_tag("v1.0.0", commit);
        fixture.annotated_tag("v1.2.0", commit);
        fixture.lightweight_tag("v0.9.0", commit);

        let result = lookup(&local(&fixture, None), &Transport::default()).unwrap();
        assert_eq!(result.branch, "master");
        assert_eq!(result.tag, "v1.2.0");
    }

    #[test]
    fn test_lookup_tag() {
        let fixture = TestRepo::new();
        let tagged = fixture.commit("first");
        fixture.annotated_tag("v0.1.0", tagged);
        fixture.commit("second");

        let result = lookup(
            &local(&fixture, Some(ReferenceName::Tag("v0.1.0".into()))),
            &Transport::default(),
        )
        .unwrap();
        assert_eq!(result.tag, "v0.1.0");
        assert_eq!(result.branch, "");
        assert_eq!(result.commit_sha, tagged.to_string());
    }

    #[test]
    fn test_lookup_detached_head() {
        let fixture = TestRepo::new();
        let first = fixture.commit("first");
        fixture.lightweight_tag("release-a", first);
        fixture.lightweight_tag("release-b", first);
        fixture.commit("second");
        fixture.repo.set_head_detached(first).unwrap();

        let result = lookup(&local(&fixture, None), &Transport::default()).unwrap();
        assert_eq!(result.branch, "");
        assert_eq!(result.tag, "release-b");
        assert_eq!(result.commit_sha, first.to_string());
    }

    #[test]
    fn test_lookup_missing_branch() {
        let fixture = TestRepo::new();
        fixture.commit("initial");

        let err = lookup(
            &local(&fixture, Some(ReferenceName::Branch("nope".into()))),
            &Transport::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_lookup_reports_origin_url() {
        let fixture = TestRepo::new();
        fixture.commit("initial");
        fixture.add_remote("origin", "git@example.com:team/infra.git");

        let result = lookup(&local(&fixture, None), &Transport::default()).unwrap();
        assert_eq!(result.url, "git@example.com:team/infra.git");
    }

    #[test]
    fn test_lookup_result_serializes_all_attributes() {
        let result = LookupResult {
            id: "abc".to_string(),
            url: String::new(),
            path: "/srv/repo".to_string(),
            branch: "main".to_string(),
            tag: String::new(),
            commit_sha: "abc".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        for key in ["id", "url", "path", "branch", "tag", "commit_sha"] {
            assert!(json.get(key).is_some(), "{key}");
        }
        assert_eq!(json["branch"], "main");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_lookup_clone_has_empty_path() {
        let source = TestRepo::new();
        let commit = source.commit("initial");
        source.lightweight_tag("v2.0.0", commit);
        let url = format!("file://{}", source.path().display());

        let params = RepoParams {
            url: Some(url.clone()),
            reference: Some(ReferenceName::Branch("master".into())),
            ..RepoParams::default()
        };
        let result = lookup(&params, &Transport::default()).unwrap();
        assert_eq!(result.path, "");
        assert_eq!(result.url, url);
        assert_eq!(result.branch, "master");
        assert_eq!(result.tag, "v2.0.0");
        assert_eq!(result.commit_sha, commit.to_string());
    }
}
