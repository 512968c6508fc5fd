//! Single-ref cloning into a scratch store
//!
//! This module handles:
//! - Listing the remote's references before anything is downloaded
//! - Fetching only the requested branch or tag (or the default branch)
//! - Fetching the tags that peel to the fetched commit
//! - Pointing the scratch store's HEAD at what was fetched
//!
//! The store is a bare repository inside a [`TempDir`], so nothing is left
//! on disk once the caller drops it.

use std::collections::{BTreeSet, HashMap};

use git2::{Direction, Oid, Repository};
use tempfile::TempDir;

use super::error::clone_error;
use super::refs::ReferenceName;
use super::transport::Transport;
use super::url::{clone_url, is_local_url};
use crate::error::{Result, git as git_err};

const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";
const PEELED_SUFFIX: &str = "^{}";

/// A freshly cloned repository and the directory backing it
pub struct ScratchClone {
    pub repo: Repository,
    pub scratch: TempDir,
}

/// What the remote advertised during the initial handshake
#[derive(Debug, Default)]
struct Advertisement {
    /// Reference name to advertised id (tag objects for annotated tags)
    refs: HashMap<String, Oid>,
    /// `refs/tags/<name>^{}` entries, keyed by the tag's reference name
    peeled: HashMap<String, Oid>,
    head: Option<Oid>,
    default_branch: Option<String>,
}

impl Advertisement {
    fn commit_of(&self, name: &str) -> Option<Oid> {
        self.peeled
            .get(name)
            .or_else(|| self.refs.get(name))
            .copied()
    }

    /// The branch HEAD points to on the remote
    fn default_branch(&self) -> Option<String> {
        if let Some(branch) = &self.default_branch {
            return Some(branch.clone());
        }
        // Servers that do not advertise the HEAD symref: use a branch at the same commit
        let head = self.head?;
        let mut candidates: Vec<&String> = self
            .refs
            .iter()
            .filter(|(name, oid)| name.starts_with(HEADS_PREFIX) && **oid == head)
            .map(|(name, _)| name)
            .collect();
        candidates.sort();
        candidates.first().map(|name| (*name).clone())
    }

    /// Tags whose commit is `commit`
    fn tags_at(&self, commit: Oid) -> BTreeSet<String> {
        self.refs
            .keys()
            .filter(|name| name.starts_with(TAGS_PREFIX))
            .filter(|name| self.commit_of(name) == Some(commit))
            .cloned()
            .collect()
    }
}

fn advertise(repo: &Repository, url: &str, transport: &Transport) -> Result<Advertisement> {
    let mut remote = repo
        .find_remote("origin")
        .map_err(|e| clone_error(url, &e))?;
    let connection = remote
        .connect_auth(
            Direction::Fetch,
            Some(transport.remote_callbacks()),
            Some(transport.proxy_options()),
        )
        .map_err(|e| clone_error(url, &e))?;

    let mut advertisement = Advertisement {
        default_branch: connection
            .default_branch()
            .ok()
            .and_then(|buf| buf.as_str().map(str::to_string))
            .filter(|name| name.starts_with(HEADS_PREFIX)),
        ..Advertisement::default()
    };

    for head in connection.list().map_err(|e| clone_error(url, &e))? {
        let name = head.name();
        if name == "HEAD" {
            advertisement.head = Some(head.oid());
        } else if let Some(tag) = name.strip_suffix(PEELED_SUFFIX) {
            advertisement.peeled.insert(tag.to_string(), head.oid());
        } else {
            advertisement.refs.insert(name.to_string(), head.oid());
        }
    }

    tracing::debug!(
        refs = advertisement.refs.len(),
        default_branch = advertisement.default_branch.as_deref().unwrap_or(""),
        "listed remote references"
    );
    Ok(advertisement)
}

/// Depth to fetch `url` with; local transports cannot serve shallow fetches
fn fetch_depth(url: &str, depth: u32) -> u32 {
    if is_local_url(url) { 0 } else { depth }
}

/// Clone the single reference `reference` (or the default branch) from `url`
///
/// `depth` of 0 fetches full history. Local transports always fetch full
/// history because libgit2 cannot serve shallow fetches from them.
///
/// # Errors
///
/// Returns a not-found error if the named reference is not on the remote,
/// an auth error if the remote rejects the credentials, and a clone error
/// for every other transport failure.
pub fn clone_single_ref(
    url: &str,
    reference: Option<&ReferenceName>,
    depth: u32,
    transport: &Transport,
) -> Result<ScratchClone> {
    let scratch = crate::temp::scratch_dir()?;
    let repo = Repository::init_bare(scratch.path())
        .map_err(|e| git_err::clone_failed(url, e.message()))?;
    repo.remote("origin", &clone_url(url))
        .map_err(|e| clone_error(url, &e))?;

    tracing::info!(url = %url, "cloning repository");
    let advertisement = advertise(&repo, url, transport)?;

    let wanted = match reference {
        Some(name) => name.full_name(),
        None => advertisement
            .default_branch()
            .ok_or_else(|| git_err::remote_ref_not_found(url, "HEAD"))?,
    };
    let commit = advertisement
        .commit_of(&wanted)
        .ok_or_else(|| git_err::remote_ref_not_found(url, &wanted))?;

    let mut names = advertisement.tags_at(commit);
    names.insert(wanted.clone());
    let refspecs: Vec<String> = names.iter().map(|name| format!("+{name}:{name}")).collect();

    let depth = fetch_depth(url, depth);
    tracing::debug!(url = %url, reference = %wanted, depth, refspecs = ?refspecs, "fetching");

    let mut remote = repo
        .find_remote("origin")
        .map_err(|e| clone_error(url, &e))?;
    remote
        .fetch(&refspecs, Some(&mut transport.fetch_options(depth)), None)
        .map_err(|e| clone_error(url, &e))?;
    drop(remote);

    let head = if wanted.starts_with(HEADS_PREFIX) {
        repo.set_head(&wanted)
    } else {
        repo.set_head_detached(commit)
    };
    head.map_err(|e| git_err::clone_failed(url, e.message()))?;

    tracing::debug!(url = %url, commit = %commit, "clone complete");
    Ok(ScratchClone { repo, scratch })
}
