//! Repository location
//!
//! A lookup works against exactly one repository: either an on-disk checkout
//! found by walking up from a path, or a single-ref clone of a URL held in a
//! scratch store. [`RepositoryHandle`] owns whichever it is.

use std::env;
use std::path::{Component, Path, PathBuf};

use git2::Repository;
use tempfile::TempDir;

use super::clone::{ScratchClone, clone_single_ref};
use super::refs::ReferenceName;
use super::transport::Transport;
use crate::error::{Result, git as git_err};

/// Default clone depth
pub const DEFAULT_DEPTH: u32 = 1;

/// Where to find the repository and what to look up in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoParams {
    pub url: Option<String>,
    pub path: Option<PathBuf>,
    pub reference: Option<ReferenceName>,
    /// Clone depth; 0 means full history
    pub depth: u32,
}

impl Default for RepoParams {
    fn default() -> Self {
        Self {
            url: None,
            path: None,
            reference: None,
            depth: DEFAULT_DEPTH,
        }
    }
}

/// Where an opened repository came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A checkout on disk, by its root directory
    Local { root: PathBuf },
    /// A scratch clone of a remote
    Cloned { url: String },
}

/// An opened repository
///
/// For clones the scratch directory is removed when the handle is dropped.
pub struct RepositoryHandle {
    // Declared before `_scratch` so the repository closes before its
    // directory is removed
    repo: Repository,
    origin: Origin,
    _scratch: Option<TempDir>,
}

impl RepositoryHandle {
    #[must_use]
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Root of the checkout, `None` for clones
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        match &self.origin {
            Origin::Local { root } => Some(root),
            Origin::Cloned { .. } => None,
        }
    }

    #[must_use]
    pub fn is_clone(&self) -> bool {
        matches!(self.origin, Origin::Cloned { .. })
    }

    /// URL of the repository
    ///
    /// Clones report the URL they were cloned from. Checkouts report their
    /// `origin` remote, else the first configured remote, else an empty
    /// string.
    #[must_use]
    pub fn remote_url(&self) -> String {
        match &self.origin {
            Origin::Cloned { url } => url.clone(),
            Origin::Local { .. } => discover_remote_url(&self.repo),
        }
    }
}

fn remote_url_of(repo: &Repository, name: &str) -> Option<String> {
    repo.find_remote(name)
        .ok()
        .and_then(|remote| remote.url().map(str::to_string))
}

fn discover_remote_url(repo: &Repository) -> String {
    if let Some(url) = remote_url_of(repo, "origin") {
        return url;
    }
    repo.remotes()
        .ok()
        .and_then(|names| {
            names
                .iter()
                .flatten()
                .find_map(|name| remote_url_of(repo, name))
        })
        .unwrap_or_default()
}

/// Walk from `start` towards the filesystem root, returning the first
/// directory for which `is_repository_root` holds
pub fn walk_up<F>(start: &Path, is_repository_root: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    start
        .ancestors()
        .find(|dir| is_repository_root(dir))
        .map(Path::to_path_buf)
}

/// Find the directory containing `.git`, starting at `start`
///
/// # Errors
///
/// Returns a not-found error if no ancestor of `start` contains a `.git`
/// directory.
pub fn find_repository_root(start: &Path) -> Result<PathBuf> {
    let start = normalize(start);
    walk_up(&start, |dir| dir.join(".git").is_dir())
        .ok_or_else(|| git_err::repository_not_found(start.display().to_string()))
}

/// Fold `.` and `..` components without touching the filesystem
///
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

fn open_local(path: Option<&Path>) -> Result<RepositoryHandle> {
    let start = match path {
        Some(path) if !path.as_os_str().is_empty() => std::path::absolute(path)?,
        _ => env::current_dir()?,
    };
    let root = find_repository_root(&start)?;
    tracing::debug!(start = %start.display(), root = %root.display(), "found repository root");

    let repo = Repository::open(&root)
        .map_err(|e| git_err::open_failed(root.display().to_string(), e.message()))?;
    Ok(RepositoryHandle {
        repo,
        origin: Origin::Local { root },
        _scratch: None,
    })
}

/// Open the repository described by `params`
///
/// With a URL the reference is cloned through `transport`; otherwise the
/// checkout containing `params.path` (or the working directory) is opened
/// without touching the network.
///
/// # Errors
///
/// Returns not-found, network or auth errors as described on
/// [`clone_single_ref`] and [`find_repository_root`].
pub fn locate(params: &RepoParams, transport: &Transport) -> Result<RepositoryHandle> {
    match &params.url {
        Some(url) => {
            let ScratchClone { repo, scratch } =
                clone_single_ref(url, params.reference.as_ref(), params.depth, transport)?;
            Ok(RepositoryHandle {
                repo,
                origin: Origin::Cloned { url: url.clone() },
                _scratch: Some(scratch),
            })
        }
        None => open_local(params.path.as_deref()),
    }
}
