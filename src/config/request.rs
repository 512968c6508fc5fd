//! Per-lookup request

use std::path::PathBuf;

use super::require_non_empty;
use crate::error::{Result, config};
use crate::git::locate::{DEFAULT_DEPTH, RepoParams};
use crate::git::refs::ReferenceName;

/// One lookup, as asked for by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub path: Option<PathBuf>,
    pub url: Option<String>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub depth: u32,
}

impl Default for LookupRequest {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            branch: None,
            tag: None,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl LookupRequest {
    /// Validate the request and turn it into locator parameters
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `path` and `url`, or `branch` and
    /// `tag`, are both set, or when any of them is empty.
    pub fn into_params(self) -> Result<RepoParams> {
        require_non_empty("url", self.url.as_deref())?;
        require_non_empty("branch", self.branch.as_deref())?;
        require_non_empty("tag", self.tag.as_deref())?;
        if self.path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            require_non_empty("path", Some(""))?;
        }

        if self.path.is_some() && self.url.is_some() {
            return Err(config::conflicting("path", "url"));
        }

        let reference = match (self.branch, self.tag) {
            (Some(_), Some(_)) => return Err(config::conflicting("branch", "tag")),
            (Some(branch), None) => Some(ReferenceName::Branch(branch)),
            (None, Some(tag)) => Some(ReferenceName::Tag(tag)),
            (None, None) => None,
        };

        Ok(RepoParams {
            url: self.url,
            path: self.path,
            reference,
            depth: self.depth,
        })
    }
}
