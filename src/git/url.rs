//! URL normalization for git operations
//!
//! This module handles:
//! - Normalizing SSH URLs from SCP-style to ssh:// format
//! - Normalizing file:// URLs for libgit2 compatibility
//! - Telling local transports apart from network ones

use std::borrow::Cow;
use std::path::Path;

/// Normalize SSH URLs from SCP-style (git@host:path) to ssh:// format.
///
/// libgit2 may have issues with SCP-style SSH URLs, so they are converted to
/// the explicit ssh:// format.
pub fn normalize_ssh_url(url: &str) -> Cow<'_, str> {
    if !url.starts_with("git@") {
        return Cow::Borrowed(url);
    }

    let Some((host_part, path_part)) = url.split_once(':') else {
        return Cow::Borrowed(url);
    };

    if path_part.starts_with('/') {
        Cow::Owned(format!("ssh://{host_part}{path_part}"))
    } else {
        Cow::Owned(format!("ssh://{host_part}/{path_part}"))
    }
}

/// Normalize file:// URLs so libgit2 can resolve them on Unix.
pub fn normalize_file_url(url: &str) -> Cow<'_, str> {
    let Some(after) = url.strip_prefix("file://") else {
        return Cow::Borrowed(url);
    };
    #[cfg(not(windows))]
    {
        if after.contains('\\') {
            let path = after.replace('\\', "/");
            return Cow::Owned(format!("file:///{}", path.trim_start_matches('/')));
        }
        if !after.is_empty() && !after.starts_with('/') {
            return Cow::Owned(format!("file:///{after}"));
        }
    }
    #[cfg(windows)]
    let _ = after;
    Cow::Borrowed(url)
}

/// The URL as handed to libgit2
pub fn clone_url(url: &str) -> String {
    let url = normalize_ssh_url(url);
    normalize_file_url(&url).into_owned()
}

/// Whether `url` is served by libgit2's local transport
///
/// Shallow fetches are not supported there.
pub fn is_local_url(url: &str) -> bool {
    url.starts_with("file://") || url.starts_with('/') || Path::new(url).is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ssh_url_scp_style() {
        assert_eq!(
            normalize_ssh_url("git@github.com:user/repo.git"),
            "ssh://git@github.com/user/repo.git"
        );
    }

    #[test]
    fn test_normalize_ssh_url_absolute_path() {
        assert_eq!(
            normalize_ssh_url("git@github.com:/absolute/path/repo.git"),
            "ssh://git@github.com/absolute/path/repo.git"
        );
    }

    #[test]
    fn test_normalize_ssh_url_leaves_others() {
        for url in [
            "ssh://git@github.com/user/repo.git",
            "https://github.com/user/repo.git",
            "/srv/git/repo.git",
        ] {
            assert_eq!(normalize_ssh_url(url), url);
        }
    }

    #[cfg(not(windows))]
    #[test]
    fn test_normalize_file_url() {
        assert_eq!(normalize_file_url("file:///srv/repo"), "file:///srv/repo");
        assert_eq!(normalize_file_url("file://srv/repo"), "file:///srv/repo");
        assert_eq!(normalize_file_url("https://example.com/r"), "https://example.com/r");
    }

    #[test]
    fn test_clone_url_combines_normalizations() {
        assert_eq!(
            clone_url("git@example.com:team/infra.git"),
            "ssh://git@example.com/team/infra.git"
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_is_local_url() {
        assert!(is_local_url("file:///srv/repo"));
        assert!(is_local_url("/srv/repo"));
        assert!(!is_local_url("https://github.com/user/repo.git"));
        assert!(!is_local_url("git@github.com:user/repo.git"));
        assert!(!is_local_url("ssh://git@github.com/user/repo.git"));
    }
}
