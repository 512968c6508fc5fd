//! Scratch directories for clones
//!
//! Clones are written under the system temp directory, resolved to an
//! absolute path so that a relative `TMPDIR` (e.g. `TMPDIR=tmp`) never puts
//! them inside the working directory.

use std::env;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

const SCRATCH_PREFIX: &str = "gitref-";

/// Absolute directory to create temporary directories in
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        return t;
    }
    #[cfg(windows)]
    {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}

/// Create a fresh scratch directory, removed when the returned guard drops
///
/// # Errors
///
/// Fails if the directory cannot be created.
pub fn scratch_dir() -> io::Result<TempDir> {
    tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(temp_dir_base())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }

    #[test]
    fn test_scratch_dir_is_named_and_removed() {
        let dir = scratch_dir().unwrap();
        let path = dir.path().to_path_buf();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(SCRATCH_PREFIX));
        assert!(path.starts_with(temp_dir_base()));

        drop(dir);
        assert!(!path.exists());
    }
}
