//! Test fixtures for building throwaway repositories.
//!
//! ```ignore
//! let fixture = TestRepo::new();
//! let commit = fixture.commit("initial");
//! fixture.annotated_tag("v1.0.0", commit);
//! ```
//!
//! Repositories always start on `master`, regardless of the user's
//! `init.defaultBranch`.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// A non-bare repository in a temp directory
pub struct TestRepo {
    pub repo: Repository,
    pub temp: TempDir,
}

impl TestRepo {
    #[must_use]
    pub fn new() -> Self {
        let temp = create_temp_dir();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let repo = Repository::init_opts(temp.path(), &opts).expect("Failed to init repository");
        Self { repo, temp }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    #[must_use]
    pub fn path_buf(&self) -> PathBuf {
        self.temp.path().to_path_buf()
    }

    fn signature() -> Signature<'static> {
        Signature::now("Test", "test@test.com").expect("Failed to create signature")
    }

    /// Commit a change on top of HEAD and return the new commit id
    pub fn commit(&self, message: &str) -> Oid {
        std::fs::write(self.path().join("file.txt"), message).expect("Failed to write file");

        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_path(Path::new("file.txt"))
            .expect("Failed to stage file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let sig = Self::signature();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to commit")
    }

    pub fn branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).expect("Failed to find commit");
        self.repo
            .branch(name, &commit, false)
            .expect("Failed to create branch");
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Failed to create tag");
    }

    /// Create an annotated tag and return the tag object's id
    pub fn annotated_tag(&self, name: &str, target: Oid) -> Oid {
        let object = self.repo.find_object(target, None).expect("Failed to find object");
        self.repo
            .tag(name, &object, &Self::signature(), &format!("Release {name}"), false)
            .expect("Failed to create tag")
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo.remote(name, url).expect("Failed to add remote");
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
