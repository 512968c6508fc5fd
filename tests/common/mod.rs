//! Common test utilities for gitref integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A non-bare repository on `master` in a temp directory
pub struct TestRepo {
    pub temp: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let repo = Repository::init_opts(temp.path(), &opts).expect("Failed to init repository");
        Self { temp, repo }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn path_buf(&self) -> PathBuf {
        self.temp.path().to_path_buf()
    }

    /// `file://` URL for cloning this repository
    pub fn file_url(&self) -> String {
        format!("file://{}", self.path().display())
    }

    fn signature() -> Signature<'static> {
        Signature::now("Test", "test@test.com").expect("Failed to create signature")
    }

    /// Write a file, commit it on HEAD and return the commit id
    pub fn commit(&self, message: &str) -> Oid {
        self.write_file("README.md", message);

        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_path(Path::new("README.md"))
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

    /// Write a file in the work tree
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
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

    pub fn annotated_tag(&self, name: &str, target: Oid) -> Oid {
        let object = self.repo.find_object(target, None).expect("Failed to find object");
        self.repo
            .tag(name, &object, &Self::signature(), name, false)
            .expect("Failed to create tag")
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo.remote(name, url).expect("Failed to add remote");
    }
}

/// The gitref binary, with every GIT_* input cleared
#[allow(deprecated)]
pub fn gitref_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gitref").expect("gitref binary");
    for var in [
        "GIT_DIR",
        "GIT_USERNAME",
        "GIT_PASSWORD",
        "GIT_PRIVATE_KEY",
        "GIT_PRIVATE_KEY_FILE",
        "GIT_PRIVATE_KEY_PASSWORD",
        "GIT_IGNORE_HOST_KEY",
        "GIT_SKIP_TLS_VERIFY",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
