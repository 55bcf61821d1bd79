//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// 2024-01-01T12:00:00Z
pub const BASE_TIME: i64 = 1_704_110_400;
pub const DAY: i64 = 86_400;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    fn signature(seconds: i64) -> Signature<'static> {
        Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .expect("Could not create signature")
    }

    /// Commit on top of HEAD, authored `day` days after [BASE_TIME].
    pub fn commit(&self, message: &str, day: i64) -> Oid {
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<Oid> = parent.map(|c| c.id()).into_iter().collect();
        self.commit_with_parents(Some("HEAD"), message, &parents, day)
    }

    /// Commit with explicit parents, optionally moving `update_ref`.
    pub fn commit_with_parents(
        &self,
        update_ref: Option<&str>,
        message: &str,
        parents: &[Oid],
        day: i64,
    ) -> Oid {
        let sig = Self::signature(BASE_TIME + day * DAY);
        let tree_id = self
            .repo
            .index()
            .and_then(|mut index| index.write_tree())
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent_commits: Vec<git2::Commit> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parent_refs: Vec<&git2::Commit> = parent_commits.iter().collect();

        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Could not create tag");
    }

    /// Create an annotated tag pointing to the given OID.
    pub fn tag_annotated(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag(name, &obj, &Self::signature(BASE_TIME), "release", false)
            .expect("Could not create annotated tag");
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo.remote(name, url).expect("Could not add remote");
    }
}
