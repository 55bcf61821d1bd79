//! Read-only access to the version-control backend
//!
//! The changelog engine only needs a narrow view of a repository: its tags,
//! whether it has any references at all, commit lookup, an ancestor walk and
//! the configuration keys of a remote. The [Repository] trait captures that
//! view so the engine can run against:
//!
//! - [repository::Git2Repository]: a real repository opened with `git2`
//! - [mock::MockRepository]: an in-memory commit graph for tests
//!
//! ```rust
//! # use git_changelog::git::{Repository, RevisionRange};
//! # fn example<R: Repository>(repo: &R) -> git_changelog::Result<()> {
//! let head = repo.resolve_commit("HEAD")?;
//! let commits = repo.walk(&RevisionRange::new(head.sha))?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use chrono::{DateTime, FixedOffset};

use crate::error::Result;

/// Commit information needed to build a changelog
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// Full hex hash
    pub sha: String,
    /// Parent hashes, first parent first
    pub parents: Vec<String>,
    /// Author timestamp in the author's own offset
    pub author_date: DateTime<FixedOffset>,
    /// Raw commit message
    pub message: String,
}

impl CommitInfo {
    /// Seven character abbreviation of the hash
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// A tag name and the commit it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub target: String,
}

/// Ancestors of `stop` that are not ancestors of `hide`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub stop: String,
    pub hide: Option<String>,
}

impl RevisionRange {
    /// Full history reachable from `stop`
    pub fn new(stop: impl Into<String>) -> Self {
        RevisionRange {
            stop: stop.into(),
            hide: None,
        }
    }

    /// Exclude everything reachable from `hide`
    pub fn hiding(mut self, hide: impl Into<String>) -> Self {
        self.hide = Some(hide.into());
        self
    }
}

/// Read-only repository operations used by the changelog engine
///
/// Implementations release their underlying handle when dropped.
pub trait Repository {
    /// All tags in the backend's native enumeration order, resolved to commits
    ///
    /// Tags that do not point at a commit are left out.
    fn tags(&self) -> Result<Vec<TagRef>>;

    /// Whether the repository has at least one reference
    fn has_references(&self) -> Result<bool>;

    /// Resolve a revision string (hash, tag, branch, `HEAD`, ...) to a commit
    ///
    /// Fails with [crate::error::ChangelogError::Reference] when it does not
    /// name a commit.
    fn resolve_commit(&self, rev: &str) -> Result<CommitInfo>;

    /// Commits in `range`, every commit after all of its descendants
    fn walk(&self, range: &RevisionRange) -> Result<Vec<CommitInfo>>;

    /// Value of `remote.<remote>.<key>`, `None` when unset
    fn remote_config_value(&self, remote: &str, key: &str) -> Result<Option<String>>;
}
