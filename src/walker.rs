//! Commit range resolution and traversal

use tracing::debug;

use crate::error::Result;
use crate::git::{CommitInfo, Repository, RevisionRange};

/// Build the range between `starting` (inclusive) and `stopping`.
///
/// The walk excludes everything reachable from the hidden bound, so the
/// starting commit is hidden through its first parent instead. A root
/// starting commit has nothing before it and yields the full history.
pub fn commit_range<R: Repository + ?Sized>(
    repo: &R,
    starting: Option<&str>,
    stopping: &str,
) -> Result<RevisionRange> {
    let range = RevisionRange::new(stopping);

    let Some(starting) = starting.filter(|s| !s.is_empty()) else {
        return Ok(range);
    };

    let start = repo.resolve_commit(starting)?;
    if start.is_root() {
        debug!(commit = %start.short_sha(), "Starting commit is a root commit, walking full history");
        return Ok(range);
    }
    Ok(range.hiding(start.parents[0].clone()))
}

/// Commits from `stopping` back to `starting`, every commit after its descendants.
///
/// Produces a fresh sequence per call; an empty repository yields nothing.
pub fn walk_commits<R: Repository + ?Sized>(
    repo: &R,
    starting: Option<&str>,
    stopping: &str,
) -> Result<Vec<CommitInfo>> {
    if !repo.has_references()? {
        return Ok(Vec::new());
    }

    let range = commit_range(repo, starting, stopping)?;
    debug!(stop = %range.stop, hide = ?range.hide, "Walking commits");
    repo.walk(&range)
}
