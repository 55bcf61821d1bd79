use std::path::Path;

use chrono::{DateTime, FixedOffset};
use git2::{ErrorCode, Repository as Git2Repo, Sort};
use tracing::debug;

use crate::error::{ChangelogError, Result};
use crate::git::{CommitInfo, RevisionRange, TagRef};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn commit_info(commit: &git2::Commit<'_>) -> Result<CommitInfo> {
        let when = commit.author().when();
        let offset = FixedOffset::east_opt(when.offset_minutes() * 60)
            .ok_or_else(|| git2::Error::from_str("author offset out of range"))?;
        let author_date = DateTime::from_timestamp(when.seconds(), 0)
            .ok_or_else(|| git2::Error::from_str("author time out of range"))?
            .with_timezone(&offset);

        Ok(CommitInfo {
            sha: commit.id().to_string(),
            parents: commit.parent_ids().map(|oid| oid.to_string()).collect(),
            author_date,
            message: String::from_utf8_lossy(commit.message_raw_bytes()).into_owned(),
        })
    }

    fn find_commit(&self, rev: &str) -> Result<git2::Commit<'_>> {
        self.repo
            .revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| ChangelogError::reference(rev, e.message()))
    }
}

impl super::Repository for Git2Repository {
    fn tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            // Annotated tags are peeled through to the commit they describe
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef {
                    name: name.to_string(),
                    target: commit.id().to_string(),
                }),
                Err(e) => debug!(tag = %name, error = %e, "Skipping tag that does not point at a commit"),
            }
        }

        Ok(tags)
    }

    fn has_references(&self) -> Result<bool> {
        let mut references = self.repo.references()?;
        Ok(references.next().is_some())
    }

    fn resolve_commit(&self, rev: &str) -> Result<CommitInfo> {
        let commit = self.find_commit(rev)?;
        Self::commit_info(&commit)
    }

    /// Walks with `TOPOLOGICAL | TIME`: children always come before their
    /// parents, and otherwise newer commits come first. This is not the order of
    /// `git log --topo-order`, which finishes a side branch before going back to
    /// the main line. An old side-branch commit merged after a newer tag on the
    /// main line can therefore be listed after that tag and end up in its release.
    fn walk(&self, range: &RevisionRange) -> Result<Vec<CommitInfo>> {
        let stop = self.find_commit(&range.stop)?.id();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(stop)?;

        if let Some(hide) = &range.hide {
            let hide = self.find_commit(hide)?.id();
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(Self::commit_info(&commit)?);
        }

        Ok(commits)
    }

    fn remote_config_value(&self, remote: &str, key: &str) -> Result<Option<String>> {
        let config = self.repo.config()?;

        match config.get_string(&format!("remote.{}.{}", remote, key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
