use std::collections::{BinaryHeap, HashMap, HashSet};

use chrono::{DateTime, FixedOffset};

use crate::error::{ChangelogError, Result};
use crate::git::{CommitInfo, Repository, RevisionRange, TagRef};

/// Mock repository for testing without actual git operations
///
/// Commits must be added parents first. The walk orders commits that are
/// independent of each other by insertion, most recent first.
#[derive(Debug, Default)]
pub struct MockRepository {
    commits: Vec<CommitInfo>,
    positions: HashMap<String, usize>,
    tags: Vec<TagRef>,
    head: Option<String>,
    remotes: HashMap<(String, String), String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit and move `HEAD` to it
    pub fn add_commit(&mut self, info: CommitInfo) {
        self.head = Some(info.sha.clone());
        self.positions.insert(info.sha.clone(), self.commits.len());
        self.commits.push(info);
    }

    /// Add a commit on top of `parents` with the given message
    pub fn commit(
        &mut self,
        sha: &str,
        parents: &[&str],
        author_date: DateTime<FixedOffset>,
        message: &str,
    ) {
        self.add_commit(CommitInfo {
            sha: sha.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            author_date,
            message: message.to_string(),
        });
    }

    /// Add a tag pointing at a commit
    pub fn add_tag(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.tags.push(TagRef {
            name: name.into(),
            target: target.into(),
        });
    }

    /// Set `remote.<remote>.<key>`
    pub fn set_remote_config(
        &mut self,
        remote: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.remotes
            .insert((remote.into(), key.into()), value.into());
    }

    fn lookup(&self, rev: &str) -> Option<&CommitInfo> {
        let sha = if rev == "HEAD" {
            self.head.as_deref()?
        } else if let Some(tag) = self.tags.iter().find(|t| t.name == rev) {
            tag.target.as_str()
        } else {
            rev
        };

        self.positions.get(sha).map(|&i| &self.commits[i])
    }

    fn ancestors(&self, start: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut pending = vec![start];

        while let Some(position) = pending.pop() {
            if !seen.insert(position) {
                continue;
            }
            for parent in &self.commits[position].parents {
                if let Some(&p) = self.positions.get(parent) {
                    pending.push(p);
                }
            }
        }

        seen
    }
}

impl Repository for MockRepository {
    fn tags(&self) -> Result<Vec<TagRef>> {
        Ok(self
            .tags
            .iter()
            .filter(|t| self.positions.contains_key(&t.target))
            .cloned()
            .collect())
    }

    fn has_references(&self) -> Result<bool> {
        Ok(self.head.is_some() || !self.tags.is_empty())
    }

    fn resolve_commit(&self, rev: &str) -> Result<CommitInfo> {
        self.lookup(rev)
            .cloned()
            .ok_or_else(|| ChangelogError::reference(rev, "no such commit"))
    }

    fn walk(&self, range: &RevisionRange) -> Result<Vec<CommitInfo>> {
        let stop = self.resolve_commit(&range.stop)?;
        let mut included = self.ancestors(self.positions[&stop.sha]);

        if let Some(hide) = &range.hide {
            let hide = self.resolve_commit(hide)?;
            for hidden in self.ancestors(self.positions[&hide.sha]) {
                included.remove(&hidden);
            }
        }

        // Count children inside the range; a commit is ready once all of them were emitted
        let mut pending_children: HashMap<usize, usize> = included.iter().map(|&i| (i, 0)).collect();
        for &position in &included {
            for parent in &self.commits[position].parents {
                if let Some(count) = self
                    .positions
                    .get(parent)
                    .and_then(|p| pending_children.get_mut(p))
                {
                    *count += 1;
                }
            }
        }

        let mut ready: BinaryHeap<usize> = pending_children
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(&position, _)| position)
            .collect();
        let mut ordered = Vec::with_capacity(included.len());

        while let Some(position) = ready.pop() {
            let commit = &self.commits[position];
            for parent in &commit.parents {
                if let Some(&p) = self.positions.get(parent) {
                    if let Some(count) = pending_children.get_mut(&p) {
                        *count -= 1;
                        if *count == 0 {
                            ready.push(p);
                        }
                    }
                }
            }
            ordered.push(commit.clone());
        }

        Ok(ordered)
    }

    fn remote_config_value(&self, remote: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .remotes
            .get(&(remote.to_string(), key.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, day, 12, 0, 0)
            .unwrap()
    }

    fn shas(commits: &[CommitInfo]) -> Vec<&str> {
        commits.iter().map(|c| c.sha.as_str()).collect()
    }

    /// a - b - c - e (merge)
    ///      \     /
    ///       - d -
    fn merge_graph() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.commit("a", &[], at(1), "feat: a");
        repo.commit("b", &["a"], at(2), "feat: b");
        repo.commit("c", &["b"], at(3), "feat: c");
        repo.commit("d", &["b"], at(4), "feat: d");
        repo.commit("e", &["c", "d"], at(5), "Merge d");
        repo
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.tags().unwrap().is_empty());
        assert!(!repo.has_references().unwrap());
    }

    #[test]
    fn test_resolve_head_tag_and_sha() {
        let mut repo = merge_graph();
        repo.add_tag("1.0.0", "b");

        assert_eq!(repo.resolve_commit("HEAD").unwrap().sha, "e");
        assert_eq!(repo.resolve_commit("1.0.0").unwrap().sha, "b");
        assert_eq!(repo.resolve_commit("c").unwrap().sha, "c");
        assert!(repo.resolve_commit("zzz").is_err());
    }

    #[test]
    fn test_walk_is_topological() {
        let repo = merge_graph();
        let commits = repo.walk(&RevisionRange::new("HEAD")).unwrap();
        assert_eq!(shas(&commits), vec!["e", "d", "c", "b", "a"]);
    }

    #[test]
    fn test_walk_hides_ancestors() {
        let repo = merge_graph();
        let commits = repo.walk(&RevisionRange::new("e").hiding("c")).unwrap();
        assert_eq!(shas(&commits), vec!["e", "d"]);
    }

    #[test]
    fn test_tags_keep_insertion_order() {
        let mut repo = merge_graph();
        repo.add_tag("2.0.0", "e");
        repo.add_tag("1.0.0", "b");
        repo.add_tag("dangling", "zzz");

        let names: Vec<String> = repo.tags().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["2.0.0", "1.0.0"]);
    }

    #[test]
    fn test_remote_config() {
        let mut repo = MockRepository::new();
        repo.set_remote_config("origin", "pushurl", "git@host:o/r.git");
        assert_eq!(repo.remote_config_value("origin", "url").unwrap(), None);
        assert_eq!(
            repo.remote_config_value("origin", "pushurl").unwrap().as_deref(),
            Some("git@host:o/r.git")
        );
    }
}
