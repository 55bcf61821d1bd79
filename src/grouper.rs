//! Partitioning of the commit stream into releases

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::{Changelog, Note, Release, TagIndex};
use crate::git::CommitInfo;

/// Title of the synthetic release holding untagged tip commits
pub const UNRELEASED_TITLE: &str = "Unreleased";

/// Where the grouper is in the commit stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrouperState {
    /// No commit has been kept yet
    AwaitingFirstReleaseBoundary,
    /// Notes go to the last opened release
    InRelease,
    /// The stream is exhausted
    Done,
}

/// Assigns commits, newest first, to the releases of a changelog
pub struct ReleaseGrouper<'a> {
    index: &'a TagIndex,
    skip_unreleased: bool,
    latest_version: Option<String>,
    today: NaiveDate,
    state: GrouperState,
    changelog: Changelog,
}

impl<'a> ReleaseGrouper<'a> {
    pub fn new(
        changelog: Changelog,
        index: &'a TagIndex,
        skip_unreleased: bool,
        latest_version: Option<String>,
        today: NaiveDate,
    ) -> Self {
        let latest_version = latest_version.filter(|v| !v.is_empty());
        ReleaseGrouper {
            index,
            // A latest version names the untagged tip, so it is never skipped
            skip_unreleased: skip_unreleased && latest_version.is_none(),
            latest_version,
            today,
            state: GrouperState::AwaitingFirstReleaseBoundary,
            changelog,
        }
    }

    pub fn state(&self) -> GrouperState {
        self.state
    }

    /// Feed the next commit of the stream
    pub fn push(&mut self, commit: &CommitInfo) {
        let tags = self.index.get(&commit.sha);
        debug!(commit = %commit.short_sha(), "Found commit");

        if self.state == GrouperState::AwaitingFirstReleaseBoundary {
            if self.skip_unreleased && tags.is_none() {
                debug!(commit = %commit.short_sha(), "Skipping unreleased commit");
                return;
            }
            if tags.is_none() {
                let release = self.synthetic_release(commit);
                self.changelog.add_release(release);
            }
            self.state = GrouperState::InRelease;
        }

        if let Some(tags) = tags {
            let title = tags.join(", ");
            debug!(release = %title, commit = %commit.short_sha(), "Adding release");
            self.changelog.add_release(Release::new(
                title.clone(),
                title,
                commit.author_date.date_naive(),
                commit.sha.clone(),
            ));
        }

        let note = Note::from_message(commit.sha.clone(), &commit.message);
        debug!(commit = %commit.short_sha(), note = ?note, "Adding note");
        if let Err(note) = self.changelog.add_note(note) {
            warn!(commit = %note.commit_sha, "No open release for note, dropping it");
        }
    }

    /// Consume the whole stream and hand back the grouped changelog
    pub fn group<'c, I>(mut self, commits: I) -> Changelog
    where
        I: IntoIterator<Item = &'c CommitInfo>,
    {
        for commit in commits {
            self.push(commit);
        }
        self.finish()
    }

    pub fn finish(mut self) -> Changelog {
        self.state = GrouperState::Done;
        self.changelog
    }

    fn synthetic_release(&self, commit: &CommitInfo) -> Release {
        let sha = empty_digest();
        match &self.latest_version {
            Some(version) => {
                debug!(release = %version, "Adding release for latest version");
                Release::new(version.clone(), version.clone(), self.today, sha)
            }
            None => {
                debug!("Adding release '{}'", UNRELEASED_TITLE);
                Release::new(UNRELEASED_TITLE, commit.short_sha(), self.today, sha)
            }
        }
    }
}

/// SHA-256 of empty content, the identity of releases without a commit of their own
pub fn empty_digest() -> String {
    format!("{:x}", Sha256::digest(b""))
}
