//! Changelog domain model: releases and the notes they contain

use chrono::NaiveDate;

use super::commit::ParsedCommit;

/// One changelog entry, derived from a single commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub commit_sha: String,
    pub r#type: String,
    pub description: String,
    pub scope: String,
    pub body: String,
    pub footer: String,
}

impl Note {
    /// Build a note from a commit sha and its raw message
    pub fn from_message(commit_sha: impl Into<String>, message: &str) -> Self {
        let parsed = ParsedCommit::parse(message);
        Note {
            commit_sha: commit_sha.into(),
            r#type: parsed.r#type,
            description: parsed.description,
            scope: parsed.scope,
            body: parsed.body,
            footer: parsed.footer,
        }
    }
}

/// A tagged (or synthetic) release and the notes collected under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub title: String,
    pub tag: String,
    pub date: NaiveDate,
    pub sha: String,
    pub notes: Vec<Note>,
    pub compare_url: Option<String>,
}

impl Release {
    pub fn new(
        title: impl Into<String>,
        tag: impl Into<String>,
        date: NaiveDate,
        sha: impl Into<String>,
    ) -> Self {
        Release {
            title: title.into(),
            tag: tag.into(),
            date,
            sha: sha.into(),
            notes: Vec::new(),
            compare_url: None,
        }
    }

    /// Fill `{previous}` and `{current}` in a compare template
    pub fn set_compare_url(&mut self, diff_url: &str, previous_tag: &str) {
        self.compare_url = Some(
            diff_url
                .replace("{previous}", previous_tag)
                .replace("{current}", &self.title),
        );
    }
}

/// The assembled changelog, most recent release first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    pub title: String,
    pub description: String,
    pub issue_pattern: Option<String>,
    pub issue_url: Option<String>,
    pub tag_prefix: String,
    pub tag_pattern: String,
    pub releases: Vec<Release>,
}

impl Changelog {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        issue_pattern: Option<String>,
        issue_url: Option<String>,
        tag_prefix: impl Into<String>,
        tag_pattern: impl Into<String>,
    ) -> Self {
        Changelog {
            title: title.into(),
            description: description.into(),
            issue_pattern,
            issue_url,
            tag_prefix: tag_prefix.into(),
            tag_pattern: tag_pattern.into(),
            releases: Vec::new(),
        }
    }

    /// Append a release; it becomes the one notes are added to
    pub fn add_release(&mut self, release: Release) {
        self.releases.push(release);
    }

    /// Add a note to the most recently opened release.
    ///
    /// Returns the note back when no release is open yet.
    pub fn add_note(&mut self, note: Note) -> Result<(), Note> {
        match self.releases.last_mut() {
            Some(release) => {
                release.notes.push(note);
                Ok(())
            }
            None => Err(note),
        }
    }

    /// Link every release to its predecessor. The oldest release has none.
    ///
    /// With no template, links are disabled and nothing changes.
    pub fn attach_compare_urls(&mut self, diff_url: Option<&str>) {
        let Some(diff_url) = diff_url else {
            return;
        };

        let count = self.releases.len();
        for index in (0..count.saturating_sub(1)).rev() {
            let previous = self.releases[index + 1].title.clone();
            self.releases[index].set_compare_url(diff_url, &previous);
        }
    }
}
