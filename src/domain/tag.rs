use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{ChangelogError, Result};
use crate::git::TagRef;

static SEMVER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)(?:-(?P<prerelease>(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("semver pattern is valid")
});

static CALENDAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<year>[1-9]\d{3}|\d{2})\.(?P<month>0?[1-9]|1[0-2])(?:\.(?P<day>0?[1-9]|[12]\d|3[01]))?(?:\.(?P<micro>0|[1-9]\d*))?(?:-(?P<modifier>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("calendar pattern is valid")
});

/// Which tag names count as release tags
#[derive(Debug, Clone)]
pub enum TagPattern {
    /// `MAJOR.MINOR.PATCH[-pre][+build]`
    SemVer,
    /// `YYYY.MM[.DD][.MICRO][-modifier]`
    Calendar,
    /// A user supplied expression, matched against the whole remainder
    Custom(Regex),
}

impl TagPattern {
    /// Build a selector from its configuration value.
    ///
    /// `semver` and `calendar` select the named families; anything else is
    /// compiled as a regular expression.
    pub fn parse(selector: &str) -> Result<Self> {
        match selector {
            "semver" => Ok(TagPattern::SemVer),
            "calendar" => Ok(TagPattern::Calendar),
            expr => {
                // Anchor the whole expression so only full matches are accepted
                let anchored = format!("^(?:{})$", expr);
                Regex::new(&anchored)
                    .map(TagPattern::Custom)
                    .map_err(|e| ChangelogError::pattern(format!("'{}': {}", expr, e)))
            }
        }
    }

    /// Whether `name` (prefix already removed) fully matches this pattern
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            TagPattern::SemVer => SEMVER_RE.is_match(name),
            TagPattern::Calendar => CALENDAR_RE.is_match(name),
            TagPattern::Custom(re) => re.is_match(name),
        }
    }
}

/// Decides whether tag names qualify as release tags
#[derive(Debug, Clone)]
pub struct TagMatcher {
    prefix: String,
    pattern: TagPattern,
}

impl TagMatcher {
    pub fn new(prefix: impl Into<String>, pattern: TagPattern) -> Self {
        TagMatcher {
            prefix: prefix.into(),
            pattern,
        }
    }

    /// Accepts `tag` iff it starts with the prefix and the remainder fully
    /// matches the pattern. An empty prefix filters nothing.
    pub fn accepts(&self, tag: &str) -> bool {
        match tag.strip_prefix(self.prefix.as_str()) {
            Some(rest) => self.pattern.is_match(rest),
            None => false,
        }
    }
}

/// Reverse index from commit sha to the release tags pointing at it
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_commit: HashMap<String, Vec<String>>,
}

impl TagIndex {
    /// Index every accepted tag under its target commit.
    ///
    /// Tags keep the order in which `tags` lists them. Commits without an
    /// accepted tag are absent from the index.
    pub fn build(tags: &[TagRef], matcher: &TagMatcher) -> Self {
        let mut by_commit: HashMap<String, Vec<String>> = HashMap::new();

        for tag in tags {
            if matcher.accepts(&tag.name) {
                by_commit
                    .entry(tag.target.clone())
                    .or_default()
                    .push(tag.name.clone());
            } else {
                debug!(tag = %tag.name, "Ignoring tag that is not a release tag");
            }
        }

        TagIndex { by_commit }
    }

    /// Release tags on `sha`, if any
    pub fn get(&self, sha: &str) -> Option<&[String]> {
        self.by_commit.get(sha).map(Vec::as_slice)
    }

    pub fn contains(&self, sha: &str) -> bool {
        self.by_commit.contains_key(sha)
    }

    /// Number of tagged commits
    pub fn len(&self) -> usize {
        self.by_commit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_commit.is_empty()
    }
}
