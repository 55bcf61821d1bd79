//! Changelog generation: tag indexing, commit walk, grouping and links

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{Changelog, TagIndex, TagMatcher, TagPattern};
use crate::error::Result;
use crate::git::Repository;
use crate::grouper::ReleaseGrouper;
use crate::remote::{self, LinkTemplates, Unresolved};
use crate::walker;

/// A generated changelog and the non-fatal issues met on the way
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub changelog: Changelog,
    pub warnings: Vec<BoundaryWarning>,
}

/// Builds changelogs from a repository according to a [Config]
#[derive(Debug, Clone)]
pub struct ChangelogGenerator {
    config: Config,
    today: NaiveDate,
}

impl ChangelogGenerator {
    pub fn new(config: Config) -> Self {
        ChangelogGenerator {
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Date used for releases that have no commit date of their own
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate the changelog of `repo`.
    ///
    /// The repository is taken by value and released before returning, on
    /// success and on error alike.
    pub fn generate<R: Repository>(&self, repo: R) -> Result<GenerationReport> {
        let config = &self.config;
        let mut warnings = Vec::new();

        let pattern = TagPattern::parse(&config.tag_pattern)?;
        let links = self.link_templates(&repo, &mut warnings);

        let issue_pattern = Some(config.issue_pattern.clone()).filter(|p| !p.is_empty());
        let mut changelog = Changelog::new(
            config.title.clone(),
            config.description.clone(),
            issue_pattern,
            links.issue_url,
            config.tag_prefix.clone(),
            config.tag_pattern.clone(),
        );

        if !repo.has_references()? {
            info!("Repository is empty.");
            warnings.push(BoundaryWarning::EmptyRepository);
            return Ok(GenerationReport {
                changelog,
                warnings,
            });
        }

        let matcher = TagMatcher::new(config.tag_prefix.clone(), pattern);
        let index = TagIndex::build(&repo.tags()?, &matcher);
        debug!(tagged_commits = index.len(), "Built tag index");

        let starting = Some(config.starting_commit.as_str()).filter(|s| !s.is_empty());
        let commits = walker::walk_commits(&repo, starting, &config.stopping_commit)?;
        debug!(commits = commits.len(), "Start iterating commits");

        changelog = ReleaseGrouper::new(
            changelog,
            &index,
            config.skip_unreleased(),
            config.latest_version().map(str::to_string),
            self.today,
        )
        .group(&commits);

        if changelog.releases.is_empty() && !commits.is_empty() {
            let warning = BoundaryWarning::NoReleaseBoundary {
                commits: commits.len(),
            };
            info!("{}", warning);
            warnings.push(warning);
        }

        changelog.attach_compare_urls(links.diff_url.as_deref());
        info!(releases = changelog.releases.len(), "Changelog generated");

        drop(repo);
        Ok(GenerationReport {
            changelog,
            warnings,
        })
    }

    /// Explicit templates win; otherwise derive them from the remote
    fn link_templates<R: Repository>(
        &self,
        repo: &R,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> LinkTemplates {
        let config = &self.config;

        if config.issue_url.is_some() && config.diff_url.is_some() {
            return LinkTemplates {
                issue_url: config.issue_url.clone(),
                diff_url: config.diff_url.clone(),
            };
        }

        let Some(style) = config.url_style() else {
            debug!("No hosting flavour enabled, remote links are not derived");
            return LinkTemplates {
                issue_url: config.issue_url.clone(),
                diff_url: config.diff_url.clone(),
            };
        };

        let derived = match remote::resolve_base_url(repo, &config.remote) {
            Ok(base_url) => {
                debug!(remote = %config.remote, base_url = %base_url, "Resolved remote");
                LinkTemplates::from_base_url(&base_url, style)
            }
            Err(unresolved) => {
                let reason = match unresolved {
                    Unresolved::NotConfigured => "remote has no url configured".to_string(),
                    Unresolved::Unrecognized(url) => format!("unrecognized url '{}'", url),
                };
                let warning = BoundaryWarning::RemoteUnresolved {
                    remote: config.remote.clone(),
                    reason,
                };
                warn!("{}", warning);
                warnings.push(warning);
                LinkTemplates::disabled()
            }
        };

        LinkTemplates {
            issue_url: config.issue_url.clone().or(derived.issue_url),
            diff_url: config.diff_url.clone().or(derived.diff_url),
        }
    }
}
