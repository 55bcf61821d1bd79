use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ChangelogError, Result};

/// Project-local configuration file name
pub const CONFIG_FILE_NAME: &str = "changelog.toml";

/// Represents the complete configuration for git-changelog.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub description: String,
    pub remote: String,
    pub github: bool,
    pub gitlab: bool,
    pub issue_pattern: String,
    pub issue_url: Option<String>,
    pub diff_url: Option<String>,
    pub starting_commit: String,
    pub stopping_commit: String,
    pub tag_prefix: String,
    pub tag_pattern: String,
    pub latest_version: Option<String>,
    pub unreleased: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: "Changelog".to_string(),
            description: String::new(),
            remote: "origin".to_string(),
            github: true,
            gitlab: false,
            issue_pattern: r"(#([\w-]+))".to_string(),
            issue_url: None,
            diff_url: None,
            starting_commit: String::new(),
            stopping_commit: "HEAD".to_string(),
            tag_prefix: String::new(),
            tag_pattern: "semver".to_string(),
            latest_version: None,
            unreleased: false,
        }
    }
}

/// Values that replace configuration entries when set, typically from the CLI
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub remote: Option<String>,
    pub gitlab: Option<bool>,
    pub issue_pattern: Option<String>,
    pub issue_url: Option<String>,
    pub diff_url: Option<String>,
    pub starting_commit: Option<String>,
    pub stopping_commit: Option<String>,
    pub tag_prefix: Option<String>,
    pub tag_pattern: Option<String>,
    pub latest_version: Option<String>,
    pub unreleased: Option<bool>,
}

/// Hosting flavour that decides the default link layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlStyle {
    GitHub,
    GitLab,
}

impl UrlStyle {
    /// Issue link template with `{base_url}` and `{id}` placeholders
    pub fn issue_template(self) -> &'static str {
        match self {
            UrlStyle::GitHub => "{base_url}/issues/{id}",
            UrlStyle::GitLab => "{base_url}/-/issues/{id}",
        }
    }

    /// Compare link template with `{base_url}`, `{previous}` and `{current}` placeholders
    pub fn diff_template(self) -> &'static str {
        match self {
            UrlStyle::GitHub => "{base_url}/compare/{previous}...{current}",
            UrlStyle::GitLab => "{base_url}/-/compare/{previous}...{current}",
        }
    }
}

impl Config {
    /// Returns a copy with every set override applied
    pub fn merge(&self, overrides: ConfigOverrides) -> Config {
        let mut merged = self.clone();

        if let Some(title) = overrides.title {
            merged.title = title;
        }
        if let Some(description) = overrides.description {
            merged.description = description;
        }
        if let Some(remote) = overrides.remote {
            merged.remote = remote;
        }
        if let Some(gitlab) = overrides.gitlab {
            merged.gitlab = gitlab;
            merged.github = !gitlab;
        }
        if let Some(issue_pattern) = overrides.issue_pattern {
            merged.issue_pattern = issue_pattern;
        }
        if overrides.issue_url.is_some() {
            merged.issue_url = overrides.issue_url;
        }
        if overrides.diff_url.is_some() {
            merged.diff_url = overrides.diff_url;
        }
        if let Some(starting_commit) = overrides.starting_commit {
            merged.starting_commit = starting_commit;
        }
        if let Some(stopping_commit) = overrides.stopping_commit {
            merged.stopping_commit = stopping_commit;
        }
        if let Some(tag_prefix) = overrides.tag_prefix {
            merged.tag_prefix = tag_prefix;
        }
        if let Some(tag_pattern) = overrides.tag_pattern {
            merged.tag_pattern = tag_pattern;
        }
        if overrides.latest_version.is_some() {
            merged.latest_version = overrides.latest_version;
        }
        merged.latest_version = merged.latest_version.filter(|v| !v.is_empty());
        if let Some(unreleased) = overrides.unreleased {
            merged.unreleased = unreleased;
        }

        merged
    }

    /// GitLab wins when both flavours are enabled; `None` when neither is
    pub fn url_style(&self) -> Option<UrlStyle> {
        if self.gitlab {
            Some(UrlStyle::GitLab)
        } else if self.github {
            Some(UrlStyle::GitHub)
        } else {
            None
        }
    }

    /// The version naming the untagged tip. An empty string names nothing.
    pub fn latest_version(&self) -> Option<&str> {
        self.latest_version.as_deref().filter(|v| !v.is_empty())
    }

    /// Untagged commits at the tip are dropped unless asked for, or named by `latest_version`
    pub fn skip_unreleased(&self) -> bool {
        !self.unreleased && self.latest_version().is_none()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `~/.config/.git-changelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".git-changelog.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| ChangelogError::config(e.to_string()))
}
