//! Remote URL normalisation and the link templates derived from it

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::config::UrlStyle;
use crate::error::Result;
use crate::git::Repository;

// ssh://, git://, http(s):// with optional user info and port, or the
// `user@host:owner/repo` shorthand. A trailing `.git` and `/` are dropped.
static REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:https?|git|ssh)://(?:[^@/]+@)?|[^@/:]+@)([^/:]+)(?::\d+)?[/:]([^/:]+)/(.+?)(?:\.git)?/?$",
    )
    .expect("remote pattern is valid")
});

/// Config keys holding a remote's URL, in order of preference
const URL_KEYS: [&str; 3] = ["url", "pushurl", "pullurl"];

/// Collapse a recognised remote URL to `https://host/owner/repo`
pub fn normalize_remote_url(url: &str) -> Option<String> {
    REMOTE_RE
        .captures(url.trim())
        .map(|c| format!("https://{}/{}/{}", &c[1], &c[2], &c[3]))
}

/// Like [normalize_remote_url], but unrecognised input comes back unchanged
pub fn sanitize_remote_url(url: &str) -> String {
    normalize_remote_url(url).unwrap_or_else(|| url.to_string())
}

/// The configured URL of `remote`, or an empty string when none is set
pub fn remote_url<R: Repository + ?Sized>(repo: &R, remote: &str) -> Result<String> {
    for key in URL_KEYS {
        if let Some(url) = repo.remote_config_value(remote, key)? {
            return Ok(url);
        }
    }
    Ok(String::new())
}

/// Issue and compare templates derived from a remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplates {
    /// Issue link with an `{id}` placeholder
    pub issue_url: Option<String>,
    /// Compare link with `{previous}` and `{current}` placeholders
    pub diff_url: Option<String>,
}

impl LinkTemplates {
    /// Links disabled
    pub fn disabled() -> Self {
        LinkTemplates {
            issue_url: None,
            diff_url: None,
        }
    }

    /// Fill `{base_url}` in the style's default templates
    pub fn from_base_url(base_url: &str, style: UrlStyle) -> Self {
        LinkTemplates {
            issue_url: Some(style.issue_template().replace("{base_url}", base_url)),
            diff_url: Some(style.diff_template().replace("{base_url}", base_url)),
        }
    }
}

/// Why link generation was turned off
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// No `url`, `pushurl` or `pullurl` for the remote
    NotConfigured,
    /// A URL was found but has no recognisable `host/owner/repo` shape
    Unrecognized(String),
}

/// Resolve `remote` to a normalised `https://host/owner/repo` base.
///
/// Backend errors are treated like a missing remote: link generation is a
/// convenience and never aborts the run.
pub fn resolve_base_url<R: Repository + ?Sized>(
    repo: &R,
    remote: &str,
) -> std::result::Result<String, Unresolved> {
    let url = match remote_url(repo, remote) {
        Ok(url) => url,
        Err(e) => {
            warn!(remote, error = %e, "Could not read remote configuration");
            String::new()
        }
    };

    if url.is_empty() {
        return Err(Unresolved::NotConfigured);
    }

    normalize_remote_url(&url).ok_or(Unresolved::Unrecognized(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_normalize_scp_shorthand() {
        assert_eq!(
            normalize_remote_url("git@github.com:owner/repo.git").as_deref(),
            Some("https://github.com/owner/repo")
        );
    }

    #[test]
    fn test_normalize_https() {
        assert_eq!(
            normalize_remote_url("https://github.com/owner/repo.git").as_deref(),
            Some("https://github.com/owner/repo")
        );
        assert_eq!(
            normalize_remote_url("https://github.com/owner/repo").as_deref(),
            Some("https://github.com/owner/repo")
        );
        assert_eq!(
            normalize_remote_url("https://github.com/owner/repo/").as_deref(),
            Some("https://github.com/owner/repo")
        );
    }

    #[test]
    fn test_normalize_drops_user_info_and_port() {
        assert_eq!(
            normalize_remote_url("https://token@github.com/owner/repo.git").as_deref(),
            Some("https://github.com/owner/repo")
        );
        assert_eq!(
            normalize_remote_url("ssh://git@gitlab.com:2222/group/project.git").as_deref(),
            Some("https://gitlab.com/group/project")
        );
    }

    #[test]
    fn test_normalize_git_protocol_and_subgroups() {
        assert_eq!(
            normalize_remote_url("git://example.org/owner/repo.git").as_deref(),
            Some("https://example.org/owner/repo")
        );
        assert_eq!(
            normalize_remote_url("git@gitlab.com:group/sub/project.git").as_deref(),
            Some("https://gitlab.com/group/sub/project")
        );
    }

    #[test]
    fn test_unrecognized_is_returned_as_is() {
        assert_eq!(normalize_remote_url("/srv/git/repo.git"), None);
        assert_eq!(normalize_remote_url("not a url"), None);
        assert_eq!(sanitize_remote_url("/srv/git/repo.git"), "/srv/git/repo.git");
    }

    #[test]
    fn test_remote_url_key_priority() {
        let mut repo = MockRepository::new();
        repo.set_remote_config("origin", "pullurl", "git@a.com:o/pull.git");
        assert_eq!(remote_url(&repo, "origin").unwrap(), "git@a.com:o/pull.git");

        repo.set_remote_config("origin", "pushurl", "git@a.com:o/push.git");
        assert_eq!(remote_url(&repo, "origin").unwrap(), "git@a.com:o/push.git");

        repo.set_remote_config("origin", "url", "git@a.com:o/url.git");
        assert_eq!(remote_url(&repo, "origin").unwrap(), "git@a.com:o/url.git");

        assert_eq!(remote_url(&repo, "upstream").unwrap(), "");
    }

    #[test]
    fn test_resolve_base_url() {
        let mut repo = MockRepository::new();
        assert_eq!(
            resolve_base_url(&repo, "origin"),
            Err(Unresolved::NotConfigured)
        );

        repo.set_remote_config("local", "url", "/srv/git/repo.git");
        assert_eq!(
            resolve_base_url(&repo, "local"),
            Err(Unresolved::Unrecognized("/srv/git/repo.git".to_string()))
        );

        repo.set_remote_config("origin", "url", "git@github.com:owner/repo.git");
        assert_eq!(
            resolve_base_url(&repo, "origin").as_deref(),
            Ok("https://github.com/owner/repo")
        );
    }

    #[test]
    fn test_link_templates() {
        let links = LinkTemplates::from_base_url("https://github.com/o/r", UrlStyle::GitHub);
        assert_eq!(
            links.issue_url.as_deref(),
            Some("https://github.com/o/r/issues/{id}")
        );
        assert_eq!(
            links.diff_url.as_deref(),
            Some("https://github.com/o/r/compare/{previous}...{current}")
        );

        let links = LinkTemplates::from_base_url("https://gitlab.com/o/r", UrlStyle::GitLab);
        assert_eq!(
            links.issue_url.as_deref(),
            Some("https://gitlab.com/o/r/-/issues/{id}")
        );
    }
}
