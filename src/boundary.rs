use std::fmt;

/// Conditions that degrade the changelog without stopping its generation.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The remote has no usable URL, issue and compare links are off
    RemoteUnresolved { remote: String, reason: String },
    /// The repository has no references at all
    EmptyRepository,
    /// Commits were walked but none carries a release tag, and untagged
    /// commits were skipped
    NoReleaseBoundary { commits: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::RemoteUnresolved { remote, reason } => {
                write!(
                    f,
                    "Cannot derive links from remote '{}': {}. Turning off issue and compare links",
                    remote, reason
                )
            }
            BoundaryWarning::EmptyRepository => write!(f, "Repository is empty"),
            BoundaryWarning::NoReleaseBoundary { commits } => {
                write!(
                    f,
                    "None of the {} walked commits carries a release tag",
                    commits
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_unresolved_display() {
        let warning = BoundaryWarning::RemoteUnresolved {
            remote: "origin".to_string(),
            reason: "remote is not configured".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Cannot derive links from remote 'origin': remote is not configured. Turning off issue and compare links"
        );
    }

    #[test]
    fn test_no_release_boundary_display() {
        let warning = BoundaryWarning::NoReleaseBoundary { commits: 3 };
        assert!(warning.to_string().contains("3 walked commits"));
    }
}
