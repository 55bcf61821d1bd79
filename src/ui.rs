//! Terminal output: status lines and a compact changelog summary

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{Changelog, Note, Release};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a non-fatal warning in yellow.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠").yellow(), warning);
}

/// One line per note: `type(scope): description (sha)`
pub fn format_note(note: &Note) -> String {
    let short_sha = note.commit_sha.get(..7).unwrap_or(&note.commit_sha);

    if note.r#type.is_empty() {
        return format!("- ({})", short_sha);
    }

    let header = if note.scope.is_empty() {
        note.r#type.clone()
    } else {
        format!("{}({})", note.r#type, note.scope)
    };
    format!("- {}: {} ({})", header, note.description, short_sha)
}

/// Release header followed by its notes and compare link
pub fn format_release(release: &Release) -> String {
    let mut out = format!("## {} ({})\n", release.title, release.date.format("%Y-%m-%d"));

    for note in &release.notes {
        out.push_str(&format_note(note));
        out.push('\n');
    }

    if let Some(url) = &release.compare_url {
        out.push_str(&format!("\nFull changes: {}\n", url));
    }

    out
}

/// Plain-text summary of the whole changelog
pub fn format_changelog(changelog: &Changelog) -> String {
    let mut out = format!("# {}\n", changelog.title);

    if !changelog.description.is_empty() {
        out.push_str(&format!("\n{}\n", changelog.description));
    }

    for release in &changelog.releases {
        out.push('\n');
        out.push_str(&format_release(release));
    }

    out
}

pub fn display_changelog(changelog: &Changelog) {
    print!("{}", format_changelog(changelog));

    if changelog.releases.is_empty() {
        println!("\n{}", style("No releases found").dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn release() -> Release {
        let mut release = Release::new(
            "1.1.0",
            "1.1.0",
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            "0123456789",
        );
        release
            .notes
            .push(Note::from_message("0123456789abcdef", "feat(api): add paging"));
        release
            .notes
            .push(Note::from_message("fedcba9876543210", "merge branch 'x'"));
        release.compare_url = Some("https://x/compare/1.0.0...1.1.0".to_string());
        release
    }

    #[test]
    fn test_format_note() {
        let note = Note::from_message("0123456789abcdef", "fix: crash");
        assert_eq!(format_note(&note), "- fix: crash (0123456)");
    }

    #[test]
    fn test_format_release() {
        assert_eq!(
            format_release(&release()),
            "## 1.1.0 (2024-02-29)\n\
             - feat(api): add paging (0123456)\n\
             - (fedcba9)\n\
             \nFull changes: https://x/compare/1.0.0...1.1.0\n"
        );
    }

    #[test]
    fn test_format_changelog_header() {
        let mut changelog = Changelog::new("Changelog", "Notable changes", None, None, "", "semver");
        changelog.add_release(release());

        let text = format_changelog(&changelog);
        assert!(text.starts_with("# Changelog\n\nNotable changes\n\n## 1.1.0"));
    }
}
