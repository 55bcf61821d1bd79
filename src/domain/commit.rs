use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// `type(scope)!: description`, optionally followed by a blank line and a
/// body/footer block. `.` stops at the first newline, so a description
/// continued on the next line does not match.
static ENVELOPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)(?:\(([\w\-.]+)\))?!?: (.*)(\n\n[\w\W]*)?$").expect("envelope pattern is valid")
});

/// Splits a body/footer block at the first trailer-shaped paragraph.
static FOOTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\n\n[\w\W]+?)?(\n\n(?:[a-zA-Z-]+|BREAKING[- ]CHANGE)(?:: | #)[\w\W]+)$")
        .expect("footer pattern is valid")
});

/// Structured fields of a conventional commit message.
///
/// Every field is empty when the message does not follow the grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: String,
    pub description: String,
    pub body: String,
    pub footer: String,
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits grammar.
    ///
    /// Never fails: messages outside the grammar yield an all-empty value.
    pub fn parse(message: &str) -> Self {
        let message = message.trim();

        let Some(envelope) = Envelope::parse(message) else {
            debug!("Commit message did not match expected pattern: {}", message);
            return ParsedCommit::default();
        };

        let (body, footer) = split_body_footer(envelope.body_footer);

        ParsedCommit {
            r#type: envelope.r#type.to_string(),
            scope: envelope.scope.to_string(),
            description: envelope.description.to_string(),
            body,
            footer,
        }
    }
}

/// Header fields plus the raw `\n\n`-prefixed body/footer block
#[derive(Debug, PartialEq, Eq)]
struct Envelope<'a> {
    r#type: &'a str,
    scope: &'a str,
    description: &'a str,
    body_footer: &'a str,
}

impl<'a> Envelope<'a> {
    fn parse(message: &'a str) -> Option<Self> {
        let captures = ENVELOPE_RE.captures(message)?;
        let group = |i: usize| captures.get(i).map(|m| m.as_str()).unwrap_or("");

        Some(Envelope {
            r#type: group(1),
            scope: group(2),
            description: group(3),
            body_footer: group(4),
        })
    }
}

/// Split a `\n\n`-prefixed block into body and footer.
///
/// Without a trailer paragraph the whole block is the body.
fn split_body_footer(block: &str) -> (String, String) {
    if block.is_empty() {
        return (String::new(), String::new());
    }

    match FOOTER_RE.captures(block) {
        Some(captures) => {
            let body = captures
                .get(1)
                .map(|m| strip_separator(m.as_str()))
                .unwrap_or("");
            let footer = captures
                .get(2)
                .map(|m| strip_separator(m.as_str()))
                .unwrap_or("");
            (body.to_string(), footer.to_string())
        }
        None => (strip_separator(block).to_string(), String::new()),
    }
}

fn strip_separator(part: &str) -> &str {
    part.strip_prefix("\n\n").unwrap_or(part)
}
