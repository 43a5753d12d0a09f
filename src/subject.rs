//! The one-line conventional commit subject:
//!
//! ```text
//! [gitmoji] type[(scope)][!]: [gitmoji] description [(#pr)]
//! ```
//!
//! The grammar may start anywhere in the line, so prefixes such as
//! `[skip ci]` or `Revert "` are skipped over. Type, shortcode and pull
//! request characters are ASCII only.
//!
//! A gitmoji is either a single emoji from the pictograph or symbol/dingbat
//! blocks (optionally followed by the emoji variation selector) or a
//! `:shortcode:`.

use regex::Regex;

/// The fields of a subject line that matched the conventional grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    /// The commit type, e.g. `feat`
    pub commit_type: String,
    /// The parenthesized scope. `None` when the subject has no parentheses
    /// at all, `Some("")` for `type(): ...`
    pub scope: Option<String>,
    /// Whether the `!` marker precedes the colon
    pub breaking: bool,
    /// Gitmoji in front of the type and in front of the description, in that
    /// order
    pub gitmoji: Vec<String>,
    /// The trimmed description
    pub description: String,
    /// The pull request number from a trailing `(#123)`
    pub pr: Option<String>,
}

fn subject_regex() -> &'static Regex {
    regex!(concat!(
        r"(?:(?P<lead>[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}]\x{FE0F}?|:[A-Za-z0-9_+-]+:)\s*)?",
        r"(?P<type>[A-Za-z0-9_]+)",
        r"(?:\((?P<scope>[^)]*)\))?",
        r"(?P<breaking>!)?:\s*",
        r"(?:(?P<gitmoji>[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}]\x{FE0F}?|:[A-Za-z0-9_+-]+:))?\s*",
        r"(?P<description>.+?)\s*",
        r"(?:\(#(?P<pr>[0-9]+)\))?\s*$",
    ))
}

/// Parses a commit subject, returning `None` when it does not follow the
/// conventional grammar.
///
/// # Example
///
/// ```
/// # use clog_records::subject::parse_subject;
/// let subject = parse_subject("feat(core)!: add x (#7)").unwrap();
/// assert_eq!(subject.commit_type, "feat");
/// assert_eq!(subject.scope.as_deref(), Some("core"));
/// assert!(subject.breaking);
/// assert_eq!(subject.description, "add x");
/// assert_eq!(subject.pr.as_deref(), Some("7"));
///
/// assert!(parse_subject("Merge branch 'main'").is_none());
/// ```
pub fn parse_subject(header: &str) -> Option<Subject> {
    let caps = subject_regex().captures(header.trim())?;

    let gitmoji = [caps.name("lead"), caps.name("gitmoji")]
        .into_iter()
        .flatten()
        .map(|m| m.as_str().trim())
        .filter(|g| !g.is_empty())
        .map(str::to_owned)
        .collect();

    Some(Subject {
        commit_type: caps["type"].to_owned(),
        scope: caps.name("scope").map(|m| m.as_str().to_owned()),
        breaking: caps.name("breaking").is_some(),
        gitmoji,
        description: caps["description"].trim().to_owned(),
        pr: caps.name("pr").map(|m| m.as_str().to_owned()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_type_and_description() {
        let s = parse_subject("fix: y").unwrap();
        assert_eq!(s.commit_type, "fix");
        assert_eq!(s.scope, None);
        assert!(!s.breaking);
        assert!(s.gitmoji.is_empty());
        assert_eq!(s.description, "y");
        assert_eq!(s.pr, None);
    }

    #[test]
    fn type_scope_description_round_trip() {
        let types = ["feat", "fix", "perf", "build_2"];
        let scopes = ["core", "cli-args", "a.b", "v2"];
        let descriptions = ["add x", "handle empty input", "bump deps to 1.2.3", "x"];

        for ty in types {
            for scope in scopes {
                for desc in descriptions {
                    let header = format!("{ty}({scope}): {desc}");
                    let s = parse_subject(&header).unwrap();
                    assert_eq!(s.commit_type, ty, "{header}");
                    assert_eq!(s.scope.as_deref(), Some(scope), "{header}");
                    assert_eq!(s.description, desc, "{header}");
                    assert!(!s.breaking, "{header}");
                    assert_eq!(s.pr, None, "{header}");
                }
            }
        }
    }

    #[test]
    fn breaking_marker() {
        assert!(parse_subject("feat!: x").unwrap().breaking);
        assert!(parse_subject("feat(api)!: x").unwrap().breaking);
        assert!(!parse_subject("feat: x!").unwrap().breaking);
    }

    #[test]
    fn empty_scope_is_not_missing_scope() {
        assert_eq!(parse_subject("feat(): x").unwrap().scope.as_deref(), Some(""));
        assert_eq!(parse_subject("feat: x").unwrap().scope, None);
    }

    #[test]
    fn pull_request_number() {
        let s = parse_subject("feat(core): add x (#7)").unwrap();
        assert_eq!(s.description, "add x");
        assert_eq!(s.pr.as_deref(), Some("7"));

        let s = parse_subject("fix: mention (#7) mid-line").unwrap();
        assert_eq!(s.description, "mention (#7) mid-line");
        assert_eq!(s.pr, None);
    }

    #[test]
    fn gitmoji_positions() {
        let s = parse_subject("🐛 fix: y").unwrap();
        assert_eq!(s.commit_type, "fix");
        assert_eq!(s.gitmoji, vec!["🐛"]);

        let s = parse_subject("feat: 🎉 initial release").unwrap();
        assert_eq!(s.gitmoji, vec!["🎉"]);
        assert_eq!(s.description, "initial release");

        let s = parse_subject(":sparkles: feat(ui): :lipstick: restyle buttons (#12)").unwrap();
        assert_eq!(s.gitmoji, vec![":sparkles:", ":lipstick:"]);
        assert_eq!(s.scope.as_deref(), Some("ui"));
        assert_eq!(s.description, "restyle buttons");
        assert_eq!(s.pr.as_deref(), Some("12"));

        let s = parse_subject("feat: ♻️ rework parser").unwrap();
        assert_eq!(s.gitmoji, vec!["♻️"]);
        assert_eq!(s.description, "rework parser");
    }

    #[test]
    fn shortcode_alone_is_the_description() {
        let s = parse_subject("docs: :memo:").unwrap();
        assert!(s.gitmoji.is_empty());
        assert_eq!(s.description, ":memo:");
    }

    #[test]
    fn description_is_trimmed() {
        let s = parse_subject("chore:    tidy up   ").unwrap();
        assert_eq!(s.description, "tidy up");
    }

    #[test]
    fn not_conventional() {
        assert!(parse_subject("").is_none());
        assert!(parse_subject("Update README").is_none());
        assert!(parse_subject("feat:").is_none());
        assert!(parse_subject("feat: ").is_none());
        assert!(parse_subject("feat!(api): x").is_none());
        assert!(parse_subject("功能: 新增").is_none());
    }

    #[test]
    fn leading_text_is_skipped() {
        let s = parse_subject("[skip ci] fix: y").unwrap();
        assert_eq!(s.commit_type, "fix");
        assert_eq!(s.description, "y");

        let s = parse_subject("Revert \"feat: x\"").unwrap();
        assert_eq!(s.commit_type, "feat");
        assert_eq!(s.description, "x\"");

        let s = parse_subject("wip 🐛 fix(io): short reads").unwrap();
        assert_eq!(s.gitmoji, vec!["🐛"]);
        assert_eq!(s.scope.as_deref(), Some("io"));
    }

    #[test]
    fn non_ascii_digits_are_not_a_pull_request() {
        let s = parse_subject("feat: x (#١٢)").unwrap();
        assert_eq!(s.description, "x (#١٢)");
        assert_eq!(s.pr, None);
    }
}
