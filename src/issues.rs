use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// The ways a footer line can link a commit to an issue.
///
/// Each kind is recognised by a case-insensitive prefix of the footer line,
/// e.g. `Fixes #12`, `closes: #3, #4` or `Related to #99`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, EnumString, EnumIter, Display, AsRefStr, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum IssueLinkType {
    Fixes,
    Closes,
    Resolves,
    Related,
    Refs,
}

impl IssueLinkType {
    fn pattern(self) -> &'static Regex {
        match self {
            IssueLinkType::Fixes => regex!(r"(?i)^Fixes"),
            IssueLinkType::Closes => regex!(r"(?i)^Closes"),
            IssueLinkType::Resolves => regex!(r"(?i)^Resolves"),
            IssueLinkType::Related => regex!(r"(?i)^(?:Related to|Related)"),
            IssueLinkType::Refs => regex!(r"(?i)^Refs?"),
        }
    }

    /// Whether a (trimmed) footer line starts with this kind's keyword.
    ///
    /// Kinds are not exclusive; a line may match more than one.
    pub fn matches(self, line: &str) -> bool { self.pattern().is_match(line) }
}

/// Issue numbers referenced by a commit footer, grouped by link kind.
///
/// Always holds every [`IssueLinkType`], in declaration order, with an empty
/// list for kinds the footer did not use. Numbers keep the order they were
/// written in and duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IssueLinks(IndexMap<IssueLinkType, Vec<u64>>);

impl Default for IssueLinks {
    fn default() -> Self {
        IssueLinks(IssueLinkType::iter().map(|kind| (kind, Vec::new())).collect())
    }
}

impl IssueLinks {
    /// The issues linked with `kind`
    pub fn get(&self, kind: IssueLinkType) -> &[u64] {
        self.0.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IssueLinkType, &[u64])> {
        self.0.iter().map(|(kind, nums)| (*kind, nums.as_slice()))
    }

    /// Every linked issue number, kind by kind
    pub fn all(&self) -> impl Iterator<Item = u64> + '_ { self.0.values().flatten().copied() }

    /// `true` when no kind has any issue attached
    pub fn is_empty(&self) -> bool { self.0.values().all(Vec::is_empty) }
}

/// Collects the issue numbers each footer line links to.
///
/// Every non-blank line is tested against each link kind independently, and
/// every `#<digits>` (ASCII digits only) on a matching line is attributed
/// to that kind.
///
/// # Example
///
/// ```
/// # use clog_records::issues::{extract_issues, IssueLinkType};
/// let links = extract_issues("Closes #12\nRefs #34, #56");
/// assert_eq!(links.get(IssueLinkType::Closes), &[12]);
/// assert_eq!(links.get(IssueLinkType::Refs), &[34, 56]);
/// assert!(links.get(IssueLinkType::Fixes).is_empty());
/// ```
pub fn extract_issues(footer: &str) -> IssueLinks {
    let lines: Vec<&str> = footer
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    IssueLinks(
        IssueLinkType::iter()
            .map(|kind| {
                let numbers = lines
                    .iter()
                    .filter(|line| kind.matches(line))
                    .flat_map(|&line| issue_numbers(line))
                    .collect();
                (kind, numbers)
            })
            .collect(),
    )
}

fn issue_numbers(line: &str) -> impl Iterator<Item = u64> + '_ {
    regex!(r"#([0-9]+)")
        .captures_iter(line)
        .filter_map(|caps| caps[1].parse().ok())
}

/// The explanation following the first `BREAKING CHANGE:` marker, if any.
///
/// # Example
///
/// ```
/// # use clog_records::issues::breaking_change;
/// assert_eq!(
///     breaking_change("Closes #1\nBREAKING CHANGE: config is TOML now").as_deref(),
///     Some("config is TOML now")
/// );
/// assert_eq!(breaking_change("Closes #1"), None);
/// ```
pub fn breaking_change(footer: &str) -> Option<String> {
    regex!(r"(?i)BREAKING CHANGE:\s*(.+)")
        .captures(footer)
        .map(|caps| caps[1].to_owned())
}
