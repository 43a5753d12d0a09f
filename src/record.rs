use log::debug;
use serde::Serialize;

use crate::{
    issues::{breaking_change, extract_issues, IssueLinks},
    subject::parse_subject,
};

/// The struct representation of one parsed commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// The conventional commit type (empty if the subject didn't parse)
    #[serde(rename = "type")]
    pub commit_type: String,
    /// The scope (if any)
    pub scope: Option<String>,
    /// Whether this is a breaking change, either through `!` or a
    /// `BREAKING CHANGE:` footer
    pub breaking: bool,
    /// The commit description (empty if the subject didn't parse)
    pub description: String,
    /// Any gitmoji next to the type or description
    pub gitmoji: Vec<String>,
    /// The pull request number from the subject
    pub pr: Option<String>,
    /// The text following `BREAKING CHANGE:`
    pub breaks: Option<String>,
    /// The issues linked from the footer
    pub issues: IssueLinks,
    /// The raw subject line
    pub header: String,
    pub body: String,
    pub footer: String,
    /// The abbreviated hash
    pub short_hash: String,
    /// The 40 char hash
    pub full_hash: String,
}

/// A convienience type for multiple records
pub type CommitRecords = Vec<CommitRecord>;

impl CommitRecord {
    /// Builds a record out of the already separated parts of a commit.
    ///
    /// This never fails. A subject which is not a conventional commit yields a
    /// record with an empty `commit_type` and `description` and `breaking`
    /// unset, but with the raw text, hashes and footer issue links intact.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_records::{CommitRecord, issues::IssueLinkType};
    /// let record = CommitRecord::assemble(
    ///     "feat(core): add x (#7)",
    ///     "",
    ///     "Closes #7",
    ///     "abc",
    ///     "abc123",
    /// );
    /// assert_eq!(record.commit_type, "feat");
    /// assert_eq!(record.issues.get(IssueLinkType::Closes), &[7]);
    /// ```
    pub fn assemble(
        header: &str,
        body: &str,
        footer: &str,
        short_hash: &str,
        full_hash: &str,
    ) -> CommitRecord {
        let issues = extract_issues(footer);

        let Some(subject) = parse_subject(header) else {
            debug!("{short_hash}: subject is not a conventional commit: {header:?}");
            return CommitRecord {
                commit_type: String::new(),
                scope: None,
                breaking: false,
                description: String::new(),
                gitmoji: Vec::new(),
                pr: None,
                breaks: None,
                issues,
                header: header.to_owned(),
                body: body.to_owned(),
                footer: footer.to_owned(),
                short_hash: short_hash.to_owned(),
                full_hash: full_hash.to_owned(),
            };
        };

        let breaks = breaking_change(footer);

        CommitRecord {
            commit_type: subject.commit_type,
            scope: subject.scope,
            breaking: subject.breaking || breaks.is_some(),
            description: subject.description,
            gitmoji: subject.gitmoji,
            pr: subject.pr,
            breaks,
            issues,
            header: header.to_owned(),
            body: body.to_owned(),
            footer: footer.to_owned(),
            short_hash: short_hash.to_owned(),
            full_hash: full_hash.to_owned(),
        }
    }

    /// Whether the subject followed the conventional commit grammar. Callers
    /// that only care about typed commits filter on this.
    pub fn is_conventional(&self) -> bool { !self.commit_type.is_empty() }
}
