//! Turning raw `git log` output into [`CommitRecord`]s.
//!
//! Each commit is printed as
//!
//! ```text
//! <full hash>
//! <short hash>
//! <subject>
//! <body and footer lines...>
//! <sentinel>
//! ```
//!
//! so the output is cut on the sentinel and every chunk is parsed on its own.

use log::{debug, trace};

use crate::{
    footer,
    record::{CommitRecord, CommitRecords},
};

/// The default chunk terminator. It is not expected to occur in commit text.
pub const DEFAULT_SENTINEL: &str = "==END==";

/// The `--pretty=format:` for one-line `* subject (short hash)` summaries
pub const SUMMARY_FORMAT: &str = "* %s (%h)";

/// The `--pretty=format:` producing the layout [`parse_log`] reads
///
/// # Example
///
/// ```
/// # use clog_records::gitlog::record_format;
/// assert_eq!(record_format("==END=="), "%H%n%h%n%s%n%b%n==END==");
/// ```
pub fn record_format(sentinel: &str) -> String { format!("%H%n%h%n%s%n%b%n{sentinel}") }

/// Parses a whole `git log` dump, keeping git's (newest first) order.
///
/// Chunks with nothing but whitespace in them are skipped; an empty dump is
/// simply zero commits.
///
/// # Example
///
/// ```
/// # use clog_records::gitlog::parse_log;
/// let raw = "abc123\nabc\nfeat(core): add x (#7)\nCloses #7\n==END==def456\ndef\nfix: y\n==END==";
/// let records = parse_log(raw, "==END==");
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].commit_type, "feat");
/// assert_eq!(records[1].description, "y");
/// ```
pub fn parse_log(raw: &str, sentinel: &str) -> CommitRecords {
    let chunks: Vec<&str> = if sentinel.is_empty() {
        vec![raw]
    } else {
        raw.split(sentinel).collect()
    };

    let records: CommitRecords = chunks
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .map(parse_chunk)
        .collect();

    debug!("Parsed {} commit(s) from git log", records.len());
    records
}

/// Parses the text of a single commit.
///
/// Empty lines are dropped before the remaining lines are handed to the
/// body/footer split, so with git's `%b` the footer begins at the first
/// footer-shaped line after the subject. Missing hash or subject lines
/// become empty strings.
pub fn parse_chunk(chunk: &str) -> CommitRecord {
    let chunk = chunk.replace("\r\n", "\n");
    let mut lines = chunk.trim().split('\n').filter(|line| !line.is_empty());

    let full_hash = lines.next().unwrap_or_default().trim();
    let short_hash = lines.next().unwrap_or_default().trim();
    let subject = lines.next().unwrap_or_default();
    let rest = lines.collect::<Vec<_>>().join("\n");

    trace!("Parsing commit {short_hash}: {subject:?}");
    let parts = footer::split(&rest);

    CommitRecord::assemble(subject, &parts.body, &parts.footer, short_hash, full_hash)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::issues::IssueLinkType;

    #[test]
    fn two_commits() {
        let raw = "abc123\nabc\nfeat(core): add x (#7)\nCloses #7\n==END==def456\ndef\nfix: y\n==END==";
        let records = parse_log(raw, "==END==");
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.full_hash, "abc123");
        assert_eq!(first.short_hash, "abc");
        assert_eq!(first.commit_type, "feat");
        assert_eq!(first.scope.as_deref(), Some("core"));
        assert_eq!(first.pr.as_deref(), Some("7"));
        assert_eq!(first.issues.get(IssueLinkType::Closes), &[7]);
        assert_eq!(first.footer, "Closes #7");

        let second = &records[1];
        assert_eq!(second.full_hash, "def456");
        assert_eq!(second.commit_type, "fix");
        assert_eq!(second.description, "y");
        assert_eq!(second.body, "");
        assert_eq!(second.footer, "");
    }

    #[test]
    fn empty_output_is_no_commits() {
        assert!(parse_log("", DEFAULT_SENTINEL).is_empty());
        assert!(parse_log("\n==END==\n\n==END==", DEFAULT_SENTINEL).is_empty());
    }

    #[test]
    fn body_and_footer_with_git_layout() {
        let raw = indoc! {"
            1111111111
            1111111
            feat(api)!: drop v1 endpoints

            The v1 endpoints were deprecated a year ago.

            BREAKING CHANGE: /v1 is gone
            Fixes #10
            ==END==
            2222222222
            2222222
            Merge-ish commit without type
            ==END==
        "};
        let records = parse_log(raw, DEFAULT_SENTINEL);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert!(first.breaking);
        assert_eq!(first.body, "The v1 endpoints were deprecated a year ago.");
        assert_eq!(first.footer, "BREAKING CHANGE: /v1 is gone\nFixes #10");
        assert_eq!(first.breaks.as_deref(), Some("/v1 is gone"));
        assert_eq!(first.issues.get(IssueLinkType::Fixes), &[10]);

        let second = &records[1];
        assert!(!second.is_conventional());
        assert_eq!(second.header, "Merge-ish commit without type");
        assert_eq!(second.full_hash, "2222222222");
    }

    #[test]
    fn truncated_chunk_degrades() {
        let records = parse_log("abc123\n==END==", DEFAULT_SENTINEL);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].full_hash, "abc123");
        assert_eq!(records[0].short_hash, "");
        assert_eq!(records[0].header, "");
        assert!(!records[0].is_conventional());
    }

    #[test]
    fn custom_and_empty_sentinel() {
        let records = parse_log("a1\na\nfix: one\n@@\nb2\nb\nfix: two\n@@", "@@");
        assert_eq!(
            records.iter().map(|r| r.description.as_str()).collect::<Vec<_>>(),
            vec!["one", "two"]
        );

        let records = parse_log("a1\na\nfix: one\n", "");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "one");
    }

    #[test]
    fn crlf_output() {
        let records = parse_log("a1\r\na\r\nfeat: x\r\nRefs #3\r\n==END==", DEFAULT_SENTINEL);
        assert_eq!(records[0].header, "feat: x");
        assert_eq!(records[0].issues.get(IssueLinkType::Refs), &[3]);
    }
}
