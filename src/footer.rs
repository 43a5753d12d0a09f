//! Separating the free-form body of a commit message from its trailing
//! footer block.
//!
//! The split is a heuristic: footers are conventionally a run of one-line
//! `Token: value` / `Token #123` entries at the end of the message, set off
//! from the body by a blank line. Bodies which contain footer-shaped lines
//! followed by a blank line further up are split at the wrong place. That is
//! accepted rather than worked around.

/// A commit message tail split into its body and footer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyFooter {
    /// Free-form text between the subject and the footer block
    pub body: String,
    /// The trailing metadata block, empty when none was found
    pub footer: String,
}

/// Returns `true` if `line` is shaped like a footer entry.
///
/// Three shapes qualify:
///
/// * `BREAKING CHANGE: ...`
/// * `Token: value` where the token may be hyphen-joined, e.g.
///   `Reviewed-by: Z`
/// * `Token #123`, e.g. `Closes #12`
///
/// # Example
///
/// ```
/// # use clog_records::footer::is_footer_line;
/// assert!(is_footer_line("Refs: #123"));
/// assert!(is_footer_line("Fixes #42"));
/// assert!(!is_footer_line("just some prose"));
/// assert!(!is_footer_line(""));
/// ```
pub fn is_footer_line(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }

    regex!(r"^BREAKING CHANGE:").is_match(line)
        || regex!(r"^[A-Za-z-]+(?:-[A-Za-z]+)*:\s+.+").is_match(line)
        || regex!(r"^[A-Za-z-]+\s+#[0-9]+").is_match(line)
}

/// Splits everything after the subject line into body and footer.
///
/// Lines are scanned from the end upwards. Each footer-shaped line moves the
/// start of the footer up to it; once a footer has been seen, the first blank
/// line ends the scan. Prose lines between footer lines do not end the scan
/// and end up inside the footer.
///
/// # Example
///
/// ```
/// # use clog_records::footer::split;
/// let parts = split("Longer explanation.\n\nCloses #12\nReviewed-by: Z");
/// assert_eq!(parts.body, "Longer explanation.");
/// assert_eq!(parts.footer, "Closes #12\nReviewed-by: Z");
/// ```
pub fn split(raw: &str) -> BodyFooter {
    let message = raw.replace("\r\n", "\n");
    let lines: Vec<&str> = message.trim().split('\n').collect();

    let mut footer_start = None;
    for (i, line) in lines.iter().enumerate().rev() {
        let line = line.trim();
        if is_footer_line(line) {
            footer_start = Some(i);
        } else if footer_start.is_some() && line.is_empty() {
            break;
        }
    }

    match footer_start {
        None => BodyFooter {
            body: lines.join("\n").trim().to_owned(),
            footer: String::new(),
        },
        Some(start) => BodyFooter {
            body: lines[..start].join("\n").trim().to_owned(),
            footer: lines[start..].join("\n").trim().to_owned(),
        },
    }
}
