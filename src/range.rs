use std::fmt;

use log::debug;
use serde::Serialize;

/// The pair of revisions bounding the commits of a release.
///
/// An empty `from` means "from the beginning of history".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionRange {
    pub from: String,
    pub to: String,
}

impl Default for RevisionRange {
    fn default() -> Self { RevisionRange::everything() }
}

impl RevisionRange {
    pub fn new<F: Into<String>, T: Into<String>>(from: F, to: T) -> Self {
        RevisionRange {
            from: from.into(),
            to: to.into(),
        }
    }

    /// All of history up to `HEAD`
    pub fn everything() -> Self { RevisionRange::new("", "HEAD") }

    /// Decides which commits belong to the release being prepared, given the
    /// latest and the previous release tag (blank tags count as missing).
    ///
    /// * Without any tag, everything up to `HEAD` is new.
    /// * When the version is not being bumped (`is_increment == false`) and
    ///   an earlier tag exists, the latest tag's commits are regenerated:
    ///   `previous..latest^1`.
    /// * Otherwise everything since the latest tag is new.
    ///
    /// # Example
    ///
    /// ```
    /// # use clog_records::RevisionRange;
    /// let range = RevisionRange::from_tags(Some("v1.2.0"), Some("v1.1.0"), false);
    /// assert_eq!(range, RevisionRange::new("v1.1.0", "v1.2.0^1"));
    ///
    /// let range = RevisionRange::from_tags(Some("v1.2.0"), Some("v1.1.0"), true);
    /// assert_eq!(range, RevisionRange::new("v1.2.0", "HEAD"));
    /// ```
    pub fn from_tags(latest: Option<&str>, previous: Option<&str>, is_increment: bool) -> Self {
        let Some(latest) = present(latest) else {
            debug!("No release tag found, using all of history");
            return RevisionRange::everything();
        };

        match present(previous) {
            Some(previous) if !is_increment => {
                debug!("Version unchanged, regenerating {latest} from {previous}");
                RevisionRange::new(previous, format!("{latest}^1"))
            }
            _ => {
                debug!("Collecting commits since {latest}");
                RevisionRange::new(latest, "HEAD")
            }
        }
    }

    /// `true` when the range starts at the root of history
    pub fn is_from_start(&self) -> bool { self.from.trim().is_empty() }

    /// The revision argument handed to `git log`
    pub fn log_arg(&self) -> String {
        if self.is_from_start() {
            self.to.trim().to_owned()
        } else {
            format!("{}...{}", self.from.trim(), self.to.trim())
        }
    }
}

fn present(tag: Option<&str>) -> Option<&str> { tag.map(str::trim).filter(|t| !t.is_empty()) }

impl fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.log_arg()) }
}
