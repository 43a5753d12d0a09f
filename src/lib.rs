//! Structured, machine-readable commit records for changelog generators.
//!
//! Every commit between two revisions is parsed into a [`CommitRecord`]
//! carrying its conventional commit type, scope, breaking-change flag,
//! description, gitmoji, pull request and linked issues:
//!
//! ```no_run
//! # use clog_records::ClogRecords;
//! let clog = ClogRecords::new().unwrap();
//! for record in clog.get_records().iter().filter(|r| r.is_conventional()) {
//!     println!("{} {}", record.commit_type, record.description);
//! }
//! ```
//!
//! The parsing steps are available on their own as well: [`footer::split`],
//! [`subject::parse_subject`], [`issues::extract_issues`] and
//! [`gitlog::parse_log`].

#[macro_use]
mod macros;
mod clog_records;
pub mod config;
pub mod error;
pub mod fmt;
pub mod footer;
pub mod git;
pub mod gitlog;
pub mod issues;
pub mod range;
pub mod record;
pub mod subject;

pub use clog_records::ClogRecords;
pub use range::RevisionRange;
pub use record::{CommitRecord, CommitRecords};

// The default config file
const DEFAULT_CONFIG_FILE: &str = ".clog.toml";
