use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

/// An enum for describing and handling the errors encountered while loading
/// `clog-records` options or writing records out.
///
/// Parsing itself never fails: unreadable commits degrade to empty records
/// and a failing `git` call is reported as "no output".
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse config file {0}: {1}")]
    ConfigParse(PathBuf, #[source] toml::de::Error),

    #[error("cannot get current directory")]
    CurrentDir,

    #[error("fatal I/O error with output file")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize commit records")]
    Json(#[from] serde_json::Error),
}
