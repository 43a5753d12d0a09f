mod json_writer;
mod oneline_writer;

use std::{result::Result as StdResult, str::FromStr};

use strum::{Display, EnumString};

pub use self::{json_writer::JsonWriter, oneline_writer::OnelineWriter};
use crate::{error::Result, record::CommitRecord};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum RecordFormat {
    #[default]
    Json,
    Oneline,
}

impl<'de> serde::de::Deserialize<'de> for RecordFormat {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A trait that allows writing parsed commit records in an arbitrary format.
///
/// `clog-records` provides two implementors, `clog_records::fmt::JsonWriter`
/// for machine consumption and `clog_records::fmt::OnelineWriter` for a quick
/// human-readable listing.
pub trait FormatWriter {
    /// Writes the given records, in the order given
    fn write_records(&mut self, records: &[CommitRecord]) -> Result<()>;
}
