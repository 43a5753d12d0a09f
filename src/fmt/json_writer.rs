use std::io;

use log::debug;

use crate::{error::Result, fmt::FormatWriter, record::CommitRecord};

/// Wraps a `std::io::Write` object to write records as a JSON array
///
/// # Example
///
/// ```no_run
/// # use std::fs::File;
/// # use clog_records::{ClogRecords, fmt::JsonWriter};
/// let clog = ClogRecords::new().unwrap();
///
/// // Create a file to hold our results, which the JsonWriter will wrap (note, .unwrap() is only
/// // used to keep the example short and concise)
/// let mut file = File::create("commits.json").ok().unwrap();
///
/// let mut writer = JsonWriter::new(&mut file);
/// clog.write_records_with(&mut writer).unwrap();
/// ```
pub struct JsonWriter<'a>(&'a mut dyn io::Write);

impl<'a> JsonWriter<'a> {
    /// Creates a new instance of the `JsonWriter` struct using a
    /// `std::io::Write` object.
    pub fn new<T: io::Write>(writer: &'a mut T) -> JsonWriter<'a> { JsonWriter(writer) }
}

impl<'a> FormatWriter for JsonWriter<'a> {
    fn write_records(&mut self, records: &[CommitRecord]) -> Result<()> {
        debug!("Writing {} record(s) as JSON", records.len());
        serde_json::to_writer_pretty(&mut *self.0, records)?;
        writeln!(self.0)?;
        self.0.flush().map_err(Into::into)
    }
}
