use std::io;

use crate::{error::Result, fmt::FormatWriter, record::CommitRecord};

/// Wraps a `std::io::Write` object to write one `* <subject> (<short hash>)`
/// line per record, the same listing `git log --pretty='* %s (%h)'` gives.
pub struct OnelineWriter<'a>(&'a mut dyn io::Write);

impl<'a> OnelineWriter<'a> {
    pub fn new<T: io::Write>(writer: &'a mut T) -> OnelineWriter<'a> { OnelineWriter(writer) }
}

impl<'a> FormatWriter for OnelineWriter<'a> {
    fn write_records(&mut self, records: &[CommitRecord]) -> Result<()> {
        for record in records {
            writeln!(self.0, "* {} ({})", record.header, record.short_hash)?;
        }
        self.0.flush().map_err(Into::into)
    }
}
