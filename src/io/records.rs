//! JSON interchange for analysis records.
//!
//! Records are read from and written as a single JSON array.

use crate::core::{AnalysisRecord, Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn parse_records(contents: &str) -> Result<Vec<AnalysisRecord>> {
    Ok(serde_json::from_str(contents)?)
}

pub fn read_records(path: &Path) -> Result<Vec<AnalysisRecord>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read records", path, e))?;
    let records = parse_records(&contents)?;
    log::debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Write `records` as pretty-printed JSON followed by a newline.
pub fn write_records<W: Write>(writer: W, records: &[AnalysisRecord]) -> Result<()> {
    RecordWriter::new(writer).write(records)
}

pub struct RecordWriter<W: Write> {
    writer: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, records: &[AnalysisRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
