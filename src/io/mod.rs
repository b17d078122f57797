//! Record file I/O.
//!
//! Reads candidate records for validation and writes accepted records.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Notes |
//! |--------|------|-------|-------|
//! | JSON | ✓ | ✓ | Array of objects; reading also accepts NDJSON |
//! | NDJSON | ✓ | ✓ | One object per line |
//! | CSV | - | ✓ | List fields joined with `;` |
//!
//! Candidates are read as untyped [`serde_json::Value`]s so that malformed
//! records reach [`validate_file`](crate::discovery::validate_file) instead of
//! failing the whole file.

pub mod csv;
pub mod json;

pub use self::csv::CsvRecordSink;
pub use self::json::{JsonArraySink, NdjsonSink, load_candidates};

use crate::discovery::DiscoveredFile;
use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Supported record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// A JSON array of records.
    #[default]
    Json,
    /// Newline-delimited JSON.
    Ndjson,
    /// Comma-separated values with a header row.
    Csv,
}

impl Format {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Csv => "csv",
        }
    }

    /// Detects format from file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some(ext) => ext.parse(),
            None => Err(Error::InvalidInput(
                "Cannot determine format: file has no extension".to_string(),
            )),
        }
    }

    /// Whether records in this format can be read back.
    #[must_use]
    pub const fn supports_read(&self) -> bool {
        matches!(self, Self::Json | Self::Ndjson)
    }

    /// Creates a sink writing this format to `writer`.
    #[must_use]
    pub fn sink<'a, W: Write + 'a>(&self, writer: W) -> Box<dyn RecordSink + 'a> {
        match self {
            Self::Json => Box::new(JsonArraySink::new(writer)),
            Self::Ndjson => Box::new(NdjsonSink::new(writer)),
            Self::Csv => Box::new(CsvRecordSink::new(writer)),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::InvalidInput(format!("Unknown format: {s}"))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Destination for discovered-file records.
pub trait RecordSink {
    /// Writes one record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn write(&mut self, record: &DiscoveredFile) -> Result<()>;

    /// Completes the output and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the final write or flush fails.
    fn finalize(self: Box<Self>) -> Result<()>;
}

/// Writes every record to `writer` in `format`.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn write_records<W: Write>(
    writer: W,
    records: &[DiscoveredFile],
    format: Format,
) -> Result<()> {
    let mut sink = format.sink(writer);
    for record in records {
        sink.write(record)?;
    }
    sink.finalize()?;
    tracing::debug!(count = records.len(), %format, "Wrote records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("out.json", Format::Json)]
    #[test_case("out.NDJSON", Format::Ndjson)]
    #[test_case("out.jsonl", Format::Ndjson)]
    #[test_case("out.csv", Format::Csv)]
    fn test_from_path(path: &str, expected: Format) {
        assert_eq!(Format::from_path(Path::new(path)).unwrap(), expected);
    }

    #[test]
    fn test_from_path_rejects_unknown() {
        assert!(Format::from_path(Path::new("out.parquet")).is_err());
        assert!(Format::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for format in [Format::Json, Format::Ndjson, Format::Csv] {
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn test_write_records_empty_json() {
        let mut out = Vec::new();
        write_records(&mut out, &[], Format::Json).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
