//! JSON record reading and writing.

use super::RecordSink;
use crate::discovery::DiscoveredFile;
use crate::{Error, Result};
use serde_json::Value;
use std::io::{BufRead, Write};

/// Reads candidate records from a JSON array or NDJSON stream.
///
/// The format is detected from the first non-whitespace character: `[`
/// selects array mode, anything else is parsed one object per line with
/// blank lines skipped. Empty input yields no candidates.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the input is not valid JSON, naming
/// the offending line in NDJSON mode.
pub fn load_candidates<R: BufRead>(mut reader: R) -> Result<Vec<Value>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| Error::operation("read_json", e))?;

    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| Error::InvalidInput(format!("Failed to parse JSON array: {e}")));
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line.trim())
                .map_err(|e| {
                    Error::InvalidInput(format!("Line {}: Failed to parse JSON: {e}", i + 1))
                })
        })
        .collect()
}

/// Writes records as a pretty-printed JSON array.
pub struct JsonArraySink<W: Write> {
    writer: W,
    /// Number of records written.
    count: usize,
}

impl<W: Write> JsonArraySink<W> {
    /// Creates a new JSON array sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }
}

impl<W: Write> RecordSink for JsonArraySink<W> {
    fn write(&mut self, record: &DiscoveredFile) -> Result<()> {
        let separator: &[u8] = if self.count == 0 { b"[\n" } else { b",\n" };
        self.writer
            .write_all(separator)
            .map_err(|e| Error::operation("write_json", e))?;
        serde_json::to_writer_pretty(&mut self.writer, record)
            .map_err(|e| Error::operation("write_json", e))?;
        self.count += 1;
        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        let closing: &[u8] = if self.count == 0 { b"[]\n" } else { b"\n]\n" };
        self.writer
            .write_all(closing)
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::operation("flush_json", e))
    }
}

/// Writes records as newline-delimited JSON.
pub struct NdjsonSink<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonSink<W> {
    /// Creates a new NDJSON sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> RecordSink for NdjsonSink<W> {
    fn write(&mut self, record: &DiscoveredFile) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .map_err(|e| Error::operation("write_ndjson", e))?;
        writeln!(self.writer).map_err(|e| Error::operation("write_ndjson", e))
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::operation("flush_ndjson", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::AnalysisResult;
    use crate::discovery::{Provenance, normalize_file};
    use std::io::Cursor;

    fn record(url: &str) -> DiscoveredFile {
        let mut analysis = AnalysisResult::default();
        analysis.medical_terms.insert("aging".to_string());
        DiscoveredFile::from_analysis(
            Provenance::new(url, "example.org", "Title").with_timestamp("2024-01-01T00:00:00Z"),
            &analysis,
            "A snippet long enough to pass".to_string(),
        )
    }

    #[test]
    fn test_load_array() {
        let input = r#"[
            {"file_url": "a"},
            {"file_url": "b"}
        ]"#;
        let candidates = load_candidates(Cursor::new(input)).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1]["file_url"], "b");
    }

    #[test]
    fn test_load_ndjson_skips_blank_lines() {
        let input = "{\"file_url\": \"a\"}\n\n  \n{\"file_url\": \"b\"}\n";
        let candidates = load_candidates(Cursor::new(input)).unwrap();
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_load_empty() {
        assert!(load_candidates(Cursor::new("  \n")).unwrap().is_empty());
    }

    #[test]
    fn test_load_reports_bad_line() {
        let input = "{\"file_url\": \"a\"}\n{not json}\n";
        let err = load_candidates(Cursor::new(input)).unwrap_err();
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn test_non_object_candidates_are_kept() {
        let candidates = load_candidates(Cursor::new("[1, \"two\", null]")).unwrap();
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_array_sink_reads_back() {
        let mut out = Vec::new();
        let mut sink: Box<dyn RecordSink + '_> = Box::new(JsonArraySink::new(&mut out));
        sink.write(&record("a")).unwrap();
        sink.write(&record("b")).unwrap();
        sink.finalize().unwrap();

        let candidates = load_candidates(Cursor::new(out)).unwrap();
        assert_eq!(candidates.len(), 2);
        let restored = normalize_file(&candidates[0]).unwrap();
        assert_eq!(restored, record("a"));
    }

    #[test]
    fn test_ndjson_sink_one_line_per_record() {
        let mut out = Vec::new();
        let mut sink: Box<dyn RecordSink + '_> = Box::new(NdjsonSink::new(&mut out));
        sink.write(&record("a")).unwrap();
        sink.write(&record("b")).unwrap();
        sink.finalize().unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(load_candidates(Cursor::new(text)).unwrap().len(), 2);
    }
}
