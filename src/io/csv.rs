//! CSV record writer.

use super::RecordSink;
use crate::discovery::DiscoveredFile;
use crate::{Error, Result};
use std::io::Write;

/// Column order of the CSV output.
pub const CSV_HEADERS: [&str; 14] = [
    "file_url",
    "source",
    "title",
    "snippet",
    "timestamp",
    "medical_terms_found",
    "confidence",
    "doc_type",
    "concept_hits",
    "dates_found",
    "has_doi",
    "has_pmid",
    "has_arxiv",
    "is_noise",
];

/// Writes records as CSV with a header row.
///
/// List fields are joined with `;`. Concept hits are written as
/// `name=value` pairs.
pub struct CsvRecordSink<W: Write> {
    writer: csv::Writer<W>,
    /// Whether headers have been written.
    headers_written: bool,
}

impl<W: Write> CsvRecordSink<W> {
    /// Creates a new CSV sink.
    #[must_use]
    pub fn new(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        Self {
            writer,
            headers_written: false,
        }
    }

    fn ensure_headers(&mut self) -> Result<()> {
        if !self.headers_written {
            self.writer
                .write_record(CSV_HEADERS)
                .map_err(|e| Error::operation("write_csv_headers", e))?;
            self.headers_written = true;
        }
        Ok(())
    }
}

impl<W: Write> RecordSink for CsvRecordSink<W> {
    fn write(&mut self, record: &DiscoveredFile) -> Result<()> {
        self.ensure_headers()?;

        let hits = record
            .concept_hits
            .iter()
            .map(|(name, hit)| format!("{name}={hit}"))
            .collect::<Vec<_>>()
            .join(";");
        let terms = record.medical_terms_found.join(";");
        let dates = record.dates_found.join(";");
        let confidence = format!("{:.2}", record.confidence);

        self.writer
            .write_record([
                record.file_url.as_str(),
                record.source.as_str(),
                record.title.as_str(),
                record.snippet.as_str(),
                record.timestamp.as_str(),
                terms.as_str(),
                confidence.as_str(),
                record.doc_type.as_str(),
                hits.as_str(),
                dates.as_str(),
                bool_str(record.has_doi),
                bool_str(record.has_pmid),
                bool_str(record.has_arxiv),
                bool_str(record.is_noise),
            ])
            .map_err(|e| Error::operation("write_csv", e))
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.ensure_headers()?;
        self.writer
            .flush()
            .map_err(|e| Error::operation("flush_csv", e))
    }
}

const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{AnalysisResult, CitationSignals, DocType};
    use crate::discovery::Provenance;

    #[test]
    fn test_csv_output() {
        let mut analysis = AnalysisResult {
            citations: CitationSignals {
                has_pmid: true,
                ..CitationSignals::default()
            },
            doc_type: DocType::MemoLike,
            confidence: 0.5,
            ..AnalysisResult::default()
        };
        analysis.medical_terms.insert("aging".to_string());
        analysis.medical_terms.insert("autophagy".to_string());
        analysis.concept_hits.insert("aging".to_string(), 2.0);
        let record = DiscoveredFile::from_analysis(
            Provenance::new("u", "s", "Title, with comma").with_timestamp("2024-01-01T00:00:00Z"),
            &analysis,
            "snip".to_string(),
        );

        let mut out = Vec::new();
        let mut sink: Box<dyn RecordSink + '_> = Box::new(CsvRecordSink::new(&mut out));
        sink.write(&record).unwrap();
        sink.finalize().unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADERS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "u,s,\"Title, with comma\",snip,2024-01-01T00:00:00Z,aging;autophagy,0.50,MEMO_LIKE,aging=2,,false,true,false,false"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_output_has_headers() {
        let mut out = Vec::new();
        Box::new(CsvRecordSink::new(&mut out)).finalize().unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), CSV_HEADERS.join(","));
    }
}
