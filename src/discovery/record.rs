//! Discovered-file records.

use crate::detection::{AnalysisResult, DocType};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Location of the file.
    pub file_url: String,
    /// Name of the site or corpus the file was found in.
    pub source: String,
    /// Document title.
    pub title: String,
    /// RFC 3339 discovery time.
    pub timestamp: String,
}

impl Provenance {
    /// Creates provenance stamped with the current UTC time.
    #[must_use]
    pub fn new(
        file_url: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            file_url: file_url.into(),
            source: source.into(),
            title: title.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Overrides the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }
}

/// A persisted discovery record: analysis output plus provenance.
///
/// # Field Mapping
///
/// | Field | Required | JSON type |
/// |-------|----------|-----------|
/// | `file_url`, `source`, `title`, `snippet`, `timestamp` | Yes | string |
/// | `medical_terms_found` | Yes | array |
/// | `confidence` | Yes | number in `[0, 1]` |
/// | `doc_type` | Yes | string |
/// | `concept_hits` | No (`{}`) | object |
/// | `dates_found` | No (`[]`) | array |
/// | `has_doi`, `has_pmid`, `has_arxiv`, `is_noise` | No (`false`) | boolean |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredFile {
    /// Location of the file.
    pub file_url: String,
    /// Site or corpus name.
    pub source: String,
    /// Document title.
    pub title: String,
    /// Short excerpt around the first matched term.
    pub snippet: String,
    /// RFC 3339 discovery time.
    pub timestamp: String,
    /// Matched concept names.
    pub medical_terms_found: Vec<String>,
    /// Gate score, two decimals.
    pub confidence: f64,
    /// Structural archetype.
    pub doc_type: DocType,
    /// Weighted hits per concept.
    #[serde(default)]
    pub concept_hits: BTreeMap<String, f64>,
    /// Distinct ISO dates.
    #[serde(default)]
    pub dates_found: Vec<String>,
    /// DOI present.
    #[serde(default)]
    pub has_doi: bool,
    /// PubMed identifier present.
    #[serde(default)]
    pub has_pmid: bool,
    /// arXiv identifier present.
    #[serde(default)]
    pub has_arxiv: bool,
    /// Noise phrase present.
    #[serde(default)]
    pub is_noise: bool,
}

impl DiscoveredFile {
    /// Builds a record from provenance, an analysis and a snippet.
    #[must_use]
    pub fn from_analysis(
        provenance: Provenance,
        analysis: &AnalysisResult,
        snippet: String,
    ) -> Self {
        Self {
            file_url: provenance.file_url,
            source: provenance.source,
            title: provenance.title,
            snippet,
            timestamp: provenance.timestamp,
            medical_terms_found: analysis.medical_terms.iter().cloned().collect(),
            confidence: analysis.confidence,
            doc_type: analysis.doc_type,
            concept_hits: analysis.concept_hits.clone(),
            dates_found: analysis.dates.iter().cloned().collect(),
            has_doi: analysis.citations.has_doi,
            has_pmid: analysis.citations.has_pmid,
            has_arxiv: analysis.citations.has_arxiv,
            is_noise: analysis.is_noise,
        }
    }

    /// Whether any citation flag is set.
    #[must_use]
    pub const fn has_citation(&self) -> bool {
        self.has_doi || self.has_pmid || self.has_arxiv
    }
}

/// Builds a whitespace-collapsed excerpt of at most `max_chars` characters.
///
/// The window starts a quarter of `max_chars` before `anchor` (a byte offset,
/// typically the first concept match) or at the start of the text. Cut ends
/// are marked with `...`.
#[must_use]
pub fn extract_snippet(text: &str, anchor: Option<usize>, max_chars: usize) -> String {
    let anchor = anchor
        .filter(|&a| a <= text.len() && text.is_char_boundary(a))
        .unwrap_or(0);
    let lead = max_chars / 4;
    let start = if lead == 0 {
        anchor
    } else {
        text[..anchor]
            .char_indices()
            .rev()
            .nth(lead - 1)
            .map_or(0, |(i, _)| i)
    };

    let mut out = String::new();
    let mut count = 0;
    let mut truncated = false;
    for word in text[start..].split_whitespace() {
        let separator = usize::from(!out.is_empty());
        let len = word.chars().count();
        if count + separator + len > max_chars {
            if out.is_empty() {
                out.extend(word.chars().take(max_chars));
            }
            truncated = true;
            break;
        }
        if separator == 1 {
            out.push(' ');
        }
        out.push_str(word);
        count += separator + len;
    }

    let prefix = if start > 0 && !text[..start].trim().is_empty() {
        "..."
    } else {
        ""
    };
    let suffix = if truncated { "..." } else { "" };
    format!("{prefix}{out}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::CitationSignals;

    #[test]
    fn test_from_analysis_copies_fields() {
        let mut analysis = AnalysisResult {
            citations: CitationSignals {
                has_doi: true,
                ..CitationSignals::default()
            },
            doc_type: DocType::ReportLike,
            confidence: 0.42,
            ..AnalysisResult::default()
        };
        analysis.medical_terms.insert("autophagy".to_string());
        analysis.concept_hits.insert("autophagy".to_string(), 0.85);
        analysis.dates.insert("2020-01-01".to_string());

        let provenance = Provenance::new("https://example.org/a.pdf", "example.org", "A")
            .with_timestamp("2024-05-01T00:00:00Z");
        let record = DiscoveredFile::from_analysis(provenance, &analysis, "snippet".to_string());

        assert_eq!(record.file_url, "https://example.org/a.pdf");
        assert_eq!(record.timestamp, "2024-05-01T00:00:00Z");
        assert_eq!(record.medical_terms_found, vec!["autophagy"]);
        assert_eq!(record.dates_found, vec!["2020-01-01"]);
        assert_eq!(record.doc_type, DocType::ReportLike);
        assert!(record.has_doi && !record.has_pmid && !record.is_noise);
        assert!(record.has_citation());
    }

    #[test]
    fn test_provenance_timestamp_is_rfc3339() {
        let provenance = Provenance::new("u", "s", "t");
        assert!(chrono::DateTime::parse_from_rfc3339(&provenance.timestamp).is_ok());
    }

    #[test]
    fn test_serialized_shape() {
        let record = DiscoveredFile::from_analysis(
            Provenance::new("u", "s", "t").with_timestamp("2024-01-01T00:00:00Z"),
            &AnalysisResult::default(),
            String::new(),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["doc_type"], "UNKNOWN");
        assert!(value["medical_terms_found"].is_array());
        assert!(value["dates_found"].is_array());
        assert!(value["concept_hits"].is_object());
        assert_eq!(value["has_arxiv"], false);
    }

    #[test]
    fn test_snippet_from_start() {
        let snippet = extract_snippet("  Aging   research\n\tmatters  ", None, 100);
        assert_eq!(snippet, "Aging research matters");
    }

    #[test]
    fn test_snippet_truncates() {
        let snippet = extract_snippet("one two three four", None, 9);
        assert_eq!(snippet, "one two...");
    }

    #[test]
    fn test_snippet_around_anchor() {
        let text = "Lorem ipsum dolor sit amet. Autophagy clears damaged proteins.";
        let anchor = text.find("Autophagy");
        let snippet = extract_snippet(text, anchor, 20);
        assert!(snippet.starts_with("..."));
        assert!(snippet.contains("Autophagy"));
    }

    #[test]
    fn test_snippet_invalid_anchor_falls_back() {
        let text = "é aging";
        // offset 1 is inside the two-byte 'é'
        assert_eq!(extract_snippet(text, Some(1), 50), "é aging");
        assert_eq!(extract_snippet(text, Some(999), 50), "é aging");
    }

    #[test]
    fn test_snippet_long_single_word() {
        assert_eq!(extract_snippet("abcdefghij", None, 4), "abcd...");
        assert_eq!(extract_snippet("", None, 10), "");
    }
}
