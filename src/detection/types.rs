//! Types produced by the analyzer.
//!
//! - [`DocType`]: coarse structural archetype of a document
//! - [`CitationSignals`]: presence of DOI / PMID / arXiv identifiers
//! - [`AnalysisResult`]: the complete, immutable output of one `analyze` call

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Structural archetype inferred from section-heading-like patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocType {
    /// Abstract / methods / results / references layout.
    PaperLike,
    /// Executive summary / findings / recommendations layout.
    ReportLike,
    /// To / From / Subject header layout.
    MemoLike,
    /// Criteria, dosing and procedure layout.
    ProtocolLike,
    /// Aims, budget and timeline layout.
    ProposalLike,
    /// No archetype reached its threshold.
    #[default]
    Unknown,
}

impl DocType {
    /// Classifier evaluation order; earlier types win ties.
    pub const EVALUATION_ORDER: [Self; 5] = [
        Self::PaperLike,
        Self::ReportLike,
        Self::MemoLike,
        Self::ProtocolLike,
        Self::ProposalLike,
    ];

    /// Returns the string representation used in serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PaperLike => "PAPER_LIKE",
            Self::ReportLike => "REPORT_LIKE",
            Self::MemoLike => "MEMO_LIKE",
            Self::ProtocolLike => "PROTOCOL_LIKE",
            Self::ProposalLike => "PROPOSAL_LIKE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parses a doc type name.
    ///
    /// Accepts the serialized form and short aliases such as `paper` or `memo`,
    /// case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "PAPER_LIKE" | "PAPER" => Some(Self::PaperLike),
            "REPORT_LIKE" | "REPORT" => Some(Self::ReportLike),
            "MEMO_LIKE" | "MEMO" => Some(Self::MemoLike),
            "PROTOCOL_LIKE" | "PROTOCOL" => Some(Self::ProtocolLike),
            "PROPOSAL_LIKE" | "PROPOSAL" => Some(Self::ProposalLike),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presence of scholarly identifiers in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct CitationSignals {
    /// A bare DOI or a doi.org URL was found.
    pub has_doi: bool,
    /// A PubMed identifier or PubMed URL was found.
    pub has_pmid: bool,
    /// An arXiv identifier or arXiv abstract URL was found.
    pub has_arxiv: bool,
}

impl CitationSignals {
    /// Whether any citation flag is set.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.has_doi || self.has_pmid || self.has_arxiv
    }
}

/// Output of [`MedicalDetector::analyze`](super::MedicalDetector::analyze).
///
/// Contains no timestamps or random fields: identical input text always
/// produces an identical result. Ordered collections keep serialization
/// byte-stable.
///
/// `confidence` and `is_noise` are independent signals. A document can be
/// confident and noisy at the same time; callers apply both gates (see
/// [`AcceptancePolicy`](crate::discovery::AcceptancePolicy)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisResult {
    /// Lowercased names of concepts with at least one surface-form match.
    pub medical_terms: BTreeSet<String>,
    /// Concept name to weighted occurrence count. Absent means zero.
    pub concept_hits: BTreeMap<String, f64>,
    /// Citation presence flags.
    pub citations: CitationSignals,
    /// Structural archetype.
    pub doc_type: DocType,
    /// Distinct `YYYY-MM-DD` tokens.
    pub dates: BTreeSet<String>,
    /// Gate score in `[0, 1]`, rounded to two decimals.
    pub confidence: f64,
    /// Whether a known homonym phrase was found.
    pub is_noise: bool,
}

impl AnalysisResult {
    /// Raw sum of concept hits, used for ranking rather than gating.
    #[must_use]
    pub fn signal(&self) -> f64 {
        self.concept_hits.values().sum()
    }

    /// Whether any concept matched.
    #[must_use]
    pub fn has_terms(&self) -> bool {
        !self.medical_terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_round_trip_names() {
        for doc_type in DocType::EVALUATION_ORDER {
            assert_eq!(DocType::parse(doc_type.as_str()), Some(doc_type));
        }
        assert_eq!(DocType::parse("unknown"), Some(DocType::Unknown));
        assert_eq!(DocType::parse("paper"), Some(DocType::PaperLike));
        assert_eq!(DocType::parse("proposal-like"), Some(DocType::ProposalLike));
        assert_eq!(DocType::parse("novel"), None);
    }

    #[test]
    fn test_doc_type_serializes_screaming_snake() {
        let json = serde_json::to_string(&DocType::ProtocolLike).unwrap();
        assert_eq!(json, "\"PROTOCOL_LIKE\"");
        assert_eq!(DocType::default(), DocType::Unknown);
    }

    #[test]
    fn test_citation_signals_any() {
        assert!(!CitationSignals::default().any());
        let signals = CitationSignals {
            has_arxiv: true,
            ..CitationSignals::default()
        };
        assert!(signals.any());
    }

    #[test]
    fn test_signal_sums_hits() {
        let mut result = AnalysisResult::default();
        assert!(result.signal().abs() < f64::EPSILON);
        result.concept_hits.insert("aging".to_string(), 2.0);
        result.concept_hits.insert("autophagy".to_string(), 0.85);
        assert!((result.signal() - 2.85).abs() < 1e-9);
    }
}
