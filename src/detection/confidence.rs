//! Confidence scoring.
//!
//! ```text
//! base       = clamp(mean(concept hits), 0, 1)      (0 when no hits)
//! citations  = 0.15 [doi] + 0.15 [pmid] + 0.10 [arxiv]
//! doc type   = 0.15 paper | 0.12 protocol | 0.10 report | 0.08 proposal | 0.05 memo | 0
//! confidence = round2(min(base + citations + doc type, 1))
//! ```
//!
//! The base is a mean, so one concentrated concept scores like many weak
//! ones and breadth is not rewarded. Confidence saturates quickly; ranking
//! uses [`AnalysisResult::signal`](super::AnalysisResult::signal) instead.

use super::types::{CitationSignals, DocType};
use std::collections::BTreeMap;

/// Bonus for a DOI.
pub const DOI_BONUS: f64 = 0.15;
/// Bonus for a PubMed identifier.
pub const PMID_BONUS: f64 = 0.15;
/// Bonus for an arXiv identifier.
pub const ARXIV_BONUS: f64 = 0.10;

/// Fixed bonus per document archetype.
#[must_use]
pub const fn doc_type_bonus(doc_type: DocType) -> f64 {
    match doc_type {
        DocType::PaperLike => 0.15,
        DocType::ProtocolLike => 0.12,
        DocType::ReportLike => 0.10,
        DocType::ProposalLike => 0.08,
        DocType::MemoLike => 0.05,
        DocType::Unknown => 0.0,
    }
}

/// Sum of indicator bonuses for the citation flags that are set.
#[must_use]
pub fn citation_bonus(citations: CitationSignals) -> f64 {
    let mut bonus = 0.0;
    if citations.has_doi {
        bonus += DOI_BONUS;
    }
    if citations.has_pmid {
        bonus += PMID_BONUS;
    }
    if citations.has_arxiv {
        bonus += ARXIV_BONUS;
    }
    bonus
}

/// Mean hit value clamped to `[0, 1]`; zero for no hits.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn base_score(concept_hits: &BTreeMap<String, f64>) -> f64 {
    if concept_hits.is_empty() {
        return 0.0;
    }
    let mean = concept_hits.values().sum::<f64>() / concept_hits.len() as f64;
    mean.clamp(0.0, 1.0)
}

/// Blends concept density, citations and document type into `[0, 1]`.
#[must_use]
pub fn calculate_confidence(
    concept_hits: &BTreeMap<String, f64>,
    citations: CitationSignals,
    doc_type: DocType,
) -> f64 {
    let raw = base_score(concept_hits) + citation_bonus(citations) + doc_type_bonus(doc_type);
    round2(raw.clamp(0.0, 1.0))
}

/// Rounds to two decimals, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
