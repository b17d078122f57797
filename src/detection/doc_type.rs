//! Document-type classification.
//!
//! Each archetype owns a set of heading-like patterns. A pattern counts at
//! most once however often it matches (a presence tally). An archetype is a
//! candidate only when its tally reaches `min_matches`; candidates are scored
//! `tally * weight` and the highest score wins, with ties going to the type
//! evaluated first. No candidate means [`DocType::Unknown`].
//!
//! | Type | Patterns | Min | Weight |
//! |------|----------|-----|--------|
//! | `PAPER_LIKE` | abstract, introduction, methods, results, discussion, conclusion, references | 3 | 1.0 |
//! | `REPORT_LIKE` | executive summary, findings, recommendations, background, appendix, table of contents | 2 | 0.8 |
//! | `MEMO_LIKE` | `To:`, `From:`, `Subject:`/`Re:`, memo(randum), `CC:` | 2 | 0.6 |
//! | `PROTOCOL_LIKE` | protocol, procedure, inclusion/exclusion criteria, dosing, informed consent, study design | 3 | 0.9 |
//! | `PROPOSAL_LIKE` | proposal, specific aims, objectives, budget, timeline, deliverables, funding request | 2 | 0.7 |
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use super::types::DocType;
use regex::Regex;
use std::sync::LazyLock;

/// Pattern set for one document archetype.
#[derive(Debug)]
pub struct DocTypePattern {
    /// The archetype.
    pub doc_type: DocType,
    /// Heading-like patterns; each contributes at most one to the tally.
    pub patterns: Vec<Regex>,
    /// Minimum tally for the archetype to be a candidate.
    pub min_matches: usize,
    /// Score multiplier.
    pub weight: f64,
}

impl DocTypePattern {
    /// Number of patterns present in `text`.
    #[must_use]
    pub fn tally(&self, text: &str) -> usize {
        self.patterns.iter().filter(|p| p.is_match(text)).count()
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static regex: doc type pattern"))
        .collect()
}

/// Archetype pattern sets in evaluation order.
pub static DOC_TYPE_PATTERNS: LazyLock<Vec<DocTypePattern>> = LazyLock::new(|| {
    vec![
        DocTypePattern {
            doc_type: DocType::PaperLike,
            patterns: compile(&[
                r"(?i)\babstract\b",
                r"(?i)\bintroduction\b",
                r"(?i)\b(materials\s+and\s+)?methods?\b",
                r"(?i)\bresults\b",
                r"(?i)\bdiscussion\b",
                r"(?i)\bconclusions?\b",
                r"(?i)\b(references|bibliography)\b",
            ]),
            min_matches: 3,
            weight: 1.0,
        },
        DocTypePattern {
            doc_type: DocType::ReportLike,
            patterns: compile(&[
                r"(?i)\bexecutive\s+summary\b",
                r"(?i)\b(key\s+)?findings\b",
                r"(?i)\brecommendations?\b",
                r"(?i)\bbackground\b",
                r"(?i)\bappendix\b",
                r"(?i)\btable\s+of\s+contents\b",
            ]),
            min_matches: 2,
            weight: 0.8,
        },
        DocTypePattern {
            doc_type: DocType::MemoLike,
            patterns: compile(&[
                r"(?im)^\s*to\s*:",
                r"(?im)^\s*from\s*:",
                r"(?im)^\s*(subject|re)\s*:",
                r"(?i)\bmemo(randum)?\b",
                r"(?im)^\s*cc\s*:",
            ]),
            min_matches: 2,
            weight: 0.6,
        },
        DocTypePattern {
            doc_type: DocType::ProtocolLike,
            patterns: compile(&[
                r"(?i)\bprotocol\b",
                r"(?i)\bprocedures?\b",
                r"(?i)\binclusion\s+criteria\b",
                r"(?i)\bexclusion\s+criteria\b",
                r"(?i)\b(dosage|dosing)\b",
                r"(?i)\binformed\s+consent\b",
                r"(?i)\bstudy\s+design\b",
            ]),
            min_matches: 3,
            weight: 0.9,
        },
        DocTypePattern {
            doc_type: DocType::ProposalLike,
            patterns: compile(&[
                r"(?i)\bproposal\b",
                r"(?i)\bspecific\s+aims\b",
                r"(?i)\bobjectives?\b",
                r"(?i)\bbudget\b",
                r"(?i)\btimeline\b",
                r"(?i)\bdeliverables\b",
                r"(?i)\bfunding\s+request\b",
            ]),
            min_matches: 2,
            weight: 0.7,
        },
    ]
});

/// Tally and score of one archetype against a text.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DocTypeScore {
    /// The archetype.
    pub doc_type: DocType,
    /// Patterns present.
    pub tally: usize,
    /// Threshold for candidacy.
    pub min_matches: usize,
    /// `tally * weight` when the threshold is met.
    pub score: Option<f64>,
}

/// Scores every archetype, in evaluation order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_doc_types(text: &str) -> Vec<DocTypeScore> {
    DOC_TYPE_PATTERNS
        .iter()
        .map(|set| {
            let tally = set.tally(text);
            DocTypeScore {
                doc_type: set.doc_type,
                tally,
                min_matches: set.min_matches,
                score: (tally >= set.min_matches).then(|| tally as f64 * set.weight),
            }
        })
        .collect()
}

/// Classifies the structural archetype of `text`.
#[must_use]
pub fn classify_document(text: &str) -> DocType {
    let mut best = DocType::Unknown;
    let mut best_score = 0.0_f64;
    for candidate in score_doc_types(text) {
        if let Some(score) = candidate.score {
            // Strictly greater keeps the earlier type on ties
            if score > best_score {
                best = candidate.doc_type;
                best_score = score;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_evaluation_order_matches_doc_type() {
        let order: Vec<DocType> = DOC_TYPE_PATTERNS.iter().map(|p| p.doc_type).collect();
        assert_eq!(order, DocType::EVALUATION_ORDER.to_vec());
        assert_eq!(DOC_TYPE_PATTERNS[0].patterns.len(), 7);
    }

    #[test]
    fn test_full_paper_headings() {
        let text = "Abstract\nIntroduction\nMethods\nResults\nDiscussion\nConclusion\nReferences";
        assert_eq!(classify_document(text), DocType::PaperLike);
        let paper = &score_doc_types(text)[0];
        assert_eq!(paper.tally, 7);
        assert_eq!(paper.score, Some(7.0));
    }

    #[test]
    fn test_below_threshold_is_unknown() {
        assert_eq!(classify_document("Abstract and Results only"), DocType::Unknown);
        assert_eq!(classify_document(""), DocType::Unknown);
    }

    #[test]
    fn test_repeated_heading_counts_once() {
        let text = "Results. Results. Results. Results.";
        assert_eq!(score_doc_types(text)[0].tally, 1);
        assert_eq!(classify_document(text), DocType::Unknown);
    }

    #[test_case(
        "Executive Summary\nKey findings\nRecommendations" => DocType::ReportLike ;
        "report"
    )]
    #[test_case(
        "MEMORANDUM\nTo: Research team\nFrom: Lab director\nSubject: Rapamycin dosing" => DocType::MemoLike ;
        "memo"
    )]
    #[test_case(
        "Study protocol. Inclusion criteria: adults. Exclusion criteria: diabetes. Dosing: 5mg." => DocType::ProtocolLike ;
        "protocol"
    )]
    #[test_case(
        "Grant proposal. Specific aims and budget with a timeline." => DocType::ProposalLike ;
        "proposal"
    )]
    fn test_archetypes(text: &str) -> DocType {
        classify_document(text)
    }

    #[test]
    fn test_paper_outscores_report() {
        let text = "Abstract. Introduction. Results. Background. Findings.";
        let scores = score_doc_types(text);
        assert_eq!(scores[0].score, Some(3.0));
        assert_eq!(scores[1].score, Some(1.6));
        assert_eq!(classify_document(text), DocType::PaperLike);
    }

    #[test]
    fn test_exact_tie_keeps_first_evaluated() {
        // report 5 * 0.8 = 4.0 ties paper 4 * 1.0 = 4.0
        let text = "Abstract. Introduction. Results. Discussion. \
                    Executive summary. Findings. Recommendations. Background. Appendix.";
        let scores = score_doc_types(text);
        assert_eq!(scores[0].score, Some(4.0));
        assert_eq!(scores[1].tally, 5);
        assert_eq!(classify_document(text), DocType::PaperLike);
    }

    #[test]
    fn test_higher_score_beats_earlier_type() {
        // paper 3 * 1.0 = 3.0 vs protocol 5 * 0.9 = 4.5
        let text = "Abstract. Methods. Results. Protocol procedure with inclusion criteria, \
                    exclusion criteria and dosing.";
        assert_eq!(classify_document(text), DocType::ProtocolLike);
    }

    #[test]
    fn test_memo_headers_must_start_line() {
        let text = "Send it to: me, from: you";
        assert_eq!(score_doc_types(text)[2].tally, 0);
    }
}
