//! The medical detector.

use super::citations::{detect_citations, extract_dates};
use super::confidence::calculate_confidence;
use super::doc_type::{DocTypeScore, classify_document, score_doc_types};
use super::matcher::{ConceptExplanation, ConceptMatcher};
use super::noise::{is_noise, noise_matches};
use super::types::{AnalysisResult, CitationSignals, DocType};
use crate::Result;
use crate::taxonomy::Taxonomy;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::instrument;

/// Audit view of one analysis: what matched and why.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    /// The analysis result itself.
    pub result: AnalysisResult,
    /// Per-concept matched surface forms.
    pub concepts: Vec<ConceptExplanation>,
    /// Archetype tallies in evaluation order.
    pub doc_type_scores: Vec<DocTypeScore>,
    /// Noise phrases found.
    pub noise_phrases: Vec<&'static str>,
    /// Raw concept-hit sum.
    pub signal: f64,
}

/// Composes concept matching, citation detection, document classification,
/// noise filtering and confidence scoring.
///
/// Holds only the immutable taxonomy and its compiled patterns, so a single
/// instance can be shared across threads (`&MedicalDetector` is `Send + Sync`)
/// and called concurrently without coordination.
///
/// # Example
///
/// ```rust
/// use medscan::MedicalDetector;
///
/// let detector = MedicalDetector::with_builtin_taxonomy()?;
/// let result = detector.analyze("Mitochondria power cells; see PMID: 12345678");
/// assert!(result.citations.has_pmid);
/// assert!(result.confidence > 0.0);
/// # Ok::<(), medscan::Error>(())
/// ```
#[derive(Debug)]
pub struct MedicalDetector {
    taxonomy: Taxonomy,
    matcher: ConceptMatcher,
}

impl MedicalDetector {
    /// Creates a detector, compiling every surface form of `taxonomy`.
    ///
    /// # Errors
    ///
    /// Returns an error if a surface form cannot be compiled.
    pub fn new(taxonomy: Taxonomy) -> Result<Self> {
        let matcher = ConceptMatcher::new(&taxonomy)?;
        tracing::debug!(concepts = taxonomy.len(), "Compiled concept matcher");
        Ok(Self { taxonomy, matcher })
    }

    /// Creates a detector over the built-in longevity taxonomy.
    ///
    /// # Errors
    ///
    /// Returns an error if a surface form cannot be compiled.
    pub fn with_builtin_taxonomy() -> Result<Self> {
        Self::new(Taxonomy::builtin())
    }

    /// The taxonomy this detector scores against.
    #[must_use]
    pub const fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Analyzes `text`.
    ///
    /// Never fails: empty or malformed text simply yields no matches.
    /// Deterministic for identical input and records no metrics; callers
    /// report results through [`crate::observability::record_analysis`].
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let concept_hits = self.matcher.score_concept_hits(text);
        let medical_terms: BTreeSet<String> =
            concept_hits.keys().map(|name| name.to_lowercase()).collect();
        let citations = detect_citations(text);
        let doc_type = classify_document(text);
        let dates = extract_dates(text);
        let is_noise = is_noise(text);
        let confidence = calculate_confidence(&concept_hits, citations, doc_type);

        tracing::debug!(
            terms = medical_terms.len(),
            doc_type = %doc_type,
            confidence,
            is_noise,
            "Analyzed document"
        );

        AnalysisResult {
            medical_terms,
            concept_hits,
            citations,
            doc_type,
            dates,
            confidence,
            is_noise,
        }
    }

    /// Analyzes `text` and reports which patterns drove the result.
    #[must_use]
    pub fn explain(&self, text: &str) -> Explanation {
        let result = self.analyze(text);
        Explanation {
            signal: result.signal(),
            concepts: self.matcher.explain(text),
            doc_type_scores: score_doc_types(text),
            noise_phrases: noise_matches(text),
            result,
        }
    }

    /// Weighted occurrence counts per matching concept.
    #[must_use]
    pub fn score_concept_hits(&self, text: &str) -> BTreeMap<String, f64> {
        self.matcher.score_concept_hits(text)
    }

    /// Lowercased names of matching concepts.
    #[must_use]
    pub fn extract_medical_terms(&self, text: &str) -> BTreeSet<String> {
        self.matcher.extract_medical_terms(text)
    }

    /// Byte offset of the first concept match, if any.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<usize> {
        self.matcher.first_match(text)
    }

    /// Citation presence flags.
    #[must_use]
    pub fn detect_citations(&self, text: &str) -> CitationSignals {
        detect_citations(text)
    }

    /// Structural archetype.
    #[must_use]
    pub fn classify_document(&self, text: &str) -> DocType {
        classify_document(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{MedicalConcept, Tier};

    fn detector() -> MedicalDetector {
        MedicalDetector::with_builtin_taxonomy().unwrap()
    }

    const PAPER: &str = "Abstract\n\
        Senescent cells accumulate with aging and drive inflammation.\n\
        Introduction\nMitochondrial dysfunction and NAD+ decline are hallmarks of aging.\n\
        Methods\nMice received dasatinib and quercetin (senolytic) from 2019-03-01.\n\
        Results\nSenescence markers fell.\n\
        References\ndoi:10.1016/j.cell.2013.05.039 PMID: 23746838";

    #[test]
    fn test_analyze_paper() {
        let result = detector().analyze(PAPER);
        assert_eq!(result.doc_type, DocType::PaperLike);
        assert!(result.citations.has_doi);
        assert!(result.citations.has_pmid);
        assert!(!result.citations.has_arxiv);
        assert!(result.medical_terms.contains("aging"));
        assert!(result.medical_terms.contains("cellular senescence"));
        assert!(result.medical_terms.contains("senolytics"));
        assert!(result.medical_terms.contains("nad metabolism"));
        assert_eq!(result.dates.len(), 1);
        assert!((result.confidence - 1.0).abs() < f64::EPSILON);
        assert!(!result.is_noise);
    }

    #[test]
    fn test_analyze_empty_text() {
        let result = detector().analyze("");
        assert_eq!(result, AnalysisResult::default());
        assert!(result.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let d = detector();
        let first = d.analyze(PAPER);
        let second = d.analyze(PAPER);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_noise_is_independent_of_confidence() {
        let result =
            detector().analyze("Mitochondria make ATP. This energy drink claims to help them.");
        assert!(result.medical_terms.contains("mitochondrial function"));
        assert!(result.confidence > 0.0);
        assert!(result.is_noise);
    }

    #[test]
    fn test_terms_match_standalone_extraction() {
        let d = detector();
        let result = d.analyze(PAPER);
        assert_eq!(result.medical_terms, d.extract_medical_terms(PAPER));
        assert_eq!(result.concept_hits, d.score_concept_hits(PAPER));
        assert_eq!(result.doc_type, d.classify_document(PAPER));
        assert_eq!(result.citations, d.detect_citations(PAPER));
    }

    #[test]
    fn test_mixed_case_names_lowercased_in_terms() {
        let taxonomy = Taxonomy::new(vec![
            MedicalConcept::new("NAD Metabolism", Tier::Primary, 0.5).with_aliases(&["NAD+"]),
        ])
        .unwrap();
        let d = MedicalDetector::new(taxonomy).unwrap();
        let result = d.analyze("NAD+");
        assert!(result.medical_terms.contains("nad metabolism"));
        assert!(result.concept_hits.contains_key("NAD Metabolism"));
        // base 0.5, no bonuses
        assert!((result.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_explain() {
        let explanation = detector().explain("Rapamycin (sirolimus) and a therapy dog.");
        assert_eq!(explanation.concepts.len(), 1);
        assert_eq!(explanation.concepts[0].name, "rapamycin");
        assert_eq!(explanation.concepts[0].occurrences, 2);
        assert_eq!(explanation.noise_phrases, vec!["therapy dog/animal"]);
        assert_eq!(explanation.doc_type_scores.len(), 5);
        assert!((explanation.signal - 1.7).abs() < 1e-12);
        assert!(explanation.result.is_noise);
    }

    #[test]
    fn test_detector_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MedicalDetector>();

        let d = detector();
        let results: Vec<AnalysisResult> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| d.analyze(PAPER))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
