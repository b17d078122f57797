//! Concept pattern matching.
//!
//! Every surface form (alias or intervention example) is escaped and compiled
//! once into a case-insensitive pattern. A word boundary is required only on
//! a side where the form itself begins or ends with a word character, so forms
//! ending in symbols such as `NAD+` still match when followed by whitespace.
//!
//! Counting is per surface form: occurrences are summed across all forms of a
//! concept, so overlapping forms of the same concept (`NAD` inside `NAD+`) are
//! each counted. Forms never contribute to another concept's count.

use crate::taxonomy::{Taxonomy, Tier};
use crate::{Error, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// One compiled surface form.
#[derive(Debug)]
struct CompiledForm {
    form: String,
    pattern: Regex,
}

/// Compiled surface forms of one concept.
#[derive(Debug)]
struct CompiledConcept {
    name: String,
    tier: Tier,
    weight: f64,
    forms: Vec<CompiledForm>,
}

impl CompiledConcept {
    fn occurrences(&self, text: &str) -> usize {
        self.forms
            .iter()
            .map(|f| f.pattern.find_iter(text).count())
            .sum()
    }
}

/// Per-concept match detail for audit output.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ConceptExplanation {
    /// Concept name.
    pub name: String,
    /// Concept tier.
    pub tier: Tier,
    /// Concept weight.
    pub weight: f64,
    /// Total occurrences across all surface forms.
    pub occurrences: usize,
    /// `occurrences * weight`.
    pub hit: f64,
    /// Surface form to occurrence count, for forms that matched.
    pub matched_forms: BTreeMap<String, usize>,
}

/// Precompiled matcher over a taxonomy.
#[derive(Debug)]
pub struct ConceptMatcher {
    concepts: Vec<CompiledConcept>,
}

impl ConceptMatcher {
    /// Compiles every surface form of every concept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTaxonomy`] if a form cannot be compiled
    /// (for example, when it exceeds the regex size limit).
    pub fn new(taxonomy: &Taxonomy) -> Result<Self> {
        let concepts = taxonomy
            .concepts()
            .iter()
            .map(|concept| {
                let forms = concept
                    .surface_forms()
                    .map(|form| {
                        let pattern = Regex::new(&surface_pattern(form)).map_err(|e| {
                            Error::InvalidTaxonomy(format!(
                                "concept '{}': cannot compile '{form}': {e}",
                                concept.name
                            ))
                        })?;
                        Ok(CompiledForm {
                            form: form.trim().to_string(),
                            pattern,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledConcept {
                    name: concept.name.clone(),
                    tier: concept.tier,
                    weight: concept.weight,
                    forms,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { concepts })
    }

    /// Weighted occurrence counts per concept.
    ///
    /// Concepts without matches are omitted; every present value is
    /// `occurrences * weight` and strictly positive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score_concept_hits(&self, text: &str) -> BTreeMap<String, f64> {
        self.concepts
            .iter()
            .filter_map(|concept| {
                let count = concept.occurrences(text);
                (count > 0).then(|| (concept.name.clone(), count as f64 * concept.weight))
            })
            .collect()
    }

    /// Lowercased names of concepts with at least one match.
    #[must_use]
    pub fn extract_medical_terms(&self, text: &str) -> BTreeSet<String> {
        self.concepts
            .iter()
            .filter(|concept| concept.forms.iter().any(|f| f.pattern.is_match(text)))
            .map(|concept| concept.name.to_lowercase())
            .collect()
    }

    /// Byte offset of the earliest match of any surface form.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<usize> {
        self.concepts
            .iter()
            .flat_map(|concept| concept.forms.iter())
            .filter_map(|f| f.pattern.find(text).map(|m| m.start()))
            .min()
    }

    /// Match details for every concept that matched.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn explain(&self, text: &str) -> Vec<ConceptExplanation> {
        self.concepts
            .iter()
            .filter_map(|concept| {
                let matched_forms: BTreeMap<String, usize> = concept
                    .forms
                    .iter()
                    .filter_map(|f| {
                        let n = f.pattern.find_iter(text).count();
                        (n > 0).then(|| (f.form.clone(), n))
                    })
                    .collect();
                if matched_forms.is_empty() {
                    return None;
                }
                let occurrences = matched_forms.values().sum::<usize>();
                Some(ConceptExplanation {
                    name: concept.name.clone(),
                    tier: concept.tier,
                    weight: concept.weight,
                    occurrences,
                    hit: occurrences as f64 * concept.weight,
                    matched_forms,
                })
            })
            .collect()
    }
}

/// Builds the pattern source for a literal surface form.
///
/// All regex metacharacters are escaped; matching is case-insensitive.
#[must_use]
pub fn surface_pattern(form: &str) -> String {
    let form = form.trim();
    let lead = if form.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trail = if form.chars().next_back().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("(?i){lead}{}{trail}", regex::escape(form))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
