//! Concept taxonomy.
//!
//! A flat, immutable table of weighted medical/longevity concepts. Every
//! concept carries its [`Tier`] as an attribute; tiers do not change the
//! scoring formula, they only group concepts for display and filtering.
//!
//! # Invariants
//!
//! Enforced by [`Taxonomy::new`]:
//!
//! | Rule | Reason |
//! |------|--------|
//! | Concept names unique across all tiers (case-insensitive) | Hits are keyed by name |
//! | At least one non-blank surface form per concept | A concept must be detectable |
//! | `weight` finite and in `(0, 1]` | Hit values must stay positive |
//! | `examples` only on `Intervention` concepts | Examples name concrete interventions |

mod builtin;
mod file;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Concept tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Core hallmarks of aging research.
    Primary,
    /// Supporting physiology and study-design vocabulary.
    Secondary,
    /// Named interventions, scored on aliases plus concrete examples.
    Intervention,
}

impl Tier {
    /// Returns all tiers in table order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Primary, Self::Secondary, Self::Intervention]
    }

    /// Parses a tier name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "intervention" | "interventions" => Some(Self::Intervention),
            _ => None,
        }
    }

    /// Returns the string representation used in serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Intervention => "intervention",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named medical concept with weighted surface forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalConcept {
    /// Unique concept name; used as the key of concept hits.
    pub name: String,
    /// Tier the concept belongs to.
    pub tier: Tier,
    /// Case-insensitive surface forms, matched literally.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Contextual hint terms. Reserved: not consulted when scoring.
    #[serde(default)]
    pub co_terms: Vec<String>,
    /// Concrete named instances (interventions only), scored like aliases.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Per-occurrence weight in `(0, 1]`.
    pub weight: f64,
}

impl MedicalConcept {
    /// Creates a concept with no surface forms.
    #[must_use]
    pub fn new(name: impl Into<String>, tier: Tier, weight: f64) -> Self {
        Self {
            name: name.into(),
            tier,
            aliases: Vec::new(),
            co_terms: Vec::new(),
            examples: Vec::new(),
            weight,
        }
    }

    /// Sets the aliases.
    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(ToString::to_string).collect();
        self
    }

    /// Sets the co-terms.
    #[must_use]
    pub fn with_co_terms(mut self, co_terms: &[&str]) -> Self {
        self.co_terms = co_terms.iter().map(ToString::to_string).collect();
        self
    }

    /// Sets the concrete examples.
    #[must_use]
    pub fn with_examples(mut self, examples: &[&str]) -> Self {
        self.examples = examples.iter().map(ToString::to_string).collect();
        self
    }

    /// Iterates every scored surface form: aliases first, then examples.
    pub fn surface_forms(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .chain(self.examples.iter())
            .map(String::as_str)
    }

    fn check(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidTaxonomy(
                "concept name cannot be empty".to_string(),
            ));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 || self.weight > 1.0 {
            return Err(Error::InvalidTaxonomy(format!(
                "concept '{}' has weight {} outside (0, 1]",
                self.name, self.weight
            )));
        }
        if self.tier != Tier::Intervention && !self.examples.is_empty() {
            return Err(Error::InvalidTaxonomy(format!(
                "concept '{}' is {} but declares examples; only intervention concepts may",
                self.name, self.tier
            )));
        }
        if self.surface_forms().any(|form| form.trim().is_empty()) {
            return Err(Error::InvalidTaxonomy(format!(
                "concept '{}' has a blank alias or example",
                self.name
            )));
        }
        if self.surface_forms().next().is_none() {
            return Err(Error::InvalidTaxonomy(format!(
                "concept '{}' has no aliases",
                self.name
            )));
        }
        Ok(())
    }
}

/// Immutable, validated concept table.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    concepts: Vec<MedicalConcept>,
}

impl Taxonomy {
    /// Builds a taxonomy, checking every invariant listed in the module docs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTaxonomy`] on the first violated invariant.
    pub fn new(concepts: Vec<MedicalConcept>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(concepts.len());
        for concept in &concepts {
            concept.check()?;
            if !seen.insert(concept.name.to_lowercase()) {
                return Err(Error::InvalidTaxonomy(format!(
                    "duplicate concept name '{}'",
                    concept.name
                )));
            }
        }
        Ok(Self { concepts })
    }

    /// Returns the built-in longevity taxonomy.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            concepts: builtin::concepts(),
        }
    }

    /// Loads and validates a taxonomy from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        file::load(path)
    }

    /// Parses and validates a taxonomy from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or fails validation.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        file::parse(contents)
    }

    /// All concepts in table order.
    #[must_use]
    pub fn concepts(&self) -> &[MedicalConcept] {
        &self.concepts
    }

    /// Looks up a concept by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MedicalConcept> {
        self.concepts.iter().find(|c| c.name == name)
    }

    /// Iterates the concepts of one tier.
    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &MedicalConcept> {
        self.concepts.iter().filter(move |c| c.tier == tier)
    }

    /// Number of concepts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Whether the taxonomy has no concepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_builtin_satisfies_invariants() {
        let taxonomy = Taxonomy::new(builtin::concepts());
        assert!(taxonomy.is_ok());
        assert_eq!(taxonomy.unwrap(), Taxonomy::builtin());
    }

    #[test]
    fn test_builtin_has_every_tier() {
        let taxonomy = Taxonomy::builtin();
        for tier in Tier::all() {
            assert!(taxonomy.by_tier(tier).count() > 0, "no {tier} concepts");
        }
        assert!(
            taxonomy
                .by_tier(Tier::Intervention)
                .any(|c| !c.examples.is_empty())
        );
    }

    #[test]
    fn test_duplicate_name_across_tiers_rejected() {
        let concepts = vec![
            MedicalConcept::new("autophagy", Tier::Primary, 0.9).with_aliases(&["autophagy"]),
            MedicalConcept::new("Autophagy", Tier::Intervention, 0.5)
                .with_aliases(&["autophagy inducer"]),
        ];
        let err = Taxonomy::new(concepts).unwrap_err();
        assert!(err.to_string().contains("duplicate concept name"));
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-0.2 ; "negative")]
    #[test_case(1.01 ; "above one")]
    #[test_case(f64::NAN ; "nan")]
    fn test_weight_out_of_range_rejected(weight: f64) {
        let concepts =
            vec![MedicalConcept::new("aging", Tier::Primary, weight).with_aliases(&["aging"])];
        assert!(matches!(
            Taxonomy::new(concepts),
            Err(Error::InvalidTaxonomy(_))
        ));
    }

    #[test]
    fn test_concept_without_aliases_rejected() {
        let concepts = vec![MedicalConcept::new("aging", Tier::Primary, 1.0)];
        assert!(Taxonomy::new(concepts).is_err());
    }

    #[test]
    fn test_blank_alias_rejected() {
        let concepts =
            vec![MedicalConcept::new("aging", Tier::Primary, 1.0).with_aliases(&["aging", "  "])];
        assert!(Taxonomy::new(concepts).is_err());
    }

    #[test]
    fn test_examples_only_on_interventions() {
        let concepts = vec![
            MedicalConcept::new("aging", Tier::Secondary, 1.0)
                .with_aliases(&["aging"])
                .with_examples(&["metformin"]),
        ];
        assert!(Taxonomy::new(concepts).is_err());
    }

    #[test]
    fn test_surface_forms_order() {
        let concept = MedicalConcept::new("senolytics", Tier::Intervention, 0.8)
            .with_aliases(&["senolytic"])
            .with_examples(&["dasatinib", "fisetin"]);
        let forms: Vec<&str> = concept.surface_forms().collect();
        assert_eq!(forms, vec!["senolytic", "dasatinib", "fisetin"]);
    }

    #[test]
    fn test_tier_parse_and_display() {
        assert_eq!(Tier::parse("Primary"), Some(Tier::Primary));
        assert_eq!(Tier::parse(" interventions "), Some(Tier::Intervention));
        assert_eq!(Tier::parse("tertiary"), None);
        assert_eq!(Tier::Secondary.to_string(), "secondary");
    }

    #[test]
    fn test_get_by_name() {
        let taxonomy = Taxonomy::builtin();
        let concept = taxonomy.get("autophagy").unwrap();
        assert_eq!(concept.tier, Tier::Primary);
        assert!(taxonomy.get("astrology").is_none());
    }
}
