//! Taxonomy CLI command.

use super::{OutputFormat, io_error, write_json};
use crate::Result;
use crate::taxonomy::{MedicalConcept, Taxonomy, Tier};
use std::io::Write;

/// Taxonomy command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxonomyCommand {
    /// Only list concepts of this tier.
    pub tier: Option<Tier>,
    /// Report format.
    pub format: OutputFormat,
}

impl TaxonomyCommand {
    /// Creates a new taxonomy command.
    #[must_use]
    pub const fn new(tier: Option<Tier>, format: OutputFormat) -> Self {
        Self { tier, format }
    }

    /// Lists the concepts of `taxonomy`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn run<W: Write>(&self, taxonomy: &Taxonomy, out: &mut W) -> Result<usize> {
        let concepts: Vec<&MedicalConcept> = taxonomy
            .concepts()
            .iter()
            .filter(|c| self.tier.is_none_or(|tier| c.tier == tier))
            .collect();

        match self.format {
            OutputFormat::Json => write_json(out, &concepts)?,
            OutputFormat::Text => write_table(out, &concepts).map_err(io_error)?,
        }
        Ok(concepts.len())
    }
}

fn write_table<W: Write>(out: &mut W, concepts: &[&MedicalConcept]) -> std::io::Result<()> {
    writeln!(out, "{:<26}{:<14}{:>6}  FORMS", "CONCEPT", "TIER", "WEIGHT")?;
    for concept in concepts {
        let forms = concept.surface_forms().collect::<Vec<_>>().join(", ");
        writeln!(
            out,
            "{:<26}{:<14}{:>6.2}  {forms}",
            concept.name,
            concept.tier.as_str(),
            concept.weight
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_concept() {
        let taxonomy = Taxonomy::builtin();
        let mut out = Vec::new();
        let listed = TaxonomyCommand::default().run(&taxonomy, &mut out).unwrap();
        assert_eq!(listed, taxonomy.len());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), taxonomy.len() + 1);
        assert!(text.contains("sirolimus"));
    }

    #[test]
    fn test_tier_filter_json() {
        let taxonomy = Taxonomy::builtin();
        let mut out = Vec::new();
        let listed = TaxonomyCommand::new(Some(Tier::Intervention), OutputFormat::Json)
            .run(&taxonomy, &mut out)
            .unwrap();
        let value: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.len(), listed);
        assert_eq!(listed, taxonomy.by_tier(Tier::Intervention).count());
        assert!(value.iter().all(|c| c["tier"] == "intervention"));
    }
}
