//! TOML taxonomy files.
//!
//! ```toml
//! [[concept]]
//! name = "autophagy"
//! tier = "primary"
//! aliases = ["autophagy", "autophagic"]
//! co_terms = ["lysosome"]
//! weight = 0.85
//!
//! [[concept]]
//! name = "senolytics"
//! tier = "intervention"
//! aliases = ["senolytic"]
//! examples = ["dasatinib", "quercetin"]
//! weight = 0.85
//! ```

use super::{MedicalConcept, Taxonomy};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyFile {
    #[serde(default, rename = "concept")]
    concepts: Vec<MedicalConcept>,
}

pub(super) fn load(path: &Path) -> Result<Taxonomy> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_taxonomy_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    let taxonomy = parse(&contents)?;
    tracing::debug!(
        path = %path.display(),
        concepts = taxonomy.len(),
        "Loaded taxonomy file"
    );
    Ok(taxonomy)
}

pub(super) fn parse(contents: &str) -> Result<Taxonomy> {
    let file: TaxonomyFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
        operation: "parse_taxonomy_file".to_string(),
        cause: e.to_string(),
    })?;
    if file.concepts.is_empty() {
        return Err(Error::InvalidTaxonomy(
            "taxonomy file defines no [[concept]] tables".to_string(),
        ));
    }
    Taxonomy::new(file.concepts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Tier;
    use std::io::Write;

    const SAMPLE: &str = r#"
[[concept]]
name = "autophagy"
tier = "primary"
aliases = ["autophagy", "autophagic"]
co_terms = ["lysosome"]
weight = 0.85

[[concept]]
name = "senolytics"
tier = "intervention"
aliases = ["senolytic"]
examples = ["dasatinib", "quercetin"]
weight = 0.85
"#;

    #[test]
    fn test_parse_sample() {
        let taxonomy = parse(SAMPLE).unwrap();
        assert_eq!(taxonomy.len(), 2);
        let senolytics = taxonomy.get("senolytics").unwrap();
        assert_eq!(senolytics.tier, Tier::Intervention);
        assert_eq!(senolytics.examples, vec!["dasatinib", "quercetin"]);
        assert!(taxonomy.get("autophagy").unwrap().examples.is_empty());
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let doubled = format!("{SAMPLE}\n[[concept]]\nname = \"autophagy\"\ntier = \"secondary\"\naliases = [\"x\"]\nweight = 0.5\n");
        assert!(matches!(parse(&doubled), Err(Error::InvalidTaxonomy(_))));
    }

    #[test]
    fn test_parse_rejects_empty_file() {
        assert!(matches!(parse(""), Err(Error::InvalidTaxonomy(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_tier() {
        let bad = SAMPLE.replace("\"primary\"", "\"tertiary\"");
        assert!(matches!(parse(&bad), Err(Error::OperationFailed { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let taxonomy = load(file.path()).unwrap();
        assert_eq!(taxonomy.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/taxonomy.toml")).unwrap_err();
        assert!(err.to_string().contains("read_taxonomy_file"));
    }
}
