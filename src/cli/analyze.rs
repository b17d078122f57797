//! Analyze CLI command.

use super::{OutputFormat, io_error, write_json};
use crate::Result;
use crate::detection::{AnalysisResult, Explanation, MedicalDetector};
use crate::observability::record_analysis;
use std::io::Write;

/// Analyze command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeCommand {
    /// Include per-pattern evidence.
    pub explain: bool,
    /// Report format.
    pub format: OutputFormat,
}

impl AnalyzeCommand {
    /// Creates a new analyze command.
    #[must_use]
    pub const fn new(explain: bool, format: OutputFormat) -> Self {
        Self { explain, format }
    }

    /// Analyzes `text` and writes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn run<W: Write>(
        &self,
        detector: &MedicalDetector,
        text: &str,
        out: &mut W,
    ) -> Result<AnalysisResult> {
        if self.explain {
            let explanation = detector.explain(text);
            record_analysis(&explanation.result);
            match self.format {
                OutputFormat::Json => write_json(out, &explanation)?,
                OutputFormat::Text => write_summary(out, &explanation.result)
                    .and_then(|()| write_evidence(out, &explanation))
                    .map_err(io_error)?,
            }
            return Ok(explanation.result);
        }

        let result = detector.analyze(text);
        record_analysis(&result);
        match self.format {
            OutputFormat::Json => write_json(out, &result)?,
            OutputFormat::Text => write_summary(out, &result).map_err(io_error)?,
        }
        Ok(result)
    }
}

fn write_summary<W: Write>(out: &mut W, result: &AnalysisResult) -> std::io::Result<()> {
    let citations: Vec<&str> = [
        (result.citations.has_doi, "doi"),
        (result.citations.has_pmid, "pmid"),
        (result.citations.has_arxiv, "arxiv"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();
    let terms = result.medical_terms.iter().map(String::as_str).collect::<Vec<_>>();
    let dates = result.dates.iter().map(String::as_str).collect::<Vec<_>>();

    writeln!(out, "doc type:    {}", result.doc_type)?;
    writeln!(out, "confidence:  {:.2}", result.confidence)?;
    writeln!(out, "citations:   {}", or_none(&citations))?;
    writeln!(out, "noise:       {}", if result.is_noise { "yes" } else { "no" })?;
    writeln!(out, "terms:       {}", or_none(&terms))?;
    writeln!(out, "dates:       {}", or_none(&dates))
}

fn write_evidence<W: Write>(out: &mut W, explanation: &Explanation) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "concepts (signal {:.2}):", explanation.signal)?;
    for concept in &explanation.concepts {
        let forms = concept
            .matched_forms
            .iter()
            .map(|(form, n)| format!("{form} x{n}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "  {:<26}{:<14}{:>2} x {:.2} = {:>5.2}  [{forms}]",
            concept.name,
            concept.tier.as_str(),
            concept.occurrences, concept.weight, concept.hit
        )?;
    }

    writeln!(out)?;
    writeln!(out, "doc types:")?;
    for score in &explanation.doc_type_scores {
        let score_text = score
            .score
            .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
        writeln!(
            out,
            "  {:<15}{}/{} matched  score {score_text}",
            score.doc_type.as_str(),
            score.tally,
            score.min_matches
        )?;
    }

    if !explanation.noise_phrases.is_empty() {
        writeln!(out)?;
        writeln!(out, "noise phrases: {}", explanation.noise_phrases.join(", "))?;
    }
    Ok(())
}

fn or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMO: &str = "To: Lab\nFrom: PI\nSubject: rapamycin dosing\n\
        Rapamycin (sirolimus) cohort starts 2024-06-01. See PMID: 1234567.";

    fn detector() -> MedicalDetector {
        MedicalDetector::with_builtin_taxonomy().unwrap()
    }

    #[test]
    fn test_text_summary() {
        let mut out = Vec::new();
        let result = AnalyzeCommand::default()
            .run(&detector(), MEMO, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("doc type:    MEMO_LIKE"));
        assert!(text.contains("citations:   pmid"));
        assert!(text.contains("terms:       rapamycin"));
        assert!(text.contains("dates:       2024-06-01"));
        assert!(result.medical_terms.contains("rapamycin"));
    }

    #[test]
    fn test_json_matches_result() {
        let mut out = Vec::new();
        let result = AnalyzeCommand::new(false, OutputFormat::Json)
            .run(&detector(), MEMO, &mut out)
            .unwrap();
        let parsed: AnalysisResult = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_explain_text_lists_forms() {
        let mut out = Vec::new();
        AnalyzeCommand::new(true, OutputFormat::Text)
            .run(&detector(), MEMO, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("sirolimus x1"));
        assert!(text.contains("MEMO_LIKE"));
    }

    #[test]
    fn test_explain_json_has_sections() {
        let mut out = Vec::new();
        AnalyzeCommand::new(true, OutputFormat::Json)
            .run(&detector(), MEMO, &mut out)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["result"].is_object());
        assert!(value["concepts"].is_array());
        assert_eq!(value["doc_type_scores"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn test_empty_text() {
        let mut out = Vec::new();
        AnalyzeCommand::default().run(&detector(), "", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("terms:       none"));
        assert!(text.contains("confidence:  0.00"));
    }
}
