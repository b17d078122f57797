//! Citation and date detection.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use super::types::CitationSignals;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static DOI_BARE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"10\.[0-9]{4,}/\S+").expect("static regex: bare DOI"));

static DOI_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://doi\.org/\S+").expect("static regex: DOI URL"));

static PMID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)PMID:\s*[0-9]+|PubMed ID:\s*[0-9]+|pubmed\.ncbi\.nlm\.nih\.gov/[0-9]+")
        .expect("static regex: PMID")
});

static ARXIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)arxiv\.org/abs/[0-9]+\.[0-9]+|arXiv:[0-9]+\.[0-9]+")
        .expect("static regex: arXiv")
});

static ISO_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[0-9]{4}-[0-9]{2}-[0-9]{2}\b").expect("static regex: ISO date")
});

/// Detects which citation identifier families occur in `text`.
///
/// Presence only: each family stops at its first match.
#[must_use]
pub fn detect_citations(text: &str) -> CitationSignals {
    CitationSignals {
        has_doi: DOI_BARE_REGEX.is_match(text) || DOI_URL_REGEX.is_match(text),
        has_pmid: PMID_REGEX.is_match(text),
        has_arxiv: ARXIV_REGEX.is_match(text),
    }
}

/// Extracts distinct `YYYY-MM-DD` tokens.
///
/// Free-form dates ("March 3, 2018") are not recognised, and tokens are not
/// checked against the calendar.
#[must_use]
pub fn extract_dates(text: &str) -> BTreeSet<String> {
    ISO_DATE_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
