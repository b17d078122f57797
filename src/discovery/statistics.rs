//! Aggregate statistics over discovered files.

use super::record::DiscoveredFile;
use crate::detection::round2;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts and averages over a collection of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscoveryStatistics {
    /// Number of records.
    pub total_files: usize,
    /// Records per source.
    pub by_source: BTreeMap<String, usize>,
    /// Occurrences of each term across all records' `medical_terms_found`.
    pub by_concept: BTreeMap<String, usize>,
    /// Records per document type.
    pub by_doc_type: BTreeMap<String, usize>,
    /// Mean confidence, two decimals; zero for no records.
    pub average_confidence: f64,
    /// Records with at least one citation flag.
    pub files_with_citations: usize,
    /// Records flagged as noise.
    pub noise_files: usize,
}

/// Summarizes `files`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_statistics(files: &[DiscoveredFile]) -> DiscoveryStatistics {
    let mut stats = DiscoveryStatistics {
        total_files: files.len(),
        ..DiscoveryStatistics::default()
    };
    if files.is_empty() {
        return stats;
    }

    let mut confidence_sum = 0.0;
    for file in files {
        *stats.by_source.entry(file.source.clone()).or_default() += 1;
        *stats
            .by_doc_type
            .entry(file.doc_type.as_str().to_string())
            .or_default() += 1;

        for term in &file.medical_terms_found {
            *stats.by_concept.entry(term.clone()).or_default() += 1;
        }

        if file.has_citation() {
            stats.files_with_citations += 1;
        }
        if file.is_noise {
            stats.noise_files += 1;
        }
        confidence_sum += file.confidence;
    }
    stats.average_confidence = round2(confidence_sum / files.len() as f64);
    stats
}
