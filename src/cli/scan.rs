//! Scan CLI command.
//!
//! Walks a directory, analyzes every matching text file on a rayon pool
//! sharing one detector, skips byte-identical duplicates
//! (after whitespace and case normalization), gates each analysis and builds
//! a [`DiscoveredFile`] for every accepted document.

use crate::detection::{AnalysisResult, MedicalDetector};
use crate::discovery::{
    AcceptancePolicy, DiscoveredFile, GateDecision, Provenance, extract_snippet, fingerprint,
};
use crate::observability::record_analysis;
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::thread;

/// Extensions scanned when none are given.
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md", "text"];

/// Longest title taken from a document's first line.
const MAX_TITLE_CHARS: usize = 120;

/// Scan command handler.
#[derive(Debug, Clone)]
pub struct ScanCommand {
    /// Worker threads.
    pub jobs: usize,
    /// Source label; defaults to the scanned directory's name.
    pub source: Option<String>,
    /// Lowercase file extensions to include.
    pub extensions: Vec<String>,
    /// Gate thresholds.
    pub policy: AcceptancePolicy,
    /// Snippet length in characters.
    pub snippet_length: usize,
}

/// Counters for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Files found under the directory.
    pub files_found: usize,
    /// Files that could not be read.
    pub unreadable: usize,
    /// Files skipped as duplicates of an earlier file.
    pub duplicates: usize,
    /// Files analyzed.
    pub analyzed: usize,
    /// Records accepted.
    pub accepted: usize,
    /// Rejections per reason.
    pub rejected: BTreeMap<String, usize>,
}

/// Accepted records plus counters.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Accepted records, ordered by path.
    pub records: Vec<DiscoveredFile>,
    /// Scan counters.
    pub summary: ScanSummary,
}

struct Document {
    path: PathBuf,
    text: String,
    modified: Option<String>,
}

impl Default for ScanCommand {
    fn default() -> Self {
        Self {
            jobs: thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
            source: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            policy: AcceptancePolicy::default(),
            snippet_length: crate::config::DEFAULT_SNIPPET_LENGTH,
        }
    }
}

impl ScanCommand {
    /// Scans `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be listed or the worker pool cannot
    /// be started. Unreadable files are counted and skipped.
    pub fn run(&self, detector: &MedicalDetector, dir: &Path) -> Result<ScanOutcome> {
        let files = collect_files(dir, &self.extensions)?;
        let mut summary = ScanSummary {
            files_found: files.len(),
            ..ScanSummary::default()
        };

        let mut seen = HashSet::new();
        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                    summary.unreadable += 1;
                    continue;
                },
            };
            let text = String::from_utf8_lossy(&bytes).into_owned();
            if !seen.insert(fingerprint(&text)) {
                tracing::debug!(path = %path.display(), "Skipping duplicate");
                metrics::counter!("medscan_duplicates_skipped_total").increment(1);
                summary.duplicates += 1;
                continue;
            }
            let modified = std::fs::metadata(&path)
                .and_then(|m| m.modified())
                .ok()
                .map(|t| DateTime::<Utc>::from(t).to_rfc3339_opts(SecondsFormat::Secs, true));
            documents.push(Document {
                path,
                text,
                modified,
            });
        }

        let analyses = analyze_parallel(detector, &documents, self.jobs)?;
        summary.analyzed = analyses.len();

        let source = self.source.clone().unwrap_or_else(|| source_label(dir));
        let mut records = Vec::new();
        for (document, analysis) in &analyses {
            record_analysis(analysis);
            match self.policy.evaluate(analysis) {
                GateDecision::Accept => {
                    records.push(self.build_record(detector, document, analysis, &source));
                },
                GateDecision::Reject(reason) => {
                    tracing::debug!(path = %document.path.display(), %reason, "Rejected document");
                    *summary.rejected.entry(reason.as_str().to_string()).or_default() += 1;
                },
            }
        }
        summary.accepted = records.len();

        tracing::info!(
            found = summary.files_found,
            analyzed = summary.analyzed,
            accepted = summary.accepted,
            duplicates = summary.duplicates,
            "Scan complete"
        );
        Ok(ScanOutcome { records, summary })
    }

    fn build_record(
        &self,
        detector: &MedicalDetector,
        document: &Document,
        analysis: &AnalysisResult,
        source: &str,
    ) -> DiscoveredFile {
        let url = std::fs::canonicalize(&document.path)
            .unwrap_or_else(|_| document.path.clone());
        let mut provenance = Provenance::new(
            format!("file://{}", url.display()),
            source,
            title_of(&document.text, &document.path),
        );
        if let Some(modified) = &document.modified {
            provenance = provenance.with_timestamp(modified.clone());
        }
        let snippet = extract_snippet(
            &document.text,
            detector.first_match(&document.text),
            self.snippet_length,
        );
        DiscoveredFile::from_analysis(provenance, analysis, snippet)
    }
}

/// Analyzes documents on a pool of `jobs` threads, pairing each document
/// with its own analysis in path order.
fn analyze_parallel<'a>(
    detector: &MedicalDetector,
    documents: &'a [Document],
    jobs: usize,
) -> Result<Vec<(&'a Document, AnalysisResult)>> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .thread_name(|i| format!("medscan-scan-{i}"))
        .build()
        .map_err(|e| Error::operation("thread_pool", e))?;

    Ok(pool.install(|| {
        documents
            .par_iter()
            .map(|document| (document, detector.analyze(&document.text)))
            .collect()
    }))
}

/// Lists files under `dir` with one of `extensions`, recursively and sorted.
///
/// Hidden entries (names starting with `.`) and symlinks are skipped.
///
/// # Errors
///
/// Returns an error if a directory cannot be listed.
pub fn collect_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current)
            .map_err(|e| Error::operation("read_dir", format!("{}: {e}", current.display())))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::operation("read_dir", e))?;
            let path = entry.path();
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let file_type = entry.file_type().map_err(|e| Error::operation("read_dir", e))?;
            if file_type.is_symlink() {
                tracing::debug!(path = %path.display(), "Skipping symlink");
                continue;
            }
            if file_type.is_dir() {
                pending.push(path);
            } else if has_extension(&path, extensions) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

fn title_of(text: &str, path: &Path) -> String {
    text.lines()
        .map(|line| line.trim().trim_start_matches('#').trim())
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(MAX_TITLE_CHARS).collect())
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default()
}

fn source_label(dir: &Path) -> String {
    std::fs::canonicalize(dir)
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map_or_else(|| "local".to_string(), |n| n.to_string_lossy().into_owned())
}
