//! CLI command implementations.
//!
//! Each submodule implements one command. Commands write their output to a
//! caller-supplied writer; `main` wires them to stdout and files.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Analyze one document from a file or stdin |
//! | `scan` | Analyze a directory tree, gate and deduplicate, emit records |
//! | `validate` | Validate a record file, optionally writing normalized records |
//! | `stats` | Summarize a record file |
//! | `taxonomy` | List the concept taxonomy |
//! | `config` | Show the resolved configuration |
//!
//! # Example Usage
//!
//! ```bash
//! # Explain why a paper scored as it did
//! medscan analyze paper.txt --explain
//!
//! # Scan a corpus with 8 workers into NDJSON
//! medscan scan ./corpus --jobs 8 --output discovered.ndjson
//!
//! # Check a record file written by another crawler
//! medscan validate discovered.json
//! ```

mod analyze;
mod config;
mod scan;
mod stats;
mod taxonomy;
mod validate;

pub use analyze::AnalyzeCommand;
pub use config::ConfigCommand;
pub use scan::{ScanCommand, ScanOutcome, ScanSummary, collect_files};
pub use stats::StatsCommand;
pub use taxonomy::TaxonomyCommand;
pub use validate::{RecordReport, ValidateCommand, ValidationReport};

use crate::config::MedscanConfig;
use crate::detection::MedicalDetector;
use crate::taxonomy::Taxonomy;
use crate::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Output format for command reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Builds a detector from the configured taxonomy, or the built-in one.
///
/// # Errors
///
/// Returns an error if the taxonomy file cannot be loaded or compiled.
pub fn build_detector(config: &MedscanConfig) -> Result<MedicalDetector> {
    let taxonomy = match &config.taxonomy_path {
        Some(path) => Taxonomy::load_from_file(path)?,
        None => Taxonomy::builtin(),
    };
    MedicalDetector::new(taxonomy)
}

/// Reads a whole document from `path`, or stdin when `path` is `None` or `-`.
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let mut bytes = Vec::new();
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            bytes = std::fs::read(path)
                .map_err(|e| Error::operation("read_input", format!("{}: {e}", path.display())))?;
        },
        None => {
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| Error::operation("read_stdin", e))?;
        },
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_json<W: std::io::Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(|e| Error::operation("write_json", e))?;
    writeln!(out).map_err(|e| Error::operation("write_output", e))
}

fn io_error(e: std::io::Error) -> Error {
    Error::operation("write_output", e)
}
