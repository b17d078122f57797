//! Validate CLI command.

use super::{OutputFormat, io_error, write_json};
use crate::Result;
use crate::discovery::{DiscoveredFile, ValidationResult, normalize_file, validate_file};
use crate::io::load_candidates;
use serde::Serialize;
use std::io::{BufRead, Write};

/// Validate command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateCommand {
    /// Report format.
    pub format: OutputFormat,
}

/// Issues found in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    /// Zero-based position in the input.
    pub index: usize,
    /// Validation outcome.
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Outcome of validating a record file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Records read.
    pub total: usize,
    /// Records without errors.
    pub valid: usize,
    /// Records with at least one error.
    pub invalid: usize,
    /// Warnings across all records.
    pub warnings: usize,
    /// Records with errors or warnings.
    pub records: Vec<RecordReport>,
    /// Records that survived normalization, in input order.
    #[serde(skip)]
    pub normalized: Vec<DiscoveredFile>,
}

impl ValidationReport {
    /// Whether every record passed strict validation.
    #[must_use]
    pub const fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

impl ValidateCommand {
    /// Creates a new validate command.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Validates every candidate in `reader` and writes the report.
    ///
    /// Each candidate is also normalized; the report carries the survivors
    /// so the caller can write a repaired file.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not JSON or NDJSON, or if writing
    /// fails. Invalid records are reported, not returned as errors.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, out: &mut W) -> Result<ValidationReport> {
        let candidates = load_candidates(reader)?;
        let mut report = ValidationReport {
            total: candidates.len(),
            ..ValidationReport::default()
        };

        for (index, candidate) in candidates.iter().enumerate() {
            let result = validate_file(candidate);
            if result.valid {
                report.valid += 1;
            } else {
                report.invalid += 1;
            }
            report.warnings += result.warnings.len();
            if let Some(file) = normalize_file(candidate) {
                report.normalized.push(file);
            }
            if !result.errors.is_empty() || !result.warnings.is_empty() {
                report.records.push(RecordReport { index, result });
            }
        }

        tracing::info!(
            total = report.total,
            valid = report.valid,
            invalid = report.invalid,
            "Validated records"
        );

        match self.format {
            OutputFormat::Json => write_json(out, &report)?,
            OutputFormat::Text => write_text(out, &report).map_err(io_error)?,
        }
        Ok(report)
    }
}

fn write_text<W: Write>(out: &mut W, report: &ValidationReport) -> std::io::Result<()> {
    for record in &report.records {
        for issue in &record.result.errors {
            writeln!(out, "record {}: ERROR {issue}", record.index)?;
        }
        for issue in &record.result.warnings {
            writeln!(out, "record {}: WARN  {issue}", record.index)?;
        }
    }
    writeln!(
        out,
        "{} records: {} valid, {} invalid, {} warnings",
        report.total, report.valid, report.invalid, report.warnings
    )
}
