//! Stats CLI command.

use super::{OutputFormat, io_error, write_json};
use crate::Result;
use crate::discovery::{DiscoveryStatistics, compute_statistics, normalize_file};
use crate::io::load_candidates;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Stats command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsCommand {
    /// Report format.
    pub format: OutputFormat,
}

impl StatsCommand {
    /// Creates a new stats command.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Normalizes every candidate in `reader`, summarizes the survivors and
    /// writes the summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be parsed or writing fails.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, out: &mut W) -> Result<DiscoveryStatistics> {
        let candidates = load_candidates(reader)?;
        let files: Vec<_> = candidates.iter().filter_map(normalize_file).collect();
        let skipped = candidates.len() - files.len();
        if skipped > 0 {
            tracing::warn!(skipped, "Skipped records that failed normalization");
        }

        let stats = compute_statistics(&files);
        match self.format {
            OutputFormat::Json => write_json(out, &stats)?,
            OutputFormat::Text => write_text(out, &stats, skipped).map_err(io_error)?,
        }
        Ok(stats)
    }
}

fn write_text<W: Write>(
    out: &mut W,
    stats: &DiscoveryStatistics,
    skipped: usize,
) -> std::io::Result<()> {
    writeln!(out, "files:              {}", stats.total_files)?;
    if skipped > 0 {
        writeln!(out, "skipped:            {skipped}")?;
    }
    writeln!(out, "average confidence: {:.2}", stats.average_confidence)?;
    writeln!(out, "with citations:     {}", stats.files_with_citations)?;
    writeln!(out, "noise:              {}", stats.noise_files)?;
    write_counts(out, "by source", &stats.by_source)?;
    write_counts(out, "by doc type", &stats.by_doc_type)?;
    write_counts(out, "by concept", &stats.by_concept)
}

fn write_counts<W: Write>(
    out: &mut W,
    heading: &str,
    counts: &BTreeMap<String, usize>,
) -> std::io::Result<()> {
    if counts.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{heading}:")?;
    let mut rows: Vec<_> = counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (name, count) in rows {
        writeln!(out, "  {name:<28}{count:>6}")?;
    }
    Ok(())
}
