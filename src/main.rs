//! Binary entry point for medscan.
//!
//! This binary provides the CLI interface for medical relevance detection.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use medscan::cli::{
    AnalyzeCommand, ConfigCommand, OutputFormat, ScanCommand, ScanSummary, StatsCommand,
    TaxonomyCommand, ValidateCommand, build_detector, read_input,
};
use medscan::config::{MedscanConfig, clamp_unit};
use medscan::io::{Format, write_records};
use medscan::observability::{self, ObservabilityConfig};
use medscan::taxonomy::{Taxonomy, Tier};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Medscan - medical relevance detection for longevity research discovery.
#[derive(Parser)]
#[command(name = "medscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze one document.
    Analyze {
        /// Document to analyze; stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Show per-concept and per-archetype evidence.
        #[arg(long)]
        explain: bool,

        /// Report format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Analyze every text file under a directory and emit accepted records.
    Scan {
        /// Directory to scan.
        dir: PathBuf,

        /// Worker threads (defaults to available parallelism).
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Source label for every record (defaults to the directory name).
        #[arg(short, long)]
        source: Option<String>,

        /// File extensions to include (comma-separated).
        #[arg(long, value_delimiter = ',', default_value = "txt,md,text")]
        ext: Vec<String>,

        /// Minimum confidence for acceptance (overrides configuration).
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Keep documents flagged as noise.
        #[arg(long)]
        keep_noise: bool,

        /// Write records here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Record format: json, ndjson or csv (defaults to the output extension).
        #[arg(short, long)]
        format: Option<Format>,
    },

    /// Validate a JSON or NDJSON record file.
    Validate {
        /// Record file; stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Write the normalized records here.
        #[arg(long)]
        normalized: Option<PathBuf>,

        /// Report format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Summarize a JSON or NDJSON record file.
    Stats {
        /// Record file; stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Report format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List the concept taxonomy.
    Taxonomy {
        /// Only list this tier: primary, secondary or intervention.
        #[arg(short, long, value_parser = parse_tier)]
        tier: Option<Tier>,

        /// Report format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show the resolved configuration.
    Config,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match MedscanConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let _observability = match observability::init(ObservabilityConfig::from_config(
        &config,
        cli.verbose,
    )) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn run_command(command: Commands, config: &MedscanConfig) -> Result<ExitCode> {
    match command {
        Commands::Analyze {
            input,
            explain,
            format,
        } => cmd_analyze(config, input, explain, format),

        Commands::Scan {
            dir,
            jobs,
            source,
            ext,
            min_confidence,
            keep_noise,
            output,
            format,
        } => {
            let mut command = ScanCommand {
                source,
                extensions: ext
                    .iter()
                    .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                    .collect(),
                policy: config.acceptance,
                snippet_length: config.snippet_length,
                ..ScanCommand::default()
            };
            if let Some(jobs) = jobs {
                command.jobs = jobs.max(1);
            }
            if let Some(min) = min_confidence {
                command.policy.min_confidence = clamp_unit(min);
            }
            if keep_noise {
                command.policy.drop_noise = false;
            }
            cmd_scan(config, &command, &dir, output, format)
        },

        Commands::Validate {
            input,
            normalized,
            format,
        } => cmd_validate(input, normalized, format),

        Commands::Stats { input, format } => {
            let reader = open_reader(input.as_deref())?;
            StatsCommand::new(format).run(reader, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        },

        Commands::Taxonomy { tier, format } => {
            let taxonomy = match &config.taxonomy_path {
                Some(path) => Taxonomy::load_from_file(path)?,
                None => Taxonomy::builtin(),
            };
            TaxonomyCommand::new(tier, format).run(&taxonomy, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        },

        Commands::Config => {
            ConfigCommand::new().run(config, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn cmd_analyze(
    config: &MedscanConfig,
    input: Option<PathBuf>,
    explain: bool,
    format: OutputFormat,
) -> Result<ExitCode> {
    let detector = build_detector(config)?;
    let text = read_input(input.as_deref())?;
    AnalyzeCommand::new(explain, format).run(&detector, &text, &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_scan(
    config: &MedscanConfig,
    command: &ScanCommand,
    dir: &Path,
    output: Option<PathBuf>,
    format: Option<Format>,
) -> Result<ExitCode> {
    let detector = build_detector(config)?;
    let outcome = command
        .run(&detector, dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    match output {
        Some(path) => {
            let format = match format {
                Some(format) => format,
                None => Format::from_path(&path)?,
            };
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_records(BufWriter::new(file), &outcome.records, format)?;
            eprintln!("Wrote {} records to {}", outcome.records.len(), path.display());
        },
        None => {
            write_records(io::stdout().lock(), &outcome.records, format.unwrap_or_default())?;
        },
    }
    print_scan_summary(&outcome.summary);
    Ok(ExitCode::SUCCESS)
}

fn cmd_validate(
    input: Option<PathBuf>,
    normalized: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let reader = open_reader(input.as_deref())?;
    let report = ValidateCommand::new(format).run(reader, &mut io::stdout().lock())?;

    if let Some(path) = normalized {
        let format = Format::from_path(&path).unwrap_or_default();
        let file =
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_records(BufWriter::new(file), &report.normalized, format)?;
        eprintln!(
            "Wrote {} normalized records to {}",
            report.normalized.len(),
            path.display()
        );
    }

    Ok(if report.all_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_scan_summary(summary: &ScanSummary) {
    let rejected: usize = summary.rejected.values().sum();
    eprintln!(
        "Scanned {} files: {} accepted, {} rejected, {} duplicates, {} unreadable",
        summary.files_found, summary.accepted, rejected, summary.duplicates, summary.unreadable
    );
    for (reason, count) in &summary.rejected {
        eprintln!("  {reason}: {count}");
    }
}

fn open_reader(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        },
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn parse_tier(value: &str) -> Result<Tier, String> {
    Tier::parse(value).ok_or_else(|| {
        format!("unknown tier '{value}' (expected primary, secondary or intervention)")
    })
}
