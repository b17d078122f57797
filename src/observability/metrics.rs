//! Prometheus metrics.
//!
//! The CLI commands and gate record through the `metrics` facade; without an
//! installed recorder those calls are no-ops. When enabled, a Prometheus
//! recorder collects them and the rendered text is written to a snapshot
//! file at shutdown.
//!
//! | Metric | Kind | Labels |
//! |--------|------|--------|
//! | `medscan_documents_analyzed_total` | counter | |
//! | `medscan_noise_documents_total` | counter | |
//! | `medscan_confidence` | histogram | |
//! | `medscan_records_rejected_total` | counter | `reason` |
//! | `medscan_duplicates_skipped_total` | counter | |

use crate::config::MetricsSettings;
use crate::detection::AnalysisResult;
use crate::{Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::path::{Path, PathBuf};

/// Metrics configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,
    /// Snapshot file written on shutdown.
    pub snapshot_path: Option<PathBuf>,
}

impl MetricsConfig {
    /// Builds metrics configuration from config settings.
    #[must_use]
    pub fn from_settings(settings: Option<&MetricsSettings>) -> Self {
        Self {
            enabled: settings.and_then(|s| s.enabled).unwrap_or(false),
            snapshot_path: settings.and_then(|s| s.snapshot_path.clone()),
        }
    }
}

/// Installed recorder plus where to write its snapshot.
#[derive(Debug)]
pub struct MetricsHandle {
    prometheus: PrometheusHandle,
    snapshot_path: Option<PathBuf>,
}

impl MetricsHandle {
    /// Renders current metrics in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        self.prometheus.render()
    }
}

/// Installs the global Prometheus recorder if enabled.
///
/// # Errors
///
/// Returns an error if a global recorder is already installed.
pub fn install_prometheus(config: &MetricsConfig) -> Result<Option<MetricsHandle>> {
    if !config.enabled {
        return Ok(None);
    }

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::operation("metrics_recorder_install", e))?;

    Ok(Some(MetricsHandle {
        prometheus,
        snapshot_path: config.snapshot_path.clone(),
    }))
}

/// Counts one analyzed document and records its confidence.
pub fn record_analysis(result: &AnalysisResult) {
    metrics::counter!("medscan_documents_analyzed_total").increment(1);
    metrics::histogram!("medscan_confidence").record(result.confidence);
    if result.is_noise {
        metrics::counter!("medscan_noise_documents_total").increment(1);
    }
}

/// Writes the snapshot file, if one is configured.
pub fn flush(handle: &MetricsHandle) {
    let Some(path) = &handle.snapshot_path else {
        tracing::debug!("No metrics snapshot path configured, skipping flush");
        return;
    };
    if let Err(e) = write_snapshot(&handle.render(), path) {
        tracing::warn!(error = %e, "Failed to write metrics snapshot");
    }
}

/// Writes rendered metrics to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_snapshot(rendered: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::operation("create_metrics_dir", e))?;
    }
    std::fs::write(path, rendered).map_err(|e| Error::operation("write_metrics_snapshot", e))?;
    tracing::debug!(path = %path.display(), bytes = rendered.len(), "Wrote metrics snapshot");
    Ok(())
}
