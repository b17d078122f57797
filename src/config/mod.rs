//! Configuration management.
//!
//! Settings come from a TOML file, then `MEDSCAN_*` environment overrides.
//!
//! ```toml
//! taxonomy_path = "taxonomy.toml"
//! snippet_length = 240
//!
//! [acceptance]
//! min_confidence = 0.3
//! drop_noise = true
//! require_terms = true
//!
//! [logging]
//! format = "pretty"   # or "json"
//! level = "info"
//! file = "/var/log/medscan.log"
//!
//! [metrics]
//! enabled = false
//! snapshot_path = "metrics.prom"
//! ```

use crate::discovery::AcceptancePolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "MEDSCAN_CONFIG_PATH";

/// Default snippet length in characters.
pub const DEFAULT_SNIPPET_LENGTH: usize = 240;

/// Main configuration for medscan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedscanConfig {
    /// Taxonomy file replacing the built-in taxonomy.
    pub taxonomy_path: Option<PathBuf>,
    /// Maximum snippet length in characters.
    pub snippet_length: usize,
    /// File this configuration was loaded from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
    /// Acceptance gate thresholds.
    pub acceptance: AcceptancePolicy,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Metrics settings.
    pub metrics: MetricsSettings,
}

/// Logging section in config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Filter directive such as `info` or `medscan=debug`.
    pub level: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Metrics section in config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSettings {
    /// Install the Prometheus recorder.
    pub enabled: Option<bool>,
    /// Write a Prometheus text snapshot here on exit.
    pub snapshot_path: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Taxonomy file path.
    pub taxonomy_path: Option<String>,
    /// Snippet length.
    pub snippet_length: Option<usize>,
    /// Acceptance gate.
    pub acceptance: Option<ConfigFileAcceptance>,
    /// Logging.
    pub logging: Option<LoggingSettings>,
    /// Metrics.
    pub metrics: Option<MetricsSettings>,
}

/// Acceptance section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileAcceptance {
    /// Minimum confidence.
    pub min_confidence: Option<f64>,
    /// Drop noise documents.
    pub drop_noise: Option<bool>,
    /// Require at least one term.
    pub require_terms: Option<bool>,
}

impl Default for MedscanConfig {
    fn default() -> Self {
        Self {
            taxonomy_path: None,
            snippet_length: DEFAULT_SNIPPET_LENGTH,
            source: None,
            acceptance: AcceptancePolicy::default(),
            logging: LoggingSettings::default(),
            metrics: MetricsSettings::default(),
        }
    }
}

impl MedscanConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// A relative `taxonomy_path` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| Error::operation("read_config_file", e))?;
        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| Error::operation("parse_config_file", e))?;

        let mut config = Self::from_config_file(file);
        if let (Some(taxonomy), Some(dir)) = (&config.taxonomy_path, path.parent()) {
            if taxonomy.is_relative() {
                config.taxonomy_path = Some(dir.join(taxonomy));
            }
        }
        config.source = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/medscan/` on macOS)
    /// 2. XDG config dir (`~/.config/medscan/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found or readable.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("medscan").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("medscan")
                .join("config.toml"),
        ];
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring config file");
                },
            }
        }

        Self::default()
    }

    /// Resolves configuration for a run.
    ///
    /// An explicit path wins, then [`CONFIG_PATH_ENV`], then the default
    /// locations. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Converts a `ConfigFile` to `MedscanConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(path) = file.taxonomy_path.filter(|p| !p.trim().is_empty()) {
            config.taxonomy_path = Some(PathBuf::from(path));
        }
        if let Some(length) = file.snippet_length {
            config.snippet_length = length;
        }
        if let Some(acceptance) = file.acceptance {
            if let Some(v) = acceptance.min_confidence {
                config.acceptance.min_confidence = clamp_unit(v);
            }
            if let Some(v) = acceptance.drop_noise {
                config.acceptance.drop_noise = v;
            }
            if let Some(v) = acceptance.require_terms {
                config.acceptance.require_terms = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }
        if let Some(metrics) = file.metrics {
            config.metrics = metrics;
        }

        config
    }

    /// Applies `MEDSCAN_*` overrides read through `lookup`.
    ///
    /// Unparseable values are ignored. `MEDSCAN_MIN_CONFIDENCE` is clamped
    /// to `[0, 1]`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("MEDSCAN_MIN_CONFIDENCE").and_then(|v| v.parse::<f64>().ok()) {
            self.acceptance.min_confidence = clamp_unit(v);
        }
        if let Some(v) = get("MEDSCAN_DROP_NOISE").and_then(|v| parse_bool(&v)) {
            self.acceptance.drop_noise = v;
        }
        if let Some(v) = get("MEDSCAN_TAXONOMY_PATH") {
            self.taxonomy_path = Some(PathBuf::from(v));
        }
        if let Some(v) = get("MEDSCAN_LOG_FORMAT") {
            self.logging.format = Some(v);
        }
        if let Some(v) = get("MEDSCAN_LOG_LEVEL") {
            self.logging.level = Some(v);
        }
        if let Some(v) = get("MEDSCAN_METRICS_ENABLED").and_then(|v| parse_bool(&v)) {
            self.metrics.enabled = Some(v);
        }
        self
    }

    /// Sets the taxonomy path.
    #[must_use]
    pub fn with_taxonomy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.taxonomy_path = Some(path.into());
        self
    }
}

/// Parses `true/1/yes/on` and `false/0/no/off`, case-insensitively.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Clamps a confidence threshold to `[0, 1]`; NaN falls back to the default.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        AcceptancePolicy::default().min_confidence
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MedscanConfig::new();
        assert_eq!(config.snippet_length, 240);
        assert!((config.acceptance.min_confidence - 0.3).abs() < f64::EPSILON);
        assert!(config.acceptance.drop_noise);
        assert!(config.acceptance.require_terms);
        assert!(config.taxonomy_path.is_none());
        assert!(config.metrics.enabled.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
taxonomy_path = "taxonomy.toml"
snippet_length = 120

[acceptance]
min_confidence = 0.5
drop_noise = false

[logging]
format = "json"
level = "debug"

[metrics]
enabled = true
"#,
        )
        .unwrap();

        let config = MedscanConfig::load_from_file(&path).unwrap();
        assert_eq!(config.taxonomy_path, Some(dir.path().join("taxonomy.toml")));
        assert_eq!(config.snippet_length, 120);
        assert!((config.acceptance.min_confidence - 0.5).abs() < f64::EPSILON);
        assert!(!config.acceptance.drop_noise);
        assert!(config.acceptance.require_terms);
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.metrics.enabled, Some(true));
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn test_absolute_taxonomy_path_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "taxonomy_path = \"/etc/medscan/taxonomy.toml\"\n").unwrap();
        let config = MedscanConfig::load_from_file(&path).unwrap();
        assert_eq!(
            config.taxonomy_path,
            Some(PathBuf::from("/etc/medscan/taxonomy.toml"))
        );
    }

    #[test]
    fn test_out_of_range_threshold_clamped() {
        let file: ConfigFile = toml::from_str("[acceptance]\nmin_confidence = 4.0\n").unwrap();
        let config = MedscanConfig::from_config_file(file);
        assert!((config.acceptance.min_confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "snippet_lenght = 10\n").unwrap();
        assert!(MedscanConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(MedscanConfig::load_from_file(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = MedscanConfig::new().with_env_overrides(env(&[
            ("MEDSCAN_MIN_CONFIDENCE", "0.75"),
            ("MEDSCAN_DROP_NOISE", "no"),
            ("MEDSCAN_LOG_FORMAT", "json"),
            ("MEDSCAN_LOG_LEVEL", " warn "),
            ("MEDSCAN_METRICS_ENABLED", "1"),
        ]));
        assert!((config.acceptance.min_confidence - 0.75).abs() < f64::EPSILON);
        assert!(!config.acceptance.drop_noise);
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.logging.level.as_deref(), Some("warn"));
        assert_eq!(config.metrics.enabled, Some(true));
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let config = MedscanConfig::new().with_env_overrides(env(&[
            ("MEDSCAN_MIN_CONFIDENCE", "high"),
            ("MEDSCAN_DROP_NOISE", "maybe"),
            ("MEDSCAN_LOG_LEVEL", "   "),
        ]));
        assert_eq!(config, MedscanConfig::new());
    }

    #[test]
    fn test_env_threshold_clamped() {
        let config =
            MedscanConfig::new().with_env_overrides(env(&[("MEDSCAN_MIN_CONFIDENCE", "-2")]));
        assert!(config.acceptance.min_confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
