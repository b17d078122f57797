//! Config CLI command.

use super::io_error;
use crate::config::MedscanConfig;
use crate::{Error, Result};
use std::io::Write;

/// Config command handler.
pub struct ConfigCommand;

impl ConfigCommand {
    /// Creates a new config command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Writes the resolved configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn run<W: Write>(&self, config: &MedscanConfig, out: &mut W) -> Result<()> {
        if let Some(source) = &config.source {
            writeln!(out, "# loaded from {}", source.display()).map_err(io_error)?;
        }
        let rendered =
            toml::to_string_pretty(config).map_err(|e| Error::operation("render_config", e))?;
        out.write_all(rendered.as_bytes()).map_err(io_error)
    }
}

impl Default for ConfigCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_defaults() {
        let mut out = Vec::new();
        ConfigCommand::new().run(&MedscanConfig::new(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("snippet_length = 240"));
        assert!(text.contains("[acceptance]"));
        assert!(text.contains("min_confidence = 0.3"));
        assert!(!text.contains("# loaded from"));
    }

    #[test]
    fn test_names_source() {
        let mut config = MedscanConfig::new();
        config.source = Some("/etc/medscan.toml".into());
        let mut out = Vec::new();
        ConfigCommand::default().run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# loaded from /etc/medscan.toml\n"));
    }
}
