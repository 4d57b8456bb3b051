//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// Precedence for each option is CLI flag > environment variable > config
/// file > default. This struct captures the flag/env layer; config fallbacks
/// are resolved against a loaded [`Config`].
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format override
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.finop/config.yaml)
    pub config: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API host override as `Option<&str>`
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    /// Resolve the output format against config preferences
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or_else(|| match config.preferences.format.as_deref() {
                Some("json") => Some(OutputFormat::Json),
                Some("table") => Some(OutputFormat::Table),
                _ => None,
            })
            .unwrap_or_default()
    }
}
