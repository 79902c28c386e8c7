//! Utility functions for CLI operations.
//!
//! Global options shared by every command and configuration loading.

use crate::error::CliError;
use std::path::PathBuf;
use tablebook::{Config, ConfigBuilder};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. The `--config` file
/// 3. Discovered configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref path) = global.config {
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        builder = builder.with_config_file(path);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}
