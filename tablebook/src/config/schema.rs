//! Configuration schema definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::booking::DEFAULT_PREFIX;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, TableConfig};
///
/// let config: Config = serde_yaml::from_str(
///     "tables:\n  count: 100\n  max_allowed_percentage: 0.8\n",
/// )
/// .unwrap();
/// assert_eq!(config.tables.unwrap().count, 100);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tables to initialize when a session starts.
    pub tables: Option<TableConfig>,

    /// Leading word of generated booking ids.
    pub booking_prefix: Option<String>,

    /// How session responses are printed.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the built-in defaults.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            tables: None,
            booking_prefix: Some(DEFAULT_PREFIX.to_string()),
            output_format: Some(OutputFormat::Json),
        }
    }

    /// Returns the booking prefix, falling back to the default.
    #[must_use]
    pub fn booking_prefix(&self) -> &str {
        self.booking_prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    /// Returns the output format, falling back to JSON.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Pre-seeded table inventory.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Number of tables in the restaurant.
    pub count: u32,

    /// Per-reservation cap as a fraction of `count`; absent disables the cap.
    #[serde(alias = "max_reserve_percentage")]
    pub max_allowed_percentage: Option<f64>,
}

/// Output format for session responses.
///
/// # Examples
///
/// ```
/// use tablebook::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Text.to_string(), "text");
/// assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One compact JSON object per response.
    #[default]
    Json,
    /// `<status> key=value ...` lines.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}
