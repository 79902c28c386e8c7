//! Environment variable handling for configuration overrides.
//!
//! Supported variables:
//! - `TABLEBOOK_TABLE_COUNT`
//! - `TABLEBOOK_MAX_ALLOWED_PERCENTAGE` (requires a table count from any source)
//! - `TABLEBOOK_BOOKING_PREFIX`
//! - `TABLEBOOK_OUTPUT_FORMAT` (`json` or `text`)

use std::env;

use crate::config::schema::{Config, TableConfig};
use crate::error::{Error, Result};

/// Handles `TABLEBOOK_*` environment overrides.
///
/// # Examples
///
/// ```no_run
/// use tablebook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies environment overrides to `config`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a variable holds an unparseable value,
    /// or if a percentage is given without any table count.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(count) = env::var("TABLEBOOK_TABLE_COUNT") {
            let count: u32 = count.trim().parse().map_err(|_| Error::Validation {
                field: "TABLEBOOK_TABLE_COUNT".into(),
                message: "Must be a positive integer".into(),
            })?;
            match &mut config.tables {
                Some(tables) => tables.count = count,
                None => {
                    config.tables = Some(TableConfig {
                        count,
                        max_allowed_percentage: None,
                    });
                }
            }
        }

        if let Ok(percentage) = env::var("TABLEBOOK_MAX_ALLOWED_PERCENTAGE") {
            let percentage: f64 = percentage.trim().parse().map_err(|_| Error::Validation {
                field: "TABLEBOOK_MAX_ALLOWED_PERCENTAGE".into(),
                message: "Must be a number".into(),
            })?;
            let tables = config.tables.as_mut().ok_or_else(|| Error::Validation {
                field: "TABLEBOOK_MAX_ALLOWED_PERCENTAGE".into(),
                message: "Requires a table count (TABLEBOOK_TABLE_COUNT or tables.count)".into(),
            })?;
            tables.max_allowed_percentage = Some(percentage);
        }

        if let Ok(prefix) = env::var("TABLEBOOK_BOOKING_PREFIX") {
            config.booking_prefix = Some(prefix);
        }

        if let Ok(format) = env::var("TABLEBOOK_OUTPUT_FORMAT") {
            config.output_format = Some(format.parse().map_err(|message| Error::Validation {
                field: "TABLEBOOK_OUTPUT_FORMAT".into(),
                message,
            })?);
        }

        Ok(())
    }
}
