//! Configuration validation.

use crate::config::schema::{Config, TableConfig};
use crate::error::{Error, Result};

/// Longest accepted booking prefix.
const MAX_PREFIX_LEN: usize = 32;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref tables) = config.tables {
            Self::validate_tables(tables)?;
        }
        if let Some(ref prefix) = config.booking_prefix {
            Self::validate_prefix(prefix)?;
        }
        Ok(())
    }

    fn validate_tables(tables: &TableConfig) -> Result<()> {
        if tables.count == 0 {
            return Err(Error::Validation {
                field: "tables.count".into(),
                message: "Must be greater than 0".into(),
            });
        }

        if let Some(percentage) = tables.max_allowed_percentage {
            if !(percentage > 0.0 && percentage <= 1.0) {
                return Err(Error::Validation {
                    field: "tables.max_allowed_percentage".into(),
                    message: format!("{percentage} is not in (0, 1]"),
                });
            }
        }

        Ok(())
    }

    fn validate_prefix(prefix: &str) -> Result<()> {
        if prefix.is_empty() {
            return Err(Error::Validation {
                field: "booking_prefix".into(),
                message: "Cannot be empty".into(),
            });
        }
        if prefix.len() > MAX_PREFIX_LEN {
            return Err(Error::Validation {
                field: "booking_prefix".into(),
                message: format!("Cannot exceed {MAX_PREFIX_LEN} characters"),
            });
        }
        if !prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::Validation {
                field: "booking_prefix".into(),
                message: "May only contain ASCII letters, digits, '-' and '_'".into(),
            });
        }
        Ok(())
    }
}
