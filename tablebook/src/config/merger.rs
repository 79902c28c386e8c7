//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigMerger};
///
/// let mut result = Config { booking_prefix: Some("LOW".into()), ..Default::default() };
/// let high = Config { booking_prefix: Some("HIGH".into()), ..Default::default() };
///
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.booking_prefix.as_deref(), Some("HIGH"));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources ordered from lowest to highest precedence on top of
    /// `base`.
    #[must_use]
    pub fn merge(base: Config, sources: &[ConfigSource]) -> Config {
        let mut result = base;
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merges `source` into `target`; values present in `source` win.
    ///
    /// `tables` merges field by field: a count always replaces the target's,
    /// a percentage only when present.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if let Some(source_tables) = &source.tables {
            match &mut target.tables {
                Some(tables) => {
                    tables.count = source_tables.count;
                    if source_tables.max_allowed_percentage.is_some() {
                        tables.max_allowed_percentage = source_tables.max_allowed_percentage;
                    }
                }
                None => target.tables = Some(source_tables.clone()),
            }
        }

        if source.booking_prefix.is_some() {
            target.booking_prefix.clone_from(&source.booking_prefix);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
