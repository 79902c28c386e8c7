//! Configuration system for tablebook.
//!
//! Hierarchical YAML configuration with environment overrides.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`TABLEBOOK_*`)
//! 3. An explicit file (via `ConfigBuilder::with_config_file`)
//! 4. Project config (`tablebook.yaml`, nearest ancestor directory)
//! 5. User config (`~/.tablebook/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use tablebook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/restaurant"))
//!     .build()
//!     .unwrap();
//!
//! if let Some(tables) = &config.tables {
//!     println!("{} tables", tables.count);
//! }
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, TableConfig};
pub use validator::ConfigValidator;
