//! CLI command implementations.
//!
//! - `session`: Run reservation requests against a fresh inventory
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod session;
pub mod validate;

pub use completions::CompletionsCommand;
pub use session::{FormatArg, SessionCommand};
pub use validate::ValidateCommand;
