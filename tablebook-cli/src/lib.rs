//! Library exports for tablebook-cli.
//!
//! This module exports the CLI structure and the session protocol so the
//! build script and integration tests can reach them.

pub mod cli;
pub mod commands;
pub mod error;
pub mod protocol;
pub mod utils;

// Re-export CLI for build script
pub use cli::Cli;
