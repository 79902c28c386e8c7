//! Build script for tablebook-cli.
//!
//! Generates the `tablebook.1` man page into OUT_DIR with clap_mangen.
//!
//! Note: build scripts cannot depend on the crate being built, so the
//! command structure is declared here a second time.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("tablebook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage restaurant table reservations")
        .long_about(
            "Command-line tool that runs table reservation requests against a single restaurant inventory",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file in addition to discovered files")
                .value_name("PATH")
                .global(true)
                .env("TABLEBOOK_CONFIG"),
        )
        .subcommands(vec![
            Command::new("session")
                .about("Run reservation requests against a fresh inventory")
                .long_about(
                    "Read request lines from stdin or --script and print one response per request",
                ),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a tablebook configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("tablebook.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
