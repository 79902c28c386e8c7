//! Main entry point for the tablebook CLI.
//!
//! This is the command-line interface for the tablebook reservation system.
//! It provides:
//! - `session`: Run reservation requests against a fresh inventory
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

use clap::Parser;
use tablebook_cli::cli::{Cli, Command};
use tablebook_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    tablebook::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Session(cmd) => cmd.execute(&global),
        Command::Validate(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
