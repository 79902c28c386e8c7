//! Session command implementation.
//!
//! Reads request lines from a script file or stdin, answers each through a
//! fresh inventory and prints one response line per request.

use crate::error::CliError;
use crate::protocol::handle_line;
use crate::utils::{load_configuration, GlobalOptions};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tablebook::config::{Config, OutputFormat};
use tablebook::output::formatter_for;
use tablebook::{Inventory, ReservationPolicy, TimestampedIdSource};

/// Output format choices for `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One compact JSON object per response
    Json,
    /// `<status> key=value ...`
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

/// Run reservation requests against a fresh inventory.
#[derive(Args)]
pub struct SessionCommand {
    /// Read requests from this file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Stop at the first request that does not succeed
    #[arg(long)]
    pub fail_fast: bool,

    /// Do not initialize tables from configuration
    #[arg(long)]
    pub no_preload: bool,
}

impl SessionCommand {
    /// Execute the session command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let format = self.format.map_or_else(|| config.output_format(), OutputFormat::from);

        let reader: Box<dyn BufRead> = match &self.script {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::InvalidArguments(format!(
                        "Script not found: {}",
                        path.display()
                    )));
                }
                Box::new(BufReader::new(File::open(path)?))
            }
            None => Box::new(io::stdin().lock()),
        };

        let inventory = Inventory::new();
        let policy = ReservationPolicy::new(&inventory)
            .with_id_source(TimestampedIdSource::new(config.booking_prefix()));
        if !self.no_preload {
            preload_tables(&policy, &config)?;
        }

        let formatter = formatter_for(format);
        let mut out = io::stdout().lock();
        let mut handled = 0_usize;
        let mut failed = 0_usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let Some(response) = handle_line(&policy, &line) else {
                continue;
            };
            handled += 1;
            writeln!(out, "{}", formatter.format(&response))?;

            if !response.is_success() {
                failed += 1;
                if self.fail_fast {
                    out.flush()?;
                    return Err(CliError::SemanticFailure(format!(
                        "Request on line {} failed with status {}",
                        index + 1,
                        response.status
                    )));
                }
            }
        }

        out.flush()?;
        log::info!(
            "session finished: {handled} request(s), {failed} failed, {} table(s) free",
            inventory.available_count()
        );
        Ok(())
    }
}

/// Initializes the inventory from `tables` in the configuration, if present.
fn preload_tables(policy: &ReservationPolicy<'_>, config: &Config) -> Result<(), CliError> {
    let Some(ref tables) = config.tables else {
        return Ok(());
    };
    let result =
        policy.initialize_tables(Some(i64::from(tables.count)), tables.max_allowed_percentage)?;
    log::info!(
        "preloaded {} table(s), max reserve seats {}",
        result.table_count,
        result.max_reserve_seats
    );
    Ok(())
}
