//! Core library entry for the `lorekeep` CLI.
//!
//! Three maintenance passes over a markdown lore wiki:
//!
//! - [`links`]: report relative links whose targets are missing.
//! - [`related`]: put the canonical links first on every related-line.
//! - [`sweep`]: insert the ground-canon note after each page header.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod links;
pub mod logging;
pub mod markdown;
pub mod pass;
pub mod paths;
pub mod ports;
pub mod related;
pub mod sweep;

use std::process::ExitCode;

use clap::Parser;

pub use error::{LoreError, Result};

/// How a completed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Clean,
    /// Missing links were found or a rewrite failed.
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and count as a clean run.
///
/// # Errors
///
/// Returns [`LoreError::Usage`] when argument parsing fails, or the error of
/// the command that was run.
pub fn run<I, T>(args: I) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(Outcome::Clean);
        }
        Err(err) => return Err(LoreError::Usage(err.to_string())),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::{run, LoreError, Outcome};

    #[test]
    fn run_prints_help_cleanly() {
        assert_eq!(run(["lorekeep", "--help"]).unwrap(), Outcome::Clean);
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["lorekeep", "unknown"]);
        assert!(matches!(result, Err(LoreError::Usage(_))));
    }
}
