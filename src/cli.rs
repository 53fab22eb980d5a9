//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::MalformedPolicy;

/// Top-level CLI parser for `lorekeep`.
#[derive(Debug, Parser)]
#[command(name = "lorekeep", version, about = "Maintenance passes for a markdown lore wiki")]
pub struct Cli {
    /// Configuration file (defaults to $LOREKEEP_CONFIG, then ./lorekeep.yaml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Output format for link reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One line per missing link.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report relative links whose targets do not exist.
    CheckLinks {
        /// Directory to walk (defaults to `docs`).
        root: Option<PathBuf>,
        /// How to print the report.
        #[arg(long, value_enum, default_value_t)]
        format: ReportFormat,
    },
    /// Put the canonical links first on every related-line.
    NormalizeRelated {
        /// Directory to walk (defaults to `docs/lore`).
        #[arg(long)]
        root: Option<PathBuf>,
        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,
        /// Treatment of related-line segments that are not links.
        #[arg(long, value_enum)]
        malformed: Option<MalformedPolicy>,
    },
    /// Insert the ground-canon note into pages that lack it.
    GroundSweep {
        /// Lore root holding the swept directories (defaults to `docs/lore`).
        #[arg(long)]
        root: Option<PathBuf>,
        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,
    },
}
