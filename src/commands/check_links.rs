//! `lorekeep check-links` command.

use std::path::{Path, PathBuf};

use crate::cli::ReportFormat;
use crate::config::LinksConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::links::LinkValidator;
use crate::Outcome;

/// Execute the `check-links` command.
///
/// Prints one line per missing link (or a JSON report) and fails when any
/// link is missing. Nothing is written.
///
/// # Errors
///
/// Returns an error if the JSON report cannot be rendered.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &LinksConfig,
    root: Option<&Path>,
    format: ReportFormat,
) -> Result<Outcome> {
    let root = root.unwrap_or(config.root.as_path());
    let report = LinkValidator::new(ctx, config).validate(root);
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match format {
        ReportFormat::Text => println!("{}", report.render_text(&cwd)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json(&cwd))?),
    }

    Ok(if report.is_clean() { Outcome::Clean } else { Outcome::Failed })
}
