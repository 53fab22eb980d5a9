//! `lorekeep ground-sweep` command.

use std::path::Path;

use crate::config::SweepConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::sweep::GroundSweep;
use crate::Outcome;

/// Execute the `ground-sweep` command.
///
/// # Errors
///
/// Never fails; per-file problems are reported through the summary.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &SweepConfig,
    root: Option<&Path>,
    dry_run: bool,
) -> Result<Outcome> {
    let root = root.unwrap_or(config.root.as_path());
    let summary = GroundSweep::new(ctx, config).run(root, dry_run);

    println!("{}", summary.render("Updated"));
    Ok(super::report_failures(&summary))
}
