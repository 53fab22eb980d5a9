//! `lorekeep normalize-related` command.

use std::path::Path;

use crate::config::RelatedConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::related::RelatedLinkNormalizer;
use crate::Outcome;

/// Execute the `normalize-related` command.
///
/// Prints each normalized path followed by the total. Files whose rewrite
/// failed are listed on stderr and make the command fail.
///
/// # Errors
///
/// Never fails; per-file problems are reported through the summary.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &RelatedConfig,
    root: Option<&Path>,
    dry_run: bool,
) -> Result<Outcome> {
    let root = root.unwrap_or(config.root.as_path());
    let summary = RelatedLinkNormalizer::new(ctx, config).run(root, dry_run);

    println!("{}", summary.render("Normalized"));
    Ok(super::report_failures(&summary))
}
