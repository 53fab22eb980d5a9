//! Command dispatch and handlers.

pub mod check_links;
pub mod ground_sweep;
pub mod normalize_related;

use crate::cli::{Cli, Command};
use crate::config::LoreConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::pass::PassSummary;
use crate::Outcome;

/// Dispatch a parsed command line against the live filesystem.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the selected
/// command fails fatally.
pub fn dispatch(cli: &Cli) -> Result<Outcome> {
    let ctx = ServiceContext::live();
    let config = LoreConfig::load(&ctx, cli.config.as_deref())?;
    dispatch_with_context(&cli.command, &ctx, &config)
}

/// Dispatch a command with the given service context and configuration.
///
/// # Errors
///
/// Returns an error if the selected command fails fatally.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &LoreConfig,
) -> Result<Outcome> {
    match command {
        Command::CheckLinks { root, format } => {
            check_links::run_with_context(ctx, &config.links, root.as_deref(), *format)
        }
        Command::NormalizeRelated { root, dry_run, malformed } => {
            let mut related = config.related.clone();
            if let Some(policy) = malformed {
                related.malformed = *policy;
            }
            normalize_related::run_with_context(ctx, &related, root.as_deref(), *dry_run)
        }
        Command::GroundSweep { root, dry_run } => {
            ground_sweep::run_with_context(ctx, &config.sweep, root.as_deref(), *dry_run)
        }
    }
}

/// Print failed rewrites to stderr and turn them into a failing outcome.
fn report_failures(summary: &PassSummary) -> Outcome {
    for failure in &summary.failed {
        eprintln!("failed to write {}: {}", failure.path.display(), failure.reason);
    }
    if summary.succeeded() {
        Outcome::Clean
    } else {
        Outcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::config::MalformedPolicy;

    #[test]
    fn malformed_flag_overrides_config() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("docs/lore/a.md", "*Related: TBD | [X](x.md)\n");
        let ctx = ServiceContext::with_fs(fs.clone());
        let command = Command::NormalizeRelated {
            root: None,
            dry_run: false,
            malformed: Some(MalformedPolicy::Keep),
        };

        let outcome = dispatch_with_context(&command, &ctx, &LoreConfig::default()).unwrap();

        assert_eq!(outcome, Outcome::Clean);
        assert!(fs.contents("docs/lore/a.md").unwrap().ends_with(" | TBD | [X](x.md)\n"));
    }

    #[test]
    fn check_links_uses_configured_root() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("wiki/a.md", "[gone](gone.md)\n");
        let ctx = ServiceContext::with_fs(fs);
        let mut config = LoreConfig::default();
        config.links.root = Path::new("wiki").to_path_buf();
        let command =
            Command::CheckLinks { root: None, format: crate::cli::ReportFormat::Text };

        let outcome = dispatch_with_context(&command, &ctx, &config).unwrap();

        assert_eq!(outcome, Outcome::Failed);
    }
}
