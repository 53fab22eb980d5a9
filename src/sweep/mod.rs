//! Ground-canon note sweep.
//!
//! Inserts a fixed note after the first top-level header of every page in a
//! set of subdirectories, unless the page already mentions the marker.

use std::path::Path;

use crate::config::SweepConfig;
use crate::context::ServiceContext;
use crate::pass::{rewrite_listing, PassSummary};

/// Returns `text` with `note` inserted, or `None` if nothing changes.
///
/// The note goes right after the first line whose trimmed form starts with
/// `# `, or after the blank line that immediately follows it. Existing line
/// endings are preserved and the note reuses the header's ending. Pages
/// containing `marker` anywhere, or without a top-level header, are left as
/// they are.
#[must_use]
pub fn inject_note(text: &str, marker: &str, note: &str) -> Option<String> {
    if text.contains(marker) {
        return None;
    }
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let header = lines.iter().position(|l| l.trim().starts_with("# "))?;

    let mut insert_at = header + 1;
    if lines.get(insert_at).is_some_and(|l| l.trim().is_empty()) {
        insert_at += 1;
    }
    let eol = if lines[header].ends_with("\r\n") { "\r\n" } else { "\n" };

    let mut out = String::with_capacity(text.len() + note.len() + 2);
    for (i, line) in lines.iter().enumerate() {
        if i == insert_at {
            out.push_str(note);
            out.push_str(eol);
        }
        out.push_str(line);
    }
    if insert_at == lines.len() {
        if !out.ends_with('\n') {
            out.push_str(eol);
        }
        out.push_str(note);
        out.push_str(eol);
    }
    Some(out)
}

/// Adds the ground-canon note to pages under the configured directories.
pub struct GroundSweep<'a> {
    ctx: &'a ServiceContext,
    config: &'a SweepConfig,
}

impl<'a> GroundSweep<'a> {
    /// Creates a sweep using the given context and settings.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a SweepConfig) -> Self {
        Self { ctx, config }
    }

    /// Sweeps each configured subdirectory of `root` in order.
    ///
    /// A missing root yields an empty summary; missing subdirectories are
    /// skipped.
    #[must_use]
    pub fn run(&self, root: &Path, dry_run: bool) -> PassSummary {
        let mut summary = PassSummary::new(dry_run);
        if !self.ctx.fs.is_dir(root) {
            tracing::warn!(path = %root.display(), "root directory not found, nothing to sweep");
            return summary;
        }
        for dir in &self.config.directories {
            let base = root.join(dir);
            if !self.ctx.fs.is_dir(&base) {
                tracing::debug!(path = %base.display(), "sweep directory absent, skipping");
                continue;
            }
            let listing = self.ctx.fs.walk_files(&base);
            rewrite_listing(self.ctx, listing, &mut summary, |_, text| {
                inject_note(text, &self.config.marker, &self.config.note)
            });
        }
        summary
    }
}
