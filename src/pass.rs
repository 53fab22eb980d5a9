//! Shared plumbing for passes that rewrite files in place.

use std::io;
use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::ports::TreeListing;

/// A file left out of a pass, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the file or directory entry.
    pub path: PathBuf,
    /// Why it was left out.
    pub reason: String,
}

impl SkippedFile {
    fn new(path: &Path, err: &io::Error) -> Self {
        Self { path: path.to_path_buf(), reason: err.to_string() }
    }
}

/// Outcome of a rewriting pass over a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Files changed (or that would change, in a dry run), in traversal order.
    pub changed: Vec<PathBuf>,
    /// Candidate files that were read.
    pub files_scanned: usize,
    /// Files that could not be read or decoded.
    pub skipped: Vec<SkippedFile>,
    /// Files whose rewrite failed; they keep their previous contents.
    pub failed: Vec<SkippedFile>,
    /// Whether writes were suppressed.
    pub dry_run: bool,
}

impl PassSummary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run, ..Self::default() }
    }

    /// Returns `true` unless a write failed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Renders one `<Verb>: <path>` line per changed file, then the total.
    ///
    /// `verb` is the past participle, capitalized (e.g. `Normalized`).
    #[must_use]
    pub fn render(&self, verb: &str) -> String {
        let mut lines: Vec<String> =
            self.changed.iter().map(|p| format!("{verb}: {}", p.display())).collect();
        let suffix = if self.dry_run { " (dry run)" } else { "" };
        lines.push(format!("Total {}: {}{suffix}", verb.to_lowercase(), self.changed.len()));
        lines.join("\n")
    }
}

/// Returns `true` for file names ending in `.md`.
#[must_use]
pub fn is_md_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.ends_with(".md"))
}

/// Applies `transform` to every `.md` file in `listing`.
///
/// Each file is read as UTF-8 and handed to `transform` with its path. When
/// the transform returns new contents the file is rewritten, unless the
/// summary is a dry run. Files that are not valid UTF-8 are never rewritten.
pub fn rewrite_listing<F>(
    ctx: &ServiceContext,
    listing: TreeListing,
    summary: &mut PassSummary,
    mut transform: F,
) where
    F: FnMut(&Path, &str) -> Option<String>,
{
    for (path, err) in listing.unreadable {
        tracing::warn!(path = %path.display(), error = %err, "skipping unreadable entry");
        summary.skipped.push(SkippedFile::new(&path, &err));
    }

    for path in listing.files.iter().filter(|p| is_md_file(p)) {
        let text = match ctx.fs.read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(path = %path.display(), "skipping file that is not valid UTF-8");
                summary.skipped.push(SkippedFile::new(path, &err));
                continue;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file");
                summary.skipped.push(SkippedFile::new(path, &err));
                continue;
            }
        };
        summary.files_scanned += 1;

        let Some(updated) = transform(path, &text) else {
            continue;
        };
        if summary.dry_run {
            summary.changed.push(path.clone());
            continue;
        }
        match ctx.fs.write(path, &updated) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "rewrote file");
                summary.changed.push(path.clone());
            }
            Err(err) => summary.failed.push(SkippedFile::new(path, &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    fn uppercase_marked(_: &Path, text: &str) -> Option<String> {
        text.starts_with('x').then(|| text.to_uppercase())
    }

    #[test]
    fn rewrites_only_transformed_md_files() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("d/a.md", "xa\n");
        fs.insert("d/b.md", "b\n");
        fs.insert("d/c.txt", "xc\n");
        let ctx = ServiceContext::with_fs(fs.clone());

        let mut summary = PassSummary::new(false);
        rewrite_listing(&ctx, ctx.fs.walk_files(Path::new("d")), &mut summary, uppercase_marked);

        assert_eq!(summary.changed, vec![PathBuf::from("d/a.md")]);
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(fs.contents("d/a.md").as_deref(), Some("XA\n"));
        assert_eq!(fs.contents("d/c.txt").as_deref(), Some("xc\n"));
        assert_eq!(fs.writes(), vec![PathBuf::from("d/a.md")]);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("d/a.md", "xa\n");
        let ctx = ServiceContext::with_fs(fs.clone());

        let mut summary = PassSummary::new(true);
        rewrite_listing(&ctx, ctx.fs.walk_files(Path::new("d")), &mut summary, uppercase_marked);

        assert_eq!(summary.changed.len(), 1);
        assert!(fs.writes().is_empty());
        assert_eq!(summary.render("Updated"), "Updated: d/a.md\nTotal updated: 1 (dry run)");
    }

    #[test]
    fn invalid_utf8_is_skipped_not_rewritten() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("d/a.md", b"x\xff\n".to_vec());
        let ctx = ServiceContext::with_fs(fs.clone());

        let mut summary = PassSummary::new(false);
        rewrite_listing(&ctx, ctx.fs.walk_files(Path::new("d")), &mut summary, uppercase_marked);

        assert!(summary.changed.is_empty());
        assert_eq!(summary.skipped.len(), 1);
        assert!(fs.writes().is_empty());
    }

    #[test]
    fn failed_write_is_recorded_and_pass_continues() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("d/a.md", "xa\n");
        fs.insert("d/b.md", "xb\n");
        fs.set_read_only("d/a.md");
        let ctx = ServiceContext::with_fs(fs.clone());

        let mut summary = PassSummary::new(false);
        rewrite_listing(&ctx, ctx.fs.walk_files(Path::new("d")), &mut summary, uppercase_marked);

        assert!(!summary.succeeded());
        assert_eq!(summary.failed[0].path, PathBuf::from("d/a.md"));
        assert_eq!(summary.changed, vec![PathBuf::from("d/b.md")]);
        assert_eq!(fs.contents("d/a.md").as_deref(), Some("xa\n"));
    }

    #[test]
    fn render_lists_paths_then_total() {
        let summary = PassSummary {
            changed: vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
            ..PassSummary::default()
        };
        assert_eq!(
            summary.render("Normalized"),
            "Normalized: a.md\nNormalized: b.md\nTotal normalized: 2"
        );
    }
}
