//! Relative link validation.
//!
//! Walks a documentation root, extracts inline links from every markdown
//! file, and reports relative targets that do not exist on disk. Files are
//! only ever read.

use std::path::{Path, PathBuf};

use crate::config::LinksConfig;
use crate::context::ServiceContext;
use crate::markdown::{extract_links, split_lines};
use crate::pass::SkippedFile;
use crate::paths::{display_relative, normalize, to_slash};

/// A relative link whose target does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// File containing the link.
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// The href exactly as written.
    pub href: String,
    /// Fragment-stripped href joined to the file's directory, normalized.
    pub resolved: PathBuf,
}

impl Finding {
    /// Renders the finding as `path:line: missing -> href (resolved: path)`.
    ///
    /// The resolved path is shown relative to `cwd`.
    #[must_use]
    pub fn render(&self, cwd: &Path) -> String {
        format!(
            "{}:{}: missing -> {} (resolved: {})",
            self.file.display(),
            self.line,
            self.href,
            display_relative(&self.resolved, cwd)
        )
    }
}

/// Result of validating one root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// The root that was walked.
    pub root: PathBuf,
    /// Missing targets in traversal, line and match order.
    pub findings: Vec<Finding>,
    /// Markdown files read.
    pub files_scanned: usize,
    /// Links whose target was tested for existence.
    pub links_checked: usize,
    /// Entries that could not be read.
    pub skipped: Vec<SkippedFile>,
}

impl ValidationReport {
    /// Returns `true` if no missing link was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Renders the report as text, one line per finding or a success line.
    #[must_use]
    pub fn render_text(&self, cwd: &Path) -> String {
        if self.is_clean() {
            return format!("No missing relative links found under {}", self.root.display());
        }
        self.findings.iter().map(|f| f.render(cwd)).collect::<Vec<_>>().join("\n")
    }

    /// Renders the report as a JSON document.
    #[must_use]
    pub fn to_json(&self, cwd: &Path) -> serde_json::Value {
        let findings: Vec<serde_json::Value> = self
            .findings
            .iter()
            .map(|f| {
                serde_json::json!({
                    "file": to_slash(&f.file),
                    "line": f.line,
                    "href": f.href,
                    "resolved": display_relative(&f.resolved, cwd),
                })
            })
            .collect();
        let skipped: Vec<serde_json::Value> = self
            .skipped
            .iter()
            .map(|s| serde_json::json!({"path": to_slash(&s.path), "reason": s.reason}))
            .collect();
        serde_json::json!({
            "root": to_slash(&self.root),
            "ok": self.is_clean(),
            "files_scanned": self.files_scanned,
            "links_checked": self.links_checked,
            "findings": findings,
            "skipped": skipped,
        })
    }
}

/// Checks relative links under a root.
pub struct LinkValidator<'a> {
    ctx: &'a ServiceContext,
    config: &'a LinksConfig,
}

impl<'a> LinkValidator<'a> {
    /// Creates a validator using the given context and settings.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a LinksConfig) -> Self {
        Self { ctx, config }
    }

    /// Returns `true` if the file name ends in a configured markdown extension.
    #[must_use]
    pub fn is_markdown(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        self.config
            .extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext.to_ascii_lowercase())))
    }

    /// Returns the path an href must resolve to, or `None` if it is not checked.
    ///
    /// External schemes, pure anchors and `data:` hrefs are never checked.
    #[must_use]
    pub fn target_of(&self, dir: &Path, href: &str) -> Option<PathBuf> {
        if self.config.skip_prefixes.iter().any(|p| href.starts_with(p.as_str())) {
            return None;
        }
        let path = href.split('#').next().unwrap_or_default();
        if path.trim().is_empty() || path.starts_with("data:") {
            return None;
        }
        Some(normalize(&dir.join(path)))
    }

    /// Walks `root` and returns every missing relative link.
    ///
    /// A missing root yields an empty, clean report. Unreadable files are
    /// recorded in the report and do not fail the run.
    #[must_use]
    pub fn validate(&self, root: &Path) -> ValidationReport {
        let mut report = ValidationReport { root: root.to_path_buf(), ..Default::default() };
        if !self.ctx.fs.is_dir(root) {
            tracing::warn!(path = %root.display(), "root directory not found, nothing to check");
            return report;
        }

        let listing = self.ctx.fs.walk_files(root);

        for (path, err) in listing.unreadable {
            tracing::warn!(path = %path.display(), error = %err, "skipping unreadable entry");
            report.skipped.push(SkippedFile { path, reason: err.to_string() });
        }

        for file in listing.files.iter().filter(|p| self.is_markdown(p)) {
            self.check_file(file, &mut report);
        }

        tracing::debug!(
            files = report.files_scanned,
            links = report.links_checked,
            missing = report.findings.len(),
            "link validation finished"
        );
        report
    }

    fn check_file(&self, file: &Path, report: &mut ValidationReport) {
        let bytes = match self.ctx.fs.read(file) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(path = %file.display(), error = %err, "skipping unreadable file");
                report
                    .skipped
                    .push(SkippedFile { path: file.to_path_buf(), reason: err.to_string() });
                return;
            }
        };
        // Undecodable bytes become U+FFFD; this pass never writes.
        let text = String::from_utf8_lossy(&bytes);
        let dir = file.parent().unwrap_or_else(|| Path::new(""));
        report.files_scanned += 1;

        for (idx, line) in split_lines(&text).into_iter().enumerate() {
            for link in extract_links(line) {
                let Some(target) = self.target_of(dir, &link.href) else {
                    continue;
                };
                report.links_checked += 1;
                if !self.ctx.fs.exists(&target) {
                    report.findings.push(Finding {
                        file: file.to_path_buf(),
                        line: idx + 1,
                        href: link.href,
                        resolved: target,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    fn validate(fs: MemoryFileSystem, root: &str) -> ValidationReport {
        let ctx = ServiceContext::with_fs(Arc::new(fs));
        let config = LinksConfig::default();
        LinkValidator::new(&ctx, &config).validate(Path::new(root))
    }

    #[test]
    fn reports_missing_relative_link() {
        let fs = MemoryFileSystem::new();
        fs.insert("docs/guide.md", "# Guide\n\nSee [missing](./nope.md).\n");
        let report = validate(fs, "docs");

        assert_eq!(
            report.findings,
            vec![Finding {
                file: PathBuf::from("docs/guide.md"),
                line: 3,
                href: "./nope.md".into(),
                resolved: PathBuf::from("docs/nope.md"),
            }]
        );
        assert_eq!(
            report.render_text(Path::new("/work")),
            "docs/guide.md:3: missing -> ./nope.md (resolved: docs/nope.md)"
        );
    }

    #[test]
    fn existing_targets_produce_no_findings() {
        let fs = MemoryFileSystem::new();
        fs.insert("docs/guide.md", "[Up](../README.md) [Here](sub/page.md) [Dir](sub)\n");
        fs.insert("README.md", "");
        fs.insert("docs/sub/page.md", "");
        let report = validate(fs, "docs");
        assert!(report.is_clean());
        assert_eq!(report.links_checked, 3);
        assert_eq!(
            report.render_text(Path::new(".")),
            "No missing relative links found under docs"
        );
    }

    #[test]
    fn external_and_anchor_links_are_never_checked() {
        let fs = MemoryFileSystem::new();
        fs.insert(
            "docs/a.md",
            "[w](http://x/nope) [s](https://x/nope) [a](#nope) \
             [m](mailto:a@b.c) [d](data:text/plain,hi)\n",
        );
        let report = validate(fs, "docs");
        assert!(report.is_clean());
        assert_eq!(report.links_checked, 0);
    }

    #[test]
    fn fragment_is_stripped_before_resolving() {
        let fs = MemoryFileSystem::new();
        fs.insert("docs/a.md", "[p](page.md#section) [q](page.md) [r](gone.md#x)\n");
        fs.insert("docs/page.md", "");
        let report = validate(fs, "docs");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].href, "gone.md#x");
        assert_eq!(report.findings[0].resolved, PathBuf::from("docs/gone.md"));
    }

    #[test]
    fn every_occurrence_is_reported() {
        let fs = MemoryFileSystem::new();
        fs.insert("docs/a.md", "[x](gone.md) and [y](gone.md)\n[z](gone.md)\n");
        let report = validate(fs, "docs");
        let positions: Vec<(usize, &str)> =
            report.findings.iter().map(|f| (f.line, f.href.as_str())).collect();
        assert_eq!(positions, [(1, "gone.md"), (1, "gone.md"), (2, "gone.md")]);
    }

    #[test]
    fn only_markdown_files_are_scanned() {
        let fs = MemoryFileSystem::new();
        fs.insert("docs/a.MD", "[x](gone1.md)\n");
        fs.insert("docs/b.Markdown", "[x](gone2.md)\n");
        fs.insert("docs/c.txt", "[x](gone3.md)\n");
        let report = validate(fs, "docs");
        assert_eq!(report.files_scanned, 2);
        let hrefs: Vec<&str> = report.findings.iter().map(|f| f.href.as_str()).collect();
        assert_eq!(hrefs, ["gone1.md", "gone2.md"]);
    }

    #[test]
    fn findings_follow_traversal_order() {
        let fs = MemoryFileSystem::new();
        fs.insert("docs/z.md", "[x](z-gone.md)\n");
        fs.insert("docs/a/b.md", "[x](b-gone.md)\n");
        let report = validate(fs, "docs");
        let files: Vec<PathBuf> = report.findings.iter().map(|f| f.file.clone()).collect();
        assert_eq!(files, [PathBuf::from("docs/a/b.md"), PathBuf::from("docs/z.md")]);
    }

    #[test]
    fn invalid_utf8_is_read_best_effort() {
        let fs = MemoryFileSystem::new();
        let mut bytes = b"\xff\xfe [x](gone.md)\n".to_vec();
        bytes.extend_from_slice(b"[y](also-gone.md)\n");
        fs.insert("docs/a.md", bytes);
        let report = validate(fs, "docs");
        assert_eq!(report.findings.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn lone_carriage_returns_count_as_line_breaks() {
        let fs = MemoryFileSystem::new();
        fs.insert("docs/a.md", "# T\r\rtext\r[x](gone.md)\r");
        let report = validate(fs, "docs");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].line, 4);
    }

    #[test]
    fn missing_root_gives_clean_empty_report() {
        let report = validate(MemoryFileSystem::new(), "docs");
        assert!(report.is_clean());
        assert_eq!(report.files_scanned, 0);
        assert_eq!(
            report.render_text(Path::new(".")),
            "No missing relative links found under docs"
        );
    }

    #[test]
    fn json_report_mirrors_findings() {
        let fs = MemoryFileSystem::new();
        fs.insert("docs/guide.md", "[missing](./nope.md)\n");
        let report = validate(fs, "docs");
        let json = report.to_json(Path::new("."));
        assert_eq!(json["ok"], false);
        assert_eq!(json["files_scanned"], 1);
        assert_eq!(json["findings"][0]["file"], "docs/guide.md");
        assert_eq!(json["findings"][0]["line"], 1);
        assert_eq!(json["findings"][0]["resolved"], "docs/nope.md");
    }
}
