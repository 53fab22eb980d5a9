//! Related-line normalization.
//!
//! A related-line is the first line of a page whose trimmed text starts with
//! the marker (`*Related: ` by default) followed by `|`-separated links:
//!
//! ```text
//! *Related: [Other](../other.md) | [The Bureau](../factions/the_bureau.md)
//! ```
//!
//! Normalizing puts the canonical links first, relativized to the page, and
//! keeps the remaining links in their original order minus duplicates. The
//! result is a fixed point: normalizing a normalized line changes nothing.

use std::collections::HashSet;
use std::path::Path;

use crate::config::{CanonicalLink, MalformedPolicy, RelatedConfig};
use crate::context::ServiceContext;
use crate::markdown::{first_link, split_lines, MarkdownLink};
use crate::pass::{rewrite_listing, PassSummary};
use crate::paths::{normalize_href, relative_to, to_slash};

/// One entry of a related-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelatedEntry {
    /// A parsed `[text](href)` link.
    Link(MarkdownLink),
    /// A segment that is not a link, kept verbatim.
    Raw(String),
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum EntryKey {
    Link { text: String, href: String },
    Raw(String),
}

impl RelatedEntry {
    fn key(&self) -> EntryKey {
        match self {
            Self::Link(link) => EntryKey::Link {
                text: link.text.trim().to_string(),
                href: normalize_href(&link.href),
            },
            Self::Raw(raw) => EntryKey::Raw(raw.clone()),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Link(link) => link.render(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

/// A related-line split into entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    /// Entries in their original order.
    pub entries: Vec<RelatedEntry>,
    /// Non-empty segments that were not links and were not kept.
    pub dropped: Vec<String>,
}

/// Splits the text after the marker into entries.
///
/// Each `|`-separated segment is trimmed and its first inline link taken.
/// Empty segments vanish; other non-link segments follow `policy`.
#[must_use]
pub fn parse_entries(body: &str, policy: MalformedPolicy) -> ParsedLine {
    let mut parsed = ParsedLine::default();
    for segment in body.split('|').map(str::trim) {
        if segment.is_empty() {
            continue;
        }
        match first_link(segment) {
            Some(link) => parsed.entries.push(RelatedEntry::Link(link)),
            None if policy == MalformedPolicy::Keep => {
                parsed.entries.push(RelatedEntry::Raw(segment.to_string()));
            }
            None => parsed.dropped.push(segment.to_string()),
        }
    }
    parsed
}

/// Merges canonical links with existing entries.
///
/// Canonical links come first in the given order. Existing entries follow in
/// their original order, skipping any whose `(trimmed text, normalized href)`
/// was already emitted.
#[must_use]
pub fn merge_entries(canonical: &[MarkdownLink], existing: Vec<RelatedEntry>) -> Vec<RelatedEntry> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(canonical.len() + existing.len());
    for link in canonical {
        let entry = RelatedEntry::Link(link.clone());
        seen.insert(entry.key());
        merged.push(entry);
    }
    for entry in existing {
        if seen.insert(entry.key()) {
            merged.push(entry);
        }
    }
    merged
}

/// Rewrites related-lines under a root.
pub struct RelatedLinkNormalizer<'a> {
    ctx: &'a ServiceContext,
    config: &'a RelatedConfig,
}

impl<'a> RelatedLinkNormalizer<'a> {
    /// Creates a normalizer using the given context and settings.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a RelatedConfig) -> Self {
        Self { ctx, config }
    }

    /// Canonical links with hrefs relative to the directory holding `file`.
    #[must_use]
    pub fn canonical_links(&self, root: &Path, file: &Path) -> Vec<MarkdownLink> {
        let base = file.parent().unwrap_or_else(|| Path::new(""));
        self.config
            .canonical
            .iter()
            .map(|CanonicalLink { text, target }| {
                MarkdownLink::new(text.as_str(), to_slash(&relative_to(&root.join(target), base)))
            })
            .collect()
    }

    /// Returns the normalized form of `line`, or `None` if it is not a
    /// related-line.
    ///
    /// Dropped segments are returned alongside so callers can report them.
    #[must_use]
    pub fn normalize_line(
        &self,
        line: &str,
        canonical: &[MarkdownLink],
    ) -> Option<(String, Vec<String>)> {
        let body = line.trim().strip_prefix(self.config.marker.as_str())?;
        let parsed = parse_entries(body, self.config.malformed);
        let merged = merge_entries(canonical, parsed.entries);
        let rendered: Vec<String> = merged.iter().map(RelatedEntry::render).collect();
        Some((format!("{}{}", self.config.marker, rendered.join(" | ")), parsed.dropped))
    }

    /// Returns the new contents of `file`, or `None` if nothing changes.
    ///
    /// Only the first related-line is considered. A rewritten document has
    /// its lines joined with `\n` and ends with a single newline.
    #[must_use]
    pub fn normalize_text(&self, root: &Path, file: &Path, text: &str) -> Option<String> {
        let lines = split_lines(text);
        let index = lines.iter().position(|l| l.trim().starts_with(self.config.marker.as_str()))?;

        let canonical = self.canonical_links(root, file);
        let (updated, dropped) = self.normalize_line(lines[index], &canonical)?;
        if self.config.malformed == MalformedPolicy::Warn {
            for segment in &dropped {
                tracing::warn!(
                    path = %file.display(),
                    line = index + 1,
                    segment = %segment,
                    "dropping related-line segment that is not a link"
                );
            }
        }
        if updated == lines[index] {
            return None;
        }

        let mut out = String::with_capacity(text.len() + updated.len());
        for (i, &line) in lines.iter().enumerate() {
            out.push_str(if i == index { updated.as_str() } else { line });
            out.push('\n');
        }
        Some(out)
    }

    /// Normalizes every `.md` file under `root`.
    ///
    /// A missing root yields an empty summary. Per-file read and write
    /// problems are recorded in the summary.
    #[must_use]
    pub fn run(&self, root: &Path, dry_run: bool) -> PassSummary {
        let mut summary = PassSummary::new(dry_run);
        if !self.ctx.fs.is_dir(root) {
            tracing::warn!(path = %root.display(), "root directory not found, nothing to do");
            return summary;
        }
        let listing = self.ctx.fs.walk_files(root);
        rewrite_listing(self.ctx, listing, &mut summary, |path, text| {
            self.normalize_text(root, path, text)
        });
        tracing::debug!(
            scanned = summary.files_scanned,
            changed = summary.changed.len(),
            "related-line normalization finished"
        );
        summary
    }
}
