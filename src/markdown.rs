//! Inline markdown link extraction.
//!
//! Only the `[text](href)` form is recognized. The text may not contain `]`
//! and the href may not contain `)`.

use std::sync::OnceLock;

use regex::Regex;

/// An inline link found in a line of markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    /// Text between the brackets.
    pub text: String,
    /// Target between the parentheses, verbatim.
    pub href: String,
}

impl MarkdownLink {
    /// Creates a link from its parts.
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self { text: text.into(), href: href.into() }
    }

    /// Renders the link back to `[text](href)`.
    #[must_use]
    pub fn render(&self) -> String {
        format!("[{}]({})", self.text, self.href)
    }
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid")
    })
}

/// Splits `text` into lines, treating `\r\n`, a lone `\r` and `\n` as
/// line breaks. A trailing break does not produce an empty final line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\n' => {
                lines.push(&text[start..idx]);
                start = idx + 1;
            }
            '\r' => {
                lines.push(&text[start..idx]);
                start = idx + 1;
                if chars.next_if(|&(_, next)| next == '\n').is_some() {
                    start += 1;
                }
            }
            _ => {}
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Returns every inline link in `line`, left to right.
#[must_use]
pub fn extract_links(line: &str) -> Vec<MarkdownLink> {
    link_pattern()
        .captures_iter(line)
        .map(|cap| MarkdownLink::new(&cap[1], &cap[2]))
        .collect()
}

/// Returns the first inline link in `text`, if any.
#[must_use]
pub fn first_link(text: &str) -> Option<MarkdownLink> {
    link_pattern().captures(text).map(|cap| MarkdownLink::new(&cap[1], &cap[2]))
}
