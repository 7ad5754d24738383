//! Hidden Markdown tags that mark bot comments.
//!
//! A tagged comment ends with a line such as `[//]: # (needs-info)`. GitHub
//! does not render it, but the bot can find its own comments again by tag.

use regex::Regex;
use std::sync::LazyLock;

#[cfg(test)]
#[path = "comment_tag_tests.rs"]
mod tests;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[//\]: # \((.*?)\)").expect("tag pattern is a valid regex"));

/// Formats a hidden tag line.
pub fn format_tag(tag: &str) -> String {
    format!("[//]: # ({})", tag)
}

/// Appends the hidden tag to a comment body.
pub fn with_tag(body: &str, tag: &str) -> String {
    format!("{}\n\n{}", body.trim_end(), format_tag(tag))
}

/// Returns the first hidden tag in a comment body.
pub fn extract_tag(body: &str) -> Option<&str> {
    TAG_PATTERN
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Returns true if the body carries exactly this tag as its first tag.
pub fn has_tag(body: &str, tag: &str) -> bool {
    extract_tag(body) == Some(tag)
}
