//! Plain-text preview derived from editor markup.
//!
//! Rules:
//! - Block-level tags and `<br>` become spaces.
//! - Inline tags are dropped without a separator, so `un<b>believ</b>able`
//!   stays one word.
//! - Common character entities are decoded.
//! - Whitespace is collapsed and the first 100 chars are retained.

use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static BLOCK_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:p|div|br|li|ul|ol|h[1-6]|blockquote|pre)\b[^>]*>")
        .expect("valid block tag regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    // Last, so `&amp;lt;` decodes to the literal `&lt;`.
    ("&amp;", "&"),
];

/// Derives a one-line preview from rich-text content.
///
/// Returns `None` when no visible text remains.
pub fn preview_text(content: &str) -> Option<String> {
    let separated = BLOCK_TAG_RE.replace_all(content, " ");
    let without_tags = TAG_RE.replace_all(&separated, "");
    let mut decoded = without_tags.into_owned();
    for (entity, replacement) in ENTITIES {
        decoded = decoded.replace(entity, replacement);
    }
    let normalized = WHITESPACE_RE.replace_all(&decoded, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}
