//! Helpful utilities for working with text.

use htmlentity::entity::{self, ICodedDataTrait};

/// Converts HTML entities into their single-character equivalents.
///
/// For example, X returns "&" as "&amp;", ">" as "&gt;", and "<" as
/// "&lt;" in post text; this function will convert those HTML entities
/// into single, human-readable characters.
///
/// Leading and trailing whitespace will also be trimmed from the string.
///
/// # Examples
///
/// ```
/// use xdraft::text::convert_html_entities;
/// let raw = "Ship it &amp; iterate &gt; polish forever";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "Ship it & iterate > polish forever");
/// ```
///
/// ```
/// use xdraft::text::convert_html_entities;
/// let raw = "  &lt;3 Rust  ";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "<3 Rust");
/// ```
///
/// ```
/// use xdraft::text::convert_html_entities;
/// let raw = "";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, raw);
/// ```
pub fn convert_html_entities(text: &str) -> String {
    let text = text.trim();
    entity::decode(text.as_bytes())
        .to_string()
        .unwrap_or(text.to_string())
}

/// A horizontal rule `width` characters wide, drawn with `ch`.
///
/// # Examples
///
/// ```
/// use xdraft::text::rule;
/// assert_eq!(rule('-', 4), "----");
/// ```
pub fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}
