//! Field extraction for raw label text
//!
//! openFDA returns each label section as an array of HTML-ish fragments.
//! Only the first fragment is shown to patients.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum characters kept from an externally sourced text field
pub const MAX_FIELD_CHARS: usize = 500;

/// Anything shaped like a markup tag
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Reduce a field's fragments to a single display string
///
/// Absent or empty input yields an empty string. Otherwise the first
/// fragment has tags stripped, is trimmed, and is cut to
/// [`MAX_FIELD_CHARS`] characters. Fallback text for empty results is the
/// caller's concern.
///
/// # Examples
///
/// ```
/// use medlookup_fda::extract_text;
///
/// let fragments = vec!["<p>Relieves pain</p>".to_string()];
/// assert_eq!(extract_text(Some(fragments.as_slice())), "Relieves pain");
/// assert_eq!(extract_text(None), "");
/// ```
pub fn extract_text(fragments: Option<&[String]>) -> String {
    let Some(first) = fragments.and_then(|f| f.first()) else {
        return String::new();
    };

    let stripped = TAG_RE.replace_all(first, "");
    stripped.trim().chars().take(MAX_FIELD_CHARS).collect()
}

/// Extract a field, substituting `fallback` when nothing is left
pub fn extract_or(fragments: Option<&[String]>, fallback: &str) -> String {
    let text = extract_text(fragments);
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
