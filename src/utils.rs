//! Normalization helpers applied by every extractor before it returns.
//!
//! The consolidated table only stays column-homogeneous if each outlet
//! hands over the same shapes: tags as one comma-joined string, bodies as
//! one flattened paragraph, absent values as `None` (never `""`). These
//! helpers are the single place those rules live.

use itertools::Itertools;

/// Join a tag list into one `", "`-separated string.
///
/// An empty list (or a list of blank tags) normalizes to `None`, keeping
/// "no tags" and "absent" indistinguishable in the final table.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(join_tags(&["x".into(), "y".into()]), Some("x, y".into()));
/// assert_eq!(join_tags(&[]), None);
/// ```
pub fn join_tags(tags: &[String]) -> Option<String> {
    let joined = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .join(", ");
    if joined.is_empty() { None } else { Some(joined) }
}

/// Replace every newline in a body with a single space.
///
/// Extractors build bodies by joining paragraphs with newlines; the final
/// form is one flat line. Applying this twice is the same as applying it
/// once, since the output contains no newlines.
pub fn flatten_body(body: &str) -> Option<String> {
    let flat = body.replace('\n', " ");
    if flat.trim().is_empty() {
        None
    } else {
        Some(flat)
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// The equivalent of extracting element text node-by-node: inner markup
/// boundaries become single spaces instead of raw indentation runs.
pub fn collapse_ws(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Drop duplicate URLs while preserving first-seen order.
pub fn dedup_urls(urls: Vec<String>) -> Vec<String> {
    urls.into_iter().unique().collect()
}
