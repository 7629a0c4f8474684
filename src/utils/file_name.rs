//! Derivation of download file names from page URLs.
//!
//! The last non-empty path segment becomes the slug. Every character outside
//! `[A-Za-z0-9_-]` is replaced with `-`.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Characters that are not allowed in a slug.
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid slug regex"));

const DEFAULT_SLUG: &str = "page";
const FALLBACK_STEM: &str = "webpage";

/// Returns the sanitized slug for `url`, or `None` if it does not parse.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slug_for("https://a.test/foo/bar").as_deref(), Some("bar"));
/// assert_eq!(slug_for("https://a.test/").as_deref(), Some("page"));
/// assert_eq!(slug_for("not a url"), None);
/// ```
pub fn slug_for(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;

    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .unwrap_or(DEFAULT_SLUG);

    let slug = UNSAFE_CHARS.replace_all(segment, "-");

    if slug.is_empty() {
        Some(DEFAULT_SLUG.to_string())
    } else {
        Some(slug.into_owned())
    }
}

/// File name for a single conversion: `{slug}.pdf` or `webpage.pdf`.
pub fn single_file_name(url: &str) -> String {
    match slug_for(url) {
        Some(slug) => format!("{slug}.pdf"),
        None => format!("{FALLBACK_STEM}.pdf"),
    }
}

/// File name for the `index`-th (zero-based) URL of a batch:
/// `{slug}-{index + 1}.pdf` or `webpage-{index + 1}.pdf`.
///
/// The index suffix keeps archive entries unique within one batch.
pub fn batch_file_name(url: &str, index: usize) -> String {
    let position = index + 1;
    match slug_for(url) {
        Some(slug) => format!("{slug}-{position}.pdf"),
        None => format!("{FALLBACK_STEM}-{position}.pdf"),
    }
}
