//! Newline-separated URL lists, as uploaded through the batch form.

/// Splits `text` into URLs: one per line, trimmed, blank lines dropped.
///
/// Handles both `\n` and `\r\n` line endings. Lines are not validated here;
/// malformed entries surface later as per-item errors.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
