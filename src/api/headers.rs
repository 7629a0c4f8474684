//! Custom response headers.

use axum::http::HeaderName;

/// Suggested file name of a single converted document.
pub const X_FILENAME: HeaderName = HeaderName::from_static("x-filename");

/// Percent-encoded JSON array of per-URL batch results.
pub const X_RESULTS: HeaderName = HeaderName::from_static("x-results");
