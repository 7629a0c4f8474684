//! DTOs for the conversion endpoints.

use serde::Deserialize;
use validator::Validate;

/// Request to convert a single page.
#[derive(Debug, Deserialize, Validate)]
pub struct GeneratePdfRequest {
    /// Absolute URL of the page to render.
    #[validate(length(min = 1, message = "Invalid URL"), url(message = "Invalid URL"))]
    pub url: String,
}

/// Request to convert several pages into one archive.
///
/// Entries are not validated individually: a malformed URL becomes an
/// `error` item in the batch results instead of rejecting the request.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchPdfRequest {
    #[validate(length(min = 1, message = "No URLs provided"))]
    pub urls: Vec<String>,
}
