//! Handler for batch conversion into a ZIP archive.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::convert::BatchPdfRequest;
use crate::api::extract::ValidatedJson;
use crate::api::headers::X_RESULTS;
use crate::error::AppError;
use crate::state::AppState;

/// Renders every URL to PDF and returns them as one ZIP archive.
///
/// # Endpoint
///
/// `POST /batch-pdf`
///
/// # Batch Processing
///
/// URLs are rendered one after another through a single browser session.
/// A failing URL is reported in `X-Results` and never aborts the batch; the
/// response is `200 OK` even when every URL failed (the archive is then
/// empty).
///
/// # Request Body
///
/// ```json
/// { "urls": ["https://a.test/x", "https://a.test/y"] }
/// ```
///
/// # Response
///
/// Body is the archive. Headers:
///
/// - `Content-Type: application/zip`
/// - `Content-Disposition: attachment; filename=webpages.zip`
/// - `X-Results`: percent-encoded JSON array, in input order:
///
/// ```json
/// [
///   { "url": "https://a.test/x", "status": "done", "pdfName": "x-1.pdf" },
///   { "url": "https://a.test/y", "status": "error", "error": "Navigation failed: ..." }
/// ]
/// ```
///
/// # Errors
///
/// - `400 Bad Request` if `urls` is missing, empty, too long or not an array of strings
/// - `500 Internal Server Error` if the browser cannot start or the archive cannot be written
pub async fn batch_pdf_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BatchPdfRequest>,
) -> Result<Response, AppError> {
    let outcome = state
        .conversion_service
        .convert_batch(&payload.urls)
        .await?;

    let results = serde_json::to_string(&outcome.results).map_err(|e| {
        AppError::internal("Failed to encode results", json!({ "reason": e.to_string() }))
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=webpages.zip".to_string(),
            ),
            (X_RESULTS, urlencoding::encode(&results).into_owned()),
        ],
        outcome.archive,
    )
        .into_response())
}
