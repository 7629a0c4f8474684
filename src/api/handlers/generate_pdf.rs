//! Handler for single page conversion.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::api::dto::convert::GeneratePdfRequest;
use crate::api::extract::ValidatedJson;
use crate::api::headers::X_FILENAME;
use crate::error::AppError;
use crate::state::AppState;

/// Renders one web page to PDF.
///
/// # Endpoint
///
/// `POST /generate-pdf`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/docs/intro" }
/// ```
///
/// # Response
///
/// `200 OK` with the PDF as body and headers:
///
/// - `Content-Type: application/pdf`
/// - `X-Filename: intro.pdf`
/// - `Content-Disposition: attachment; filename="intro.pdf"; filename*=UTF-8''intro.pdf`
///
/// # Errors
///
/// - `400 Bad Request` if `url` is missing, not a string or not a valid URL
/// - `500 Internal Server Error` if the page cannot be rendered
pub async fn generate_pdf_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GeneratePdfRequest>,
) -> Result<Response, AppError> {
    let pdf = state
        .conversion_service
        .convert_single(&payload.url)
        .await?;

    let disposition = format!(
        "attachment; filename=\"{name}\"; filename*=UTF-8''{encoded}",
        name = pdf.file_name,
        encoded = urlencoding::encode(&pdf.file_name),
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (X_FILENAME, pdf.file_name),
        ],
        pdf.bytes,
    )
        .into_response())
}
