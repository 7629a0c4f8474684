//! API route configuration.

use crate::api::handlers::{batch_pdf_handler, generate_pdf_handler, health_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /generate-pdf` - Render one page to PDF
/// - `POST /batch-pdf`    - Render many pages into a ZIP archive
/// - `GET  /health`       - Renderer availability
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate-pdf", post(generate_pdf_handler))
        .route("/batch-pdf", post(batch_pdf_handler))
        .route("/health", get(health_handler))
}
