//! Conversion page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::state::AppState;

/// Template for the conversion page.
///
/// Renders `templates/index.html` with two tabs:
/// - Single link to PDF
/// - Batch upload of a `.txt` URL list to ZIP
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub max_batch_urls: usize,
    pub version: &'static str,
}

/// Renders the conversion page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        max_batch_urls: state.conversion_service.max_batch_urls(),
        version: env!("CARGO_PKG_VERSION"),
    }
}
