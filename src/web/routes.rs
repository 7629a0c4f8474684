//! Web UI route configuration.

use crate::state::AppState;
use crate::web::handlers::index_handler;
use axum::{Router, routing::get};

/// Public UI routes.
///
/// # Endpoints
///
/// - `GET /` - Conversion page
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}
