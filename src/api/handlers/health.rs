//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Renderer**: A Chromium executable can be located
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "renderer": { "status": "ok", "message": "Browser executable found" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let renderer_check = check_renderer(&state).await;

    let all_healthy = renderer_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            renderer: renderer_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that a browser executable can be located. No browser is started.
async fn check_renderer(state: &AppState) -> CheckStatus {
    if state.conversion_service.renderer_healthy().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Browser executable found".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Browser executable not found".to_string()),
        }
    }
}
