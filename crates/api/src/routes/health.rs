use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answered (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_healthy: Option<bool>,
}

/// GET /api/health -- the process is up. Never touches the database.
async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy: None,
    })
}

/// GET /api/health/ready -- 503 when the database is unreachable.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match folio_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            false
        }
    };

    let (status, message) = if db_healthy {
        (StatusCode::OK, "Server is ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
    };

    (
        status,
        Json(HealthResponse {
            success: db_healthy,
            message,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy: Some(db_healthy),
        }),
    )
}

/// Routes mounted at `/health`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/ready", get(readiness))
}
