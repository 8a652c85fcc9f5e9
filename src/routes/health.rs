// ============================================================================
// Root and Health Routes
// ============================================================================
//
// Endpoints:
// - GET / - Welcome message to verify the server is running
// - GET /health - Health check (database)
//
// ============================================================================

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::AppError;
use crate::health;

/// GET /
/// Root endpoint to verify the server is running
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the API server!" }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check(
    State(app_context): State<Arc<AppContext>>,
) -> Result<impl IntoResponse, AppError> {
    match health::health_check(&app_context.db_pool).await {
        Ok(_) => Ok((StatusCode::OK, "OK")),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Ok((StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable"))
        }
    }
}
