//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use common::StorageBackend;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: StorageHealth,
}

/// User store status with optional error message.
#[derive(Debug, Serialize)]
pub struct StorageHealth {
    pub backend: StorageBackend,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - pings the database when one backs the store.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let ping = match &state.database {
        Some(db) => db.ping().await.map_err(|e| e.to_string()),
        None => Ok(()),
    };

    let healthy = ping.is_ok();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage: StorageHealth {
            backend: state.config.identity.storage,
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            error: ping.err(),
        },
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
