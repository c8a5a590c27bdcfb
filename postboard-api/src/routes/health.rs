/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// { "status": "healthy", "version": "0.1.0", "store": "postgres", "database": "connected" }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use postboard_shared::{db::pool, store::Backend};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Store backend in use
    pub store: String,

    /// Database status ("connected", "disconnected", or "n/a" for memory)
    pub database: String,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match &state.stores.backend {
        Backend::Memory => "n/a",
        Backend::Postgres(db) => match pool::health_check(db).await {
            Ok(()) => "connected",
            Err(_) => "disconnected",
        },
    };

    Ok(Json(HealthResponse {
        status: if database_status == "disconnected" {
            "degraded".to_string()
        } else {
            "healthy".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.stores.backend_name().to_string(),
        database: database_status.to_string(),
    }))
}
