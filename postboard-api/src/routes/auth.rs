/// Authentication endpoints
///
/// - `POST /api/register` - Register new user
/// - `POST /api/login` - Exchange credentials for a bearer token

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use postboard_shared::auth::credentials;
use serde::{Deserialize, Serialize};

/// Register and login request body
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token, valid for one hour
    pub token: String,
}

/// Register a new user
///
/// ```text
/// POST /api/register
/// { "email": "user@example.com", "password": "secret" }
/// ```
///
/// # Response
///
/// `201 Created` with an empty body.
///
/// # Errors
///
/// - `400 Bad Request`: missing email or password
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = payload?;

    credentials::register(state.stores.users.as_ref(), &req.email, &req.password).await?;

    Ok(StatusCode::CREATED)
}

/// Login endpoint
///
/// ```text
/// POST /api/login
/// { "email": "user@example.com", "password": "secret" }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: plain-text `Invalid credentials` for an unknown
///   email or a wrong password alike
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;

    let token = credentials::login(
        state.stores.users.as_ref(),
        &state.tokens,
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(LoginResponse { token }))
}
