/// Authentication middleware for Axum
///
/// Guards protected routes: reads `Authorization: Bearer <token>`, verifies
/// the token and stores the verified identity as an [`AuthContext`] in the
/// request extensions. Identity fields in request bodies are never consulted.
///
/// Rejections carry no body:
///
/// - missing header or a scheme other than `Bearer` → `401 Unauthorized`
/// - bad signature, malformed or expired token → `403 Forbidden`
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{
///     extract::{Request, State},
///     middleware::{self, Next},
///     response::Response,
///     routing::delete,
///     Extension, Router,
/// };
/// use postboard_shared::auth::jwt::TokenService;
/// use postboard_shared::auth::middleware::{jwt_auth_middleware, AuthContext, AuthError};
///
/// async fn guard(
///     State(tokens): State<Arc<TokenService>>,
///     req: Request,
///     next: Next,
/// ) -> Result<Response, AuthError> {
///     jwt_auth_middleware(tokens, req, next).await
/// }
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.email)
/// }
///
/// let tokens = Arc::new(TokenService::new("secret"));
/// let app: Router = Router::new()
///     .route("/protected", delete(handler))
///     .layer(middleware::from_fn_with_state(tokens, guard));
/// ```

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::jwt::TokenService;

/// Verified identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Email from the verified token
    pub email: String,
}

/// Error type for authentication middleware
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or not a `Bearer` credential
    MissingCredentials,

    /// Token failed verification
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED.into_response(),
            AuthError::InvalidToken => StatusCode::FORBIDDEN.into_response(),
        }
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the caller's identity from request headers
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingCredentials)?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, "Rejected bearer token");
        AuthError::InvalidToken
    })?;

    Ok(AuthContext {
        email: claims.email,
    })
}

/// JWT authentication middleware
///
/// Inserts [`AuthContext`] into the request extensions and runs the rest of
/// the stack, or short-circuits with [`AuthError`].
pub async fn jwt_auth_middleware(
    tokens: Arc<TokenService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_context = authenticate(req.headers(), &tokens)?;
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
