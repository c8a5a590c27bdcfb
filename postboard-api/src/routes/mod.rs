/// API route handlers
///
/// - `health`: liveness and store connectivity
/// - `auth`: registration and login
/// - `posts`: post create/list/delete
/// - `questions`: question create/list/delete

pub mod auth;
pub mod health;
pub mod posts;
pub mod questions;

use crate::error::{ApiError, ApiResult};
use uuid::Uuid;
use validator::ValidationError;

/// Parses a resource id from the path
pub(crate) fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}

/// Rejects empty and whitespace-only text fields
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
