/// Post endpoints
///
/// - `GET /api/posts` - List every post (public)
/// - `POST /api/posts` - Create a post owned by the caller
/// - `DELETE /api/posts/:id` - Delete a post the caller owns

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use postboard_shared::{
    auth::middleware::AuthContext,
    models::{NewPost, Post},
};
use serde::Deserialize;
use validator::Validate;

use super::not_blank;

/// Create post request
///
/// Any `author` field in the body is ignored; the author is the token holder.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Content is required"))]
    pub content: String,
}

/// Create a post
///
/// # Response
///
/// `201 Created` with the stored post, including `_id` and `author`.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let Json(req) = payload?;
    req.validate()?;

    let post = state
        .posts
        .create(
            &auth.email,
            NewPost {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// List all posts
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    Ok(Json(state.posts.list_all().await?))
}

/// Delete a post
///
/// # Errors
///
/// - `400 Bad Request`: id is not a valid UUID
/// - `403 Forbidden`: caller is not the author
/// - `404 Not Found`: no such post
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = super::parse_id(&id)?;

    state
        .posts
        .delete_by_id(&auth.email, id)
        .await
        .map_err(ApiError::from_delete::<Post>)?;

    Ok(StatusCode::NO_CONTENT)
}
