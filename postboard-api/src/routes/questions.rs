/// Question endpoints
///
/// - `GET /api/questions` - List every question (public)
/// - `POST /api/questions` - Create a question owned by the caller
/// - `DELETE /api/questions/:id` - Delete a question the caller owns

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
    models::{NewQuestion, Question},
};
use serde::Deserialize;
use validator::Validate;

use super::not_blank;

/// Create question request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Question is required"))]
    pub question: String,
}

pub async fn create_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Question>)> {
    let Json(req) = payload?;
    req.validate()?;

    let question = state
        .questions
        .create(
            &auth.email,
            NewQuestion {
                question: req.question,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn list_questions(State(state): State<AppState>) -> ApiResult<Json<Vec<Question>>> {
    Ok(Json(state.questions.list_all().await?))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = super::parse_id(&id)?;

    state
        .questions
        .delete_by_id(&auth.email, id)
        .await
        .map_err(ApiError::from_delete::<Question>)?;

    Ok(StatusCode::NO_CONTENT)
}
