//! Customer feedback handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{ApiResponse, ValidatedJson};
use crate::api::handlers::error_response;
use crate::domain::feedback::Feedback;
use crate::domain::RepositoryProvider;

/// State for feedback handlers
#[derive(Clone)]
pub struct FeedbackHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Отзыв клиента
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

impl FeedbackDto {
    fn from_feedback(f: Feedback) -> Self {
        Self {
            id: f.id,
            name: f.name,
            email: f.email,
            message: f.message,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// Запрос на отправку отзыва
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitFeedbackRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

/// Отправка отзыва
///
/// Публичный эндпоинт, авторизация не требуется.
#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    tag = "Feedback",
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Отзыв сохранён", body = ApiResponse<FeedbackDto>),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn submit_feedback(
    State(state): State<FeedbackHandlerState>,
    ValidatedJson(request): ValidatedJson<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FeedbackDto>>), (StatusCode, Json<ApiResponse<FeedbackDto>>)>
{
    let feedback = state
        .repos
        .feedback()
        .save(&request.name, &request.email, &request.message)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(FeedbackDto::from_feedback(feedback))),
    ))
}

/// Список отзывов (админ)
#[utoipa::path(
    get,
    path = "/api/v1/feedback",
    tag = "Feedback",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Отзывы, новые первыми", body = ApiResponse<Vec<FeedbackDto>>),
        (status = 403, description = "Требуется роль admin")
    )
)]
pub async fn list_feedback(
    State(state): State<FeedbackHandlerState>,
) -> Result<Json<ApiResponse<Vec<FeedbackDto>>>, (StatusCode, Json<ApiResponse<Vec<FeedbackDto>>>)>
{
    let entries = state
        .repos
        .feedback()
        .find_all()
        .await
        .map_err(error_response)?;

    let dtos = entries.into_iter().map(FeedbackDto::from_feedback).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Удаление отзыва (админ)
#[utoipa::path(
    delete,
    path = "/api/v1/feedback/{id}",
    tag = "Feedback",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i32, Path, description = "Идентификатор отзыва")
    ),
    responses(
        (status = 200, description = "Отзыв удалён"),
        (status = 404, description = "Отзыв не найден")
    )
)]
pub async fn delete_feedback(
    State(state): State<FeedbackHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .repos
        .feedback()
        .delete(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(())))
}
