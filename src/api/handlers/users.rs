//! User administration handlers
//!
//! All routes here sit behind the admin middleware. The bootstrap admin
//! account (from `[admin]` in the config) cannot be demoted, deactivated
//! or deleted, so the service can never lose its last way in.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::api::handlers::error_response;
use crate::domain::user::{Role, User};
use crate::domain::RepositoryProvider;
use crate::shared::validate_pagination;

/// State for user administration handlers
#[derive(Clone)]
pub struct UserHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    /// Email of the bootstrap admin, protected from lockout operations
    pub bootstrap_admin_email: String,
}

/// Учётная запись (админ-представление)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Роль: `customer` или `admin`
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl UserDto {
    fn from_user(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            role: u.role.as_str().to_string(),
            is_active: u.is_active,
            created_at: u.created_at.to_rfc3339(),
            last_login_at: u.last_login_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Запрос на изменение учётной записи
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// Новая роль: `customer` или `admin`
    pub role: Option<String>,
    /// Активность аккаунта
    pub is_active: Option<bool>,
}

fn is_bootstrap_admin(state: &UserHandlerState, user: &User) -> bool {
    user.email.eq_ignore_ascii_case(&state.bootstrap_admin_email)
}

/// Список пользователей (админ)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(
        ("bearer_auth" = [])
    ),
    params(PaginationParams),
    responses(
        (status = 200, description = "Страница пользователей", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 403, description = "Требуется роль admin")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<PaginationParams>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<UserDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<UserDto>>>),
> {
    let (page, limit) = validate_pagination(params.page, params.limit);

    let users = state.repos.users().find_all().await.map_err(error_response)?;
    let total = users.len() as u64;

    let items: Vec<UserDto> = users
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .map(UserDto::from_user)
        .collect();

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, total, page, limit,
    ))))
}

/// Информация о пользователе (админ)
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("user_id" = String, Path, description = "UUID пользователя")
    ),
    responses(
        (status = 200, description = "Пользователь найден", body = ApiResponse<UserDto>),
        (status = 404, description = "Пользователь не найден")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(&user_id)
        .await
        .map_err(error_response)?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    Ok(Json(ApiResponse::success(UserDto::from_user(user))))
}

/// Изменение роли или активности пользователя (админ)
///
/// Стартового администратора нельзя понизить или деактивировать.
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("user_id" = String, Path, description = "UUID пользователя")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Пользователь обновлён", body = ApiResponse<UserDto>),
        (status = 404, description = "Пользователь не найден"),
        (status = 403, description = "Попытка изменить стартового администратора"),
        (status = 400, description = "Неизвестная роль")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(&user_id)
        .await
        .map_err(error_response)?;

    let Some(mut user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    let demotes = matches!(&request.role, Some(r) if r != "admin");
    let deactivates = request.is_active == Some(false);
    if is_bootstrap_admin(&state, &user) && (demotes || deactivates) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "The bootstrap admin cannot be demoted or deactivated",
            )),
        ));
    }

    if let Some(role) = &request.role {
        let Some(role) = Role::parse(role) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Unknown role, expected customer or admin")),
            ));
        };
        user.role = role;
    }
    if let Some(is_active) = request.is_active {
        user.is_active = is_active;
    }
    user.updated_at = Utc::now();

    let dto = UserDto::from_user(user.clone());
    state.repos.users().update(user).await.map_err(error_response)?;

    Ok(Json(ApiResponse::success(dto)))
}

/// Удаление пользователя (админ)
///
/// Стартового администратора удалить нельзя.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("user_id" = String, Path, description = "UUID пользователя")
    ),
    responses(
        (status = 200, description = "Пользователь удалён"),
        (status = 404, description = "Пользователь не найден"),
        (status = 403, description = "Попытка удалить стартового администратора")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(&user_id)
        .await
        .map_err(error_response)?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    if is_bootstrap_admin(&state, &user) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("The bootstrap admin cannot be deleted")),
        ));
    }

    state
        .repos
        .users()
        .delete(&user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}
