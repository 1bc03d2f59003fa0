//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{ApiResponse, ValidatedJson};
use crate::api::handlers::error_response;
use crate::auth::{create_token, hash_password, verify_password, AuthenticatedUser, JwtConfig};
use crate::domain::user::{normalize_email, Role, User};
use crate::domain::RepositoryProvider;

/// Auth state for authentication handlers
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

/// Запрос на авторизацию
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "email": "customer@example.com",
    "password": "secret123"
}))]
pub struct LoginRequest {
    /// Email аккаунта
    pub email: String,
    /// Пароль
    pub password: String,
}

/// Ответ на успешную авторизацию
///
/// Содержит JWT-токен для последующих запросов.
/// Токен передаётся в заголовке `Authorization: Bearer <token>`
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
    "token_type": "Bearer",
    "expires_in": 86400,
    "user": {
        "id": "user-123",
        "name": "Aziz Karimov",
        "email": "customer@example.com",
        "role": "customer"
    }
}))]
pub struct LoginResponse {
    /// JWT access-токен. Передавайте в заголовке `Authorization: Bearer <token>`
    pub token: String,
    /// Тип токена (всегда `Bearer`)
    pub token_type: String,
    /// Время жизни токена в секундах (по умолчанию 86400 = 24 часа)
    pub expires_in: i64,
    /// Информация о пользователе
    pub user: UserInfo,
}

/// Информация о пользователе
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// Уникальный идентификатор пользователя (UUID)
    pub id: String,
    /// Имя пользователя
    pub name: String,
    /// Email
    pub email: String,
    /// Телефон (опционально)
    pub phone: Option<String>,
    /// Роль: `customer` или `admin`
    pub role: String,
}

impl UserInfo {
    fn from_user(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            role: u.role.as_str().to_string(),
        }
    }
}

/// Запрос на регистрацию нового пользователя
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Aziz Karimov",
    "email": "customer@example.com",
    "password": "secure_password_123",
    "phone": "+998901234567"
}))]
pub struct RegisterRequest {
    /// Имя пользователя (от 2 до 100 символов)
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub name: String,
    /// Email-адрес (уникальный)
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Пароль (минимум 8 символов)
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    /// Телефон (опционально)
    pub phone: Option<String>,
}

/// Авторизация пользователя
///
/// Возвращает JWT-токен при успешной аутентификации.
/// Если аккаунт деактивирован — вернёт 401.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Успешная авторизация, возвращает JWT-токен", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Неверные учётные данные или аккаунт деактивирован")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    // Emails are stored normalized; look up the same form the register
    // handler persisted, or mixed-case logins would 401 on valid credentials
    let user = state
        .repos
        .users()
        .find_by_email(&normalize_email(&request.email))
        .await
        .map_err(error_response)?;

    let Some(user) = user else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    };

    if !user.is_active {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Account is disabled")),
        ));
    }

    if !verify_password(&request.password, &user.password_hash) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    }

    // Update last login time; a failure here must not block the login
    state
        .repos
        .users()
        .touch_last_login(&user.id, Utc::now())
        .await
        .ok();

    let token = create_token(&user, &state.jwt_config).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let response = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: UserInfo::from_user(&user),
    };

    Ok(Json(ApiResponse::success(response)))
}

/// Регистрация нового пользователя
///
/// Создаёт нового пользователя с ролью `customer`.
/// Email должен быть уникальным. Пароль: минимум 8 символов.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Пользователь успешно создан", body = ApiResponse<UserInfo>),
        (status = 422, description = "Ошибка валидации (короткий пароль, невалидный email и т.д.)"),
        (status = 409, description = "Пользователь с таким email уже существует")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), (StatusCode, Json<ApiResponse<UserInfo>>)> {
    let password_hash = hash_password(&request.password).map_err(error_response)?;

    let now = Utc::now();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name,
        email: normalize_email(&request.email),
        password_hash,
        phone: request.phone,
        role: Role::Customer,
        is_active: true,
        created_at: now,
        updated_at: now,
        last_login_at: None,
    };

    let info = UserInfo::from_user(&user);
    state.repos.users().save(user).await.map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(info))))
}

/// Получение информации о текущем пользователе
///
/// Возвращает данные пользователя, авторизованного по JWT-токену.
/// Используйте для проверки авторизации и получения роли.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Информация о текущем пользователе", body = ApiResponse<UserInfo>),
        (status = 401, description = "Не авторизован (невалидный или отсутствующий токен)")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<UserInfo>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(&auth.user_id)
        .await
        .map_err(error_response)?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    Ok(Json(ApiResponse::success(UserInfo::from_user(&user))))
}

/// Запрос на смену пароля
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Текущий пароль для подтверждения
    pub current_password: String,
    /// Новый пароль (минимум 8 символов)
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,
}

/// Смена пароля текущего пользователя
///
/// Для подтверждения операции требуется указать текущий пароль.
/// Новый пароль должен содержать минимум 8 символов.
#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(
        ("bearer_auth" = [])
    ),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Пароль успешно изменён"),
        (status = 422, description = "Новый пароль слишком короткий (менее 8 символов)"),
        (status = 401, description = "Неверный текущий пароль или не авторизован")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let user = state
        .repos
        .users()
        .find_by_id(&auth.user_id)
        .await
        .map_err(error_response)?;

    let Some(mut user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    if !verify_password(&request.current_password, &user.password_hash) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid current password")),
        ));
    }

    user.password_hash = hash_password(&request.new_password).map_err(error_response)?;
    user.updated_at = Utc::now();

    state.repos.users().update(user).await.map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::Service;

    use crate::application::services::test_support::test_repos;

    async fn app_with_user(stored_email: &str) -> Router {
        let repos = test_repos().await;
        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Aziz Karimov".to_string(),
            email: normalize_email(stored_email),
            password_hash: hash_password("secure_password_123").unwrap(),
            phone: None,
            role: Role::Customer,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        repos.users().save(user).await.unwrap();

        let state = AuthHandlerState {
            repos,
            jwt_config: JwtConfig {
                secret: "login-test-secret".to_string(),
                expiration_hours: 1,
                issuer: "voltport".to_string(),
            },
        };
        Router::new().route("/login", post(login)).with_state(state)
    }

    async fn post_login(app: Router, email: &str, password: &str) -> axum::http::Response<Body> {
        let body = serde_json::json!({"email": email, "password": password});
        let req = Request::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let mut svc = app.into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn login_accepts_email_in_original_casing() {
        // Registered as "Aziz@Example.com", stored lowercased; logging in
        // with the exact string the customer typed must still succeed
        let app = app_with_user("Aziz@Example.com").await;
        let resp = post_login(app, "Aziz@Example.com", "secure_password_123").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_accepts_lowercased_email() {
        let app = app_with_user("Aziz@Example.com").await;
        let resp = post_login(app, "aziz@example.com", "secure_password_123").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let app = app_with_user("aziz@example.com").await;
        let resp = post_login(app, "aziz@example.com", "wrong_password").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
