//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{auth, bookings, feedback, health, monitoring, ports, users, vehicles};
use crate::application::services::BookingService;
use crate::auth::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::auth::JwtConfig;
use crate::domain::RepositoryProvider;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::change_password,
        // Vehicles
        vehicles::list_vehicles,
        // Ports
        ports::list_ports,
        ports::get_port,
        ports::create_port,
        ports::update_port,
        ports::delete_port,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::cancel_booking,
        bookings::estimate,
        bookings::pay_booking,
        // Feedback
        feedback::submit_feedback,
        feedback::list_feedback,
        feedback::delete_feedback,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Monitoring
        monitoring::get_service_stats,
        monitoring::get_metrics,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<users::UserDto>,
            PaginationParams,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            auth::ChangePasswordRequest,
            // Vehicles
            vehicles::VehicleDto,
            // Ports
            ports::ChargerOptionDto,
            ports::PortDto,
            ports::PortAvailabilityDto,
            ports::CreatePortRequest,
            ports::UpdatePortRequest,
            // Bookings
            bookings::BookingDto,
            bookings::CreateBookingRequest,
            bookings::EstimateRequest,
            bookings::EstimateResponse,
            // Feedback
            feedback::FeedbackDto,
            feedback::SubmitFeedbackRequest,
            // Users
            users::UserDto,
            users::UpdateUserRequest,
            // Monitoring
            monitoring::ServiceStatsDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Проверка состояния сервера. Используйте для health-check мониторинга (uptime, ping, readiness)."),
        (name = "Authentication", description = "Аутентификация пользователей: вход (JWT), регистрация, смена пароля. Токен возвращается в поле `token` и передаётся в заголовке `Authorization: Bearer <token>`."),
        (name = "Vehicles", description = "Статический каталог поддерживаемых моделей электротранспорта с ёмкостью батареи (кВт·ч)."),
        (name = "Ports", description = "Зарядные порты. Листинг всегда отвечает на вопрос «свободен ли порт НА эту дату и слот»: статус вычисляется из журнала бронирований и нигде не хранится. CRUD-операции доступны только администратору."),
        (name = "Bookings", description = "Бронирование портов. Слоты часовые, с 09:00 по 18:00. Комбинация (порт, дата, слот) уникальна: гонка за слот разрешается на уровне БД, проигравший получает 409. Номера бронирований последовательные: `EV0001`, `EV0002`, ..."),
        (name = "Feedback", description = "Отзывы клиентов. Отправка публичная, просмотр и удаление — только администратор."),
        (name = "Users", description = "Администрирование учётных записей. Роли: `customer`, `admin`. Стартовый администратор защищён от понижения, деактивации и удаления."),
        (name = "Monitoring", description = "Мониторинг сервиса: сводные счётчики и метрики Prometheus."),
    ),
    info(
        title = "VoltPort Reservation API",
        version = "1.0.0",
        description = "REST API для бронирования зарядных портов электротранспорта.

## Аутентификация

Получите токен через `POST /api/v1/auth/login`, передавайте в заголовке `Authorization: Bearer <token>`.

## Формат ответов

Все REST-ответы обёрнуты в стандартную оболочку:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

При ошибке:
```json
{\"success\": false, \"data\": null, \"error\": \"описание ошибки\"}
```

## Доступность портов

`GET /api/v1/ports` требует параметры `date` и `time`: доступность существует
только относительно конкретного слота. При передаче `lat`/`lon` порты
дополняются расстоянием (формула хаверсинуса) и сортируются от ближнего к дальнему.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bootstrap_admin_email: String,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let auth_mw_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let booking_service = Arc::new(BookingService::new(repos.clone()));

    let auth_state = auth::AuthHandlerState {
        repos: repos.clone(),
        jwt_config,
    };
    let port_state = ports::PortHandlerState {
        repos: repos.clone(),
    };
    let booking_state = bookings::BookingHandlerState {
        service: booking_service,
    };
    let feedback_state = feedback::FeedbackHandlerState {
        repos: repos.clone(),
    };
    let user_state = users::UserHandlerState {
        repos: repos.clone(),
        bootstrap_admin_email,
    };
    let monitoring_state = monitoring::MonitoringState {
        repos,
        prometheus_handle,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            auth_mw_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Port routes: reads are public, mutations admin-only.
    // Two routers nested on the same prefix; their method routers merge.
    let port_public_routes = Router::new()
        .route("/", get(ports::list_ports))
        .route("/{port_id}", get(ports::get_port))
        .with_state(port_state.clone());

    let port_admin_routes = Router::new()
        .route("/", post(ports::create_port))
        .route(
            "/{port_id}",
            put(ports::update_port).delete(ports::delete_port),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            auth_mw_state.clone(),
            auth_middleware,
        ))
        .with_state(port_state);

    // Booking routes: estimate is public, everything else needs a session
    let booking_public_routes = Router::new()
        .route("/estimate", post(bookings::estimate))
        .with_state(booking_state.clone());

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/{reference}",
            get(bookings::get_booking).delete(bookings::cancel_booking),
        )
        .route("/{reference}/pay", post(bookings::pay_booking))
        .layer(middleware::from_fn_with_state(
            auth_mw_state.clone(),
            auth_middleware,
        ))
        .with_state(booking_state);

    // Feedback: submission is public, review is admin-only
    let feedback_public_routes = Router::new()
        .route("/", post(feedback::submit_feedback))
        .with_state(feedback_state.clone());

    let feedback_admin_routes = Router::new()
        .route("/", get(feedback::list_feedback))
        .route("/{id}", axum::routing::delete(feedback::delete_feedback))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            auth_mw_state.clone(),
            auth_middleware,
        ))
        .with_state(feedback_state);

    // User administration (admin)
    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route(
            "/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            auth_mw_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Monitoring (admin)
    let monitoring_routes = Router::new()
        .route("/stats", get(monitoring::get_service_stats))
        .route("/metrics", get(monitoring::get_metrics))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            auth_mw_state,
            auth_middleware,
        ))
        .with_state(monitoring_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Vehicles
        .route("/api/v1/vehicles", get(vehicles::list_vehicles))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Ports
        .nest("/api/v1/ports", port_public_routes)
        .nest("/api/v1/ports", port_admin_routes)
        // Bookings
        .nest("/api/v1/bookings", booking_public_routes)
        .nest("/api/v1/bookings", booking_routes)
        // Feedback
        .nest("/api/v1/feedback", feedback_public_routes)
        .nest("/api/v1/feedback", feedback_admin_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Monitoring
        .nest("/api/v1/monitoring", monitoring_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
