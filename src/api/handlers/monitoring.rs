//! Monitoring API handlers
//!
//! Entity counts for the dashboard plus the Prometheus scrape endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::handlers::error_response;
use crate::domain::RepositoryProvider;

/// Monitoring state
#[derive(Clone)]
pub struct MonitoringState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub prometheus_handle: PrometheusHandle,
}

/// Сводная статистика сервиса
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceStatsDto {
    /// Количество зарегистрированных портов
    pub ports: u64,
    /// Общее количество бронирований
    pub bookings: u64,
    /// Количество учётных записей
    pub users: u64,
    /// Количество отзывов
    pub feedback: u64,
}

/// Сводная статистика
///
/// Общие счётчики: порты, бронирования, пользователи, отзывы.
/// Используйте для виджета мониторинга на дашборде.
#[utoipa::path(
    get,
    path = "/api/v1/monitoring/stats",
    responses(
        (status = 200, description = "Сводная статистика", body = ApiResponse<ServiceStatsDto>),
        (status = 401, description = "Не авторизован")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Monitoring"
)]
pub async fn get_service_stats(
    State(state): State<MonitoringState>,
) -> Result<Json<ApiResponse<ServiceStatsDto>>, (StatusCode, Json<ApiResponse<ServiceStatsDto>>)> {
    let ports = state.repos.ports().count().await.map_err(error_response)?;
    let bookings = state.repos.bookings().count().await.map_err(error_response)?;
    let users = state.repos.users().count().await.map_err(error_response)?;
    let feedback = state
        .repos
        .feedback()
        .find_all()
        .await
        .map_err(error_response)?
        .len() as u64;

    Ok(Json(ApiResponse::success(ServiceStatsDto {
        ports,
        bookings,
        users,
        feedback,
    })))
}

/// Метрики Prometheus
///
/// Текстовый формат Prometheus для скрейпинга.
#[utoipa::path(
    get,
    path = "/api/v1/monitoring/metrics",
    responses(
        (status = 200, description = "Метрики в текстовом формате Prometheus", body = String),
        (status = 401, description = "Не авторизован")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Monitoring"
)]
pub async fn get_metrics(State(state): State<MonitoringState>) -> String {
    state.prometheus_handle.render()
}
