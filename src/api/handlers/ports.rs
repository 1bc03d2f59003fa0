//! Charging port API handlers
//!
//! Listing always answers for one concrete (date, time slot) pair, so a
//! port's `status` is a property of the query, not of the row.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::{ApiResponse, ValidatedJson};
use crate::api::handlers::error_response;
use crate::application::services::{AvailabilityQuery, AvailabilityService};
use crate::domain::booking::TimeSlot;
use crate::domain::geo::Coordinate;
use crate::domain::port::{ChargerOption, Port, PortAvailability};
use crate::domain::RepositoryProvider;

/// State for port handlers
#[derive(Clone)]
pub struct PortHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Один зарядный разъём порта
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChargerOptionDto {
    /// Тип разъёма, например `normal` или `fast`
    #[validate(length(min = 1, max = 50))]
    pub charger_type: String,
    /// Скорость зарядки, кВт
    #[validate(range(min = 0.1, message = "must be positive"))]
    pub speed_kw: f64,
}

/// Зарядный порт
#[derive(Debug, Serialize, ToSchema)]
pub struct PortDto {
    /// Идентификатор порта, например `STN-001`
    pub id: String,
    /// Описание местоположения
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Доступные разъёмы
    pub charger_options: Vec<ChargerOptionDto>,
}

impl PortDto {
    fn from_port(p: Port) -> Self {
        Self {
            id: p.id,
            location: p.location,
            latitude: p.latitude,
            longitude: p.longitude,
            charger_options: p
                .charger_options
                .into_iter()
                .map(|o| ChargerOptionDto {
                    charger_type: o.charger_type,
                    speed_kw: o.speed_kw,
                })
                .collect(),
        }
    }
}

/// Порт с вычисленным статусом для запрошенных даты и слота
#[derive(Debug, Serialize, ToSchema)]
pub struct PortAvailabilityDto {
    #[serde(flatten)]
    pub port: PortDto,
    /// Статус: `available` или `booked`
    #[schema(example = "available")]
    pub status: String,
    /// Расстояние от клиента, км (если переданы координаты)
    pub distance_km: Option<f64>,
}

impl PortAvailabilityDto {
    fn from_availability(a: PortAvailability) -> Self {
        Self {
            status: a.status.as_str().to_string(),
            distance_km: a.distance_km,
            port: PortDto::from_port(a.port),
        }
    }
}

/// Параметры запроса доступности
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityParams {
    /// Дата бронирования, `YYYY-MM-DD`
    pub date: String,
    /// Временной слот, `HH:MM` (с 09:00 по 18:00)
    pub time: String,
    /// Широта клиента (вместе с `lon`)
    pub lat: Option<f64>,
    /// Долгота клиента (вместе с `lat`)
    pub lon: Option<f64>,
}

/// Запрос на создание порта
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "id": "STN-001",
    "location": "Yunusabad, Amir Temur 42",
    "latitude": 41.3111,
    "longitude": 69.2797,
    "charger_options": [
        {"charger_type": "normal", "speed_kw": 7.0},
        {"charger_type": "fast", "speed_kw": 40.0}
    ]
}))]
pub struct CreatePortRequest {
    /// Идентификатор порта (уникальный)
    #[validate(length(min = 1, max = 50))]
    pub id: String,
    /// Описание местоположения
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Доступные разъёмы (минимум один)
    #[validate(length(min = 1, message = "at least one charger option is required"))]
    #[validate(nested)]
    pub charger_options: Vec<ChargerOptionDto>,
}

/// Запрос на обновление порта
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePortRequest {
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(min = 1, message = "at least one charger option is required"))]
    #[validate(nested)]
    pub charger_options: Vec<ChargerOptionDto>,
}

fn dto_options(options: Vec<ChargerOptionDto>) -> Vec<ChargerOption> {
    options
        .into_iter()
        .map(|o| ChargerOption {
            charger_type: o.charger_type.trim().to_lowercase(),
            speed_kw: o.speed_kw,
        })
        .collect()
}

/// Список портов с доступностью
///
/// Возвращает все порты со статусом `available`/`booked` для указанных
/// даты и слота. Оба параметра обязательны: доступность существует только
/// относительно конкретного времени. При передаче `lat`/`lon` каждый порт
/// дополняется расстоянием и список сортируется от ближнего к дальнему.
#[utoipa::path(
    get,
    path = "/api/v1/ports",
    tag = "Ports",
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Список портов с вычисленной доступностью", body = ApiResponse<Vec<PortAvailabilityDto>>),
        (status = 400, description = "Отсутствуют или невалидны параметры date/time")
    )
)]
pub async fn list_ports(
    State(state): State<PortHandlerState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<ApiResponse<Vec<PortAvailabilityDto>>>, (StatusCode, Json<ApiResponse<Vec<PortAvailabilityDto>>>)>
{
    let date: NaiveDate = params.date.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid date, expected YYYY-MM-DD")),
        )
    })?;

    let Some(time_slot) = TimeSlot::parse(&params.time) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "Invalid time slot, expected one of 09:00..18:00 on the hour",
            )),
        ));
    };

    let origin = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        (None, None) => None,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("lat and lon must be provided together")),
            ));
        }
    };

    let service = AvailabilityService::new(state.repos.clone());
    let results = service
        .resolve(AvailabilityQuery {
            date,
            time_slot,
            origin,
        })
        .await
        .map_err(error_response)?;

    let dtos = results
        .into_iter()
        .map(PortAvailabilityDto::from_availability)
        .collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Информация о порте
#[utoipa::path(
    get,
    path = "/api/v1/ports/{port_id}",
    tag = "Ports",
    params(
        ("port_id" = String, Path, description = "Идентификатор порта")
    ),
    responses(
        (status = 200, description = "Порт найден", body = ApiResponse<PortDto>),
        (status = 404, description = "Порт не найден")
    )
)]
pub async fn get_port(
    State(state): State<PortHandlerState>,
    Path(port_id): Path<String>,
) -> Result<Json<ApiResponse<PortDto>>, (StatusCode, Json<ApiResponse<PortDto>>)> {
    let port = state
        .repos
        .ports()
        .find_by_id(&port_id)
        .await
        .map_err(error_response)?;

    let Some(port) = port else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Port '{}' not found", port_id))),
        ));
    };

    Ok(Json(ApiResponse::success(PortDto::from_port(port))))
}

/// Регистрация нового порта (админ)
#[utoipa::path(
    post,
    path = "/api/v1/ports",
    tag = "Ports",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePortRequest,
    responses(
        (status = 201, description = "Порт зарегистрирован", body = ApiResponse<PortDto>),
        (status = 409, description = "Порт с таким идентификатором уже существует"),
        (status = 403, description = "Требуется роль admin")
    )
)]
pub async fn create_port(
    State(state): State<PortHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePortRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PortDto>>), (StatusCode, Json<ApiResponse<PortDto>>)> {
    let now = Utc::now();
    let port = Port {
        id: request.id.trim().to_string(),
        location: request.location,
        latitude: request.latitude,
        longitude: request.longitude,
        charger_options: dto_options(request.charger_options),
        created_at: now,
        updated_at: now,
    };

    let dto = PortDto::from_port(port.clone());
    state.repos.ports().save(port).await.map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

/// Обновление порта (админ)
#[utoipa::path(
    put,
    path = "/api/v1/ports/{port_id}",
    tag = "Ports",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("port_id" = String, Path, description = "Идентификатор порта")
    ),
    request_body = UpdatePortRequest,
    responses(
        (status = 200, description = "Порт обновлён", body = ApiResponse<PortDto>),
        (status = 404, description = "Порт не найден"),
        (status = 403, description = "Требуется роль admin")
    )
)]
pub async fn update_port(
    State(state): State<PortHandlerState>,
    Path(port_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePortRequest>,
) -> Result<Json<ApiResponse<PortDto>>, (StatusCode, Json<ApiResponse<PortDto>>)> {
    let existing = state
        .repos
        .ports()
        .find_by_id(&port_id)
        .await
        .map_err(error_response)?;

    let Some(mut port) = existing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Port '{}' not found", port_id))),
        ));
    };

    port.location = request.location;
    port.latitude = request.latitude;
    port.longitude = request.longitude;
    port.charger_options = dto_options(request.charger_options);
    port.updated_at = Utc::now();

    let dto = PortDto::from_port(port.clone());
    state.repos.ports().update(port).await.map_err(error_response)?;

    Ok(Json(ApiResponse::success(dto)))
}

/// Удаление порта (админ)
///
/// Удаляет порт вместе со всеми его бронированиями.
#[utoipa::path(
    delete,
    path = "/api/v1/ports/{port_id}",
    tag = "Ports",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("port_id" = String, Path, description = "Идентификатор порта")
    ),
    responses(
        (status = 200, description = "Порт удалён"),
        (status = 404, description = "Порт не найден"),
        (status = 403, description = "Требуется роль admin")
    )
)]
pub async fn delete_port(
    State(state): State<PortHandlerState>,
    Path(port_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .repos
        .ports()
        .delete(&port_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(())))
}
