//! Booking API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{ApiResponse, ValidatedJson};
use crate::api::handlers::error_response;
use crate::application::services::{BookingService, CreateBookingCommand};
use crate::auth::AuthenticatedUser;
use crate::domain::booking::{Booking, TimeSlot};
use crate::domain::estimate::ChargeEstimate;

/// State for booking handlers
#[derive(Clone)]
pub struct BookingHandlerState {
    pub service: Arc<BookingService>,
}

/// Бронирование
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    /// Человекочитаемый номер, например `EV0001`
    #[schema(example = "EV0001")]
    pub reference: String,
    pub customer_name: String,
    pub customer_email: String,
    pub port_id: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub charger_type: String,
    /// Дата бронирования, `YYYY-MM-DD`
    pub booking_date: String,
    /// Временной слот, `HH:MM`
    #[schema(example = "09:00")]
    pub time_slot: String,
    /// Ёмкость батареи, кВт·ч
    pub battery_kwh: f64,
    /// Расчётная длительность зарядки, часы (полная точность)
    pub duration_hours: f64,
    /// Стоимость, целые единицы валюты
    pub cost: i64,
    /// Статус оплаты: `pending` или `paid`
    pub payment_status: String,
    pub created_at: String,
}

impl BookingDto {
    fn from_booking(b: Booking) -> Self {
        Self {
            reference: b.reference,
            customer_name: b.customer_name,
            customer_email: b.customer_email,
            port_id: b.port_id,
            vehicle_type: b.vehicle_type,
            vehicle_model: b.vehicle_model,
            charger_type: b.charger_type,
            booking_date: b.booking_date.to_string(),
            time_slot: b.time_slot.as_str().to_string(),
            battery_kwh: b.battery_kwh,
            duration_hours: b.duration_hours,
            cost: b.cost,
            payment_status: b.payment_status.as_str().to_string(),
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// Запрос на бронирование
///
/// Имя и email клиента берутся из токена, не из тела запроса.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "port_id": "STN-001",
    "vehicle_type": "car",
    "vehicle_model": "Tata Nexon EV",
    "charger_type": "fast",
    "booking_date": "2026-09-01",
    "time_slot": "09:00"
}))]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 50))]
    pub port_id: String,
    /// Тип транспорта, например `car` или `bike`
    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: String,
    /// Модель из каталога (см. `GET /api/v1/vehicles`)
    #[validate(length(min = 1, max = 100))]
    pub vehicle_model: String,
    /// Тип разъёма, предлагаемый портом
    #[validate(length(min = 1, max = 50))]
    pub charger_type: String,
    /// Дата, `YYYY-MM-DD`
    pub booking_date: String,
    /// Слот, `HH:MM` (09:00–18:00)
    pub time_slot: String,
}

/// Запрос на предварительный расчёт
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EstimateRequest {
    #[validate(length(min = 1, max = 50))]
    pub port_id: String,
    #[validate(length(min = 1, max = 100))]
    pub vehicle_model: String,
    #[validate(length(min = 1, max = 50))]
    pub charger_type: String,
}

/// Расчёт стоимости зарядки
#[derive(Debug, Serialize, ToSchema)]
pub struct EstimateResponse {
    /// Ёмкость батареи, кВт·ч (0 для неизвестной модели)
    pub battery_kwh: f64,
    /// Длительность зарядки, часы
    pub duration_hours: f64,
    /// Тариф за час зарядки
    pub rate_per_hour: f64,
    /// Итоговая стоимость, округлена до целого
    pub cost: i64,
}

impl EstimateResponse {
    fn from_estimate(e: ChargeEstimate) -> Self {
        Self {
            battery_kwh: e.battery_kwh,
            duration_hours: e.duration_hours,
            rate_per_hour: e.rate_per_hour,
            cost: e.cost,
        }
    }
}

fn parse_date_and_slot(
    date: &str,
    slot: &str,
) -> Result<(NaiveDate, TimeSlot), (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let date: NaiveDate = date.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Invalid booking_date, expected YYYY-MM-DD")),
        )
    })?;
    let slot = TimeSlot::parse(slot).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "Invalid time_slot, expected one of 09:00..18:00 on the hour",
            )),
        )
    })?;
    Ok((date, slot))
}

/// Создание бронирования
///
/// Порт, дата и слот образуют уникальную комбинацию: если слот уже
/// занят — вернётся 409. Стоимость и длительность всегда
/// пересчитываются на сервере.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Бронирование создано", body = ApiResponse<BookingDto>),
        (status = 409, description = "Слот уже занят"),
        (status = 404, description = "Порт не найден"),
        (status = 400, description = "Невалидные дата, слот или тип разъёма")
    )
)]
pub async fn create_booking(
    State(state): State<BookingHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<BookingDto>>)>
{
    let (booking_date, time_slot) = parse_date_and_slot(&request.booking_date, &request.time_slot)?;

    let booking = state
        .service
        .create(
            &auth.name,
            &auth.email,
            CreateBookingCommand {
                port_id: request.port_id,
                vehicle_type: request.vehicle_type,
                vehicle_model: request.vehicle_model,
                charger_type: request.charger_type,
                booking_date,
                time_slot,
            },
        )
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from_booking(booking))),
    ))
}

/// Список бронирований
///
/// Администратор видит все бронирования, клиент — только свои.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Список бронирований", body = ApiResponse<Vec<BookingDto>>),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn list_bookings(
    State(state): State<BookingHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)> {
    let bookings = state
        .service
        .list_for(&auth.email, auth.is_admin())
        .await
        .map_err(error_response)?;

    let dtos = bookings.into_iter().map(BookingDto::from_booking).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Информация о бронировании
///
/// Клиент может запросить только своё бронирование.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{reference}",
    tag = "Bookings",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("reference" = String, Path, description = "Номер бронирования, например EV0001")
    ),
    responses(
        (status = 200, description = "Бронирование найдено", body = ApiResponse<BookingDto>),
        (status = 404, description = "Бронирование не найдено"),
        (status = 403, description = "Чужое бронирование")
    )
)]
pub async fn get_booking(
    State(state): State<BookingHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .service
        .get(&reference, &auth.email, auth.is_admin())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(BookingDto::from_booking(booking))))
}

/// Отмена бронирования
///
/// Клиент может отменить только своё бронирование, администратор — любое.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{reference}",
    tag = "Bookings",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("reference" = String, Path, description = "Номер бронирования")
    ),
    responses(
        (status = 200, description = "Бронирование отменено"),
        (status = 404, description = "Бронирование не найдено"),
        (status = 403, description = "Чужое бронирование")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .service
        .cancel(&reference, &auth.email, auth.is_admin())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}

/// Предварительный расчёт стоимости
///
/// Не создаёт бронирование. Возвращает те же цифры, которые будут
/// зафиксированы при создании.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/estimate",
    tag = "Bookings",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Расчёт стоимости", body = ApiResponse<EstimateResponse>),
        (status = 404, description = "Порт не найден"),
        (status = 400, description = "Порт не предлагает такой тип разъёма")
    )
)]
pub async fn estimate(
    State(state): State<BookingHandlerState>,
    ValidatedJson(request): ValidatedJson<EstimateRequest>,
) -> Result<Json<ApiResponse<EstimateResponse>>, (StatusCode, Json<ApiResponse<EstimateResponse>>)>
{
    let estimate = state
        .service
        .estimate(&request.port_id, &request.vehicle_model, &request.charger_type)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(EstimateResponse::from_estimate(
        estimate,
    ))))
}

/// Отметка об оплате
///
/// Помечает бронирование как оплаченное. Доступно владельцу и
/// администратору.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{reference}/pay",
    tag = "Bookings",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("reference" = String, Path, description = "Номер бронирования")
    ),
    responses(
        (status = 200, description = "Бронирование оплачено", body = ApiResponse<BookingDto>),
        (status = 404, description = "Бронирование не найдено"),
        (status = 403, description = "Чужое бронирование")
    )
)]
pub async fn pay_booking(
    State(state): State<BookingHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(reference): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    // Visibility check first, so a foreign reference yields 403, not 200
    state
        .service
        .get(&reference, &auth.email, auth.is_admin())
        .await
        .map_err(error_response)?;

    state
        .service
        .mark_paid(&reference)
        .await
        .map_err(error_response)?;

    let booking = state
        .service
        .get(&reference, &auth.email, auth.is_admin())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(BookingDto::from_booking(booking))))
}
