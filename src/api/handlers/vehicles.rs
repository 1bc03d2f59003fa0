//! Vehicle catalog endpoint

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::domain::estimate::VEHICLE_CATALOG;

/// Модель электротранспорта из каталога
#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleDto {
    /// Название модели
    #[schema(example = "Tata Nexon EV")]
    pub model: String,
    /// Ёмкость батареи, кВт·ч
    #[schema(example = 30.2)]
    pub battery_kwh: f64,
}

/// Каталог поддерживаемых моделей
///
/// Статический список моделей с ёмкостью батареи. Используется
/// клиентом для выбора модели при бронировании.
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Каталог моделей", body = ApiResponse<Vec<VehicleDto>>)
    )
)]
pub async fn list_vehicles() -> Json<ApiResponse<Vec<VehicleDto>>> {
    let vehicles = VEHICLE_CATALOG
        .iter()
        .map(|(model, battery_kwh)| VehicleDto {
            model: model.to_string(),
            battery_kwh: *battery_kwh,
        })
        .collect();
    Json(ApiResponse::success(vehicles))
}
