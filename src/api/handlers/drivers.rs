//! Handlers for driver registry endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::driver::{DriverResponse, RegisterDriverRequest, UpdateDriverRequest};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a driver profile for an existing user.
///
/// # Endpoint
///
/// `POST /api/drivers/register`
///
/// The profile starts in `PENDING` verification with zeroed rating,
/// earnings and ride count.
///
/// # Errors
///
/// Returns 409 if the license number is taken or the user already drives.
/// Returns 404 if the user does not exist.
pub async fn register_driver_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterDriverRequest>,
) -> Result<(StatusCode, Json<DriverResponse>), AppError> {
    let driver = state.driver_service.register_driver(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(driver.into())))
}

/// `GET /api/drivers`
pub async fn list_drivers_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let drivers = state.driver_service.list_drivers().await?;

    Ok(Json(drivers.into_iter().map(DriverResponse::from).collect()))
}

/// `GET /api/drivers/{id}`
pub async fn get_driver_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DriverResponse>, AppError> {
    let driver = state.driver_service.get_driver(id).await?;

    Ok(Json(driver.into()))
}

/// Partially updates a driver profile.
///
/// # Endpoint
///
/// `PUT /api/drivers/{id}`
///
/// # Errors
///
/// Returns 403 if `userId` names a different owner.
/// Returns 404 if the driver does not exist.
/// Returns 409 if a new license number belongs to another driver.
pub async fn update_driver_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateDriverRequest>,
) -> Result<Json<DriverResponse>, AppError> {
    let driver = state
        .driver_service
        .update_driver(id, payload.into())
        .await?;

    Ok(Json(driver.into()))
}

/// `DELETE /api/drivers/{id}`
pub async fn delete_driver_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.driver_service.delete_driver(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Marks a driver as verified.
///
/// # Endpoint
///
/// `PUT /api/drivers/{id}/verify`
pub async fn verify_driver_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DriverResponse>, AppError> {
    let driver = state.driver_service.verify_driver(id).await?;

    Ok(Json(driver.into()))
}

/// Marks a driver as rejected.
///
/// # Endpoint
///
/// `PUT /api/drivers/{id}/reject`
pub async fn reject_driver_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DriverResponse>, AppError> {
    let driver = state.driver_service.reject_driver(id).await?;

    Ok(Json(driver.into()))
}
