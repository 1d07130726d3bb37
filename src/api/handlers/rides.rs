//! Handlers for ride ledger endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::ride::{CreateRideRequest, RideResponse, UpdateRideRequest};
use crate::api::extract::ValidatedJson;
use crate::domain::entities::Ride;
use crate::error::AppError;
use crate::state::AppState;

fn to_response(rides: Vec<Ride>) -> Json<Vec<RideResponse>> {
    Json(rides.into_iter().map(RideResponse::from).collect())
}

/// Records a ride.
///
/// # Endpoint
///
/// `POST /api/rides`
///
/// # Errors
///
/// Returns 404 if the passenger or the driver does not exist.
pub async fn create_ride_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRideRequest>,
) -> Result<(StatusCode, Json<RideResponse>), AppError> {
    let ride = state.ride_service.create_ride(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(ride.into())))
}

/// `GET /api/rides`
pub async fn list_rides_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    Ok(to_response(state.ride_service.list_rides().await?))
}

/// `GET /api/rides/{id}`
pub async fn get_ride_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<RideResponse>, AppError> {
    let ride = state.ride_service.get_ride(id).await?;

    Ok(Json(ride.into()))
}

/// Rides served by a driver.
///
/// # Endpoint
///
/// `GET /api/rides/driver/{driverId}`
///
/// # Errors
///
/// Returns 404 when the driver has no rides.
pub async fn rides_by_driver_handler(
    Path(driver_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    Ok(to_response(
        state.ride_service.rides_by_driver(driver_id).await?,
    ))
}

/// Rides taken by a passenger.
///
/// # Endpoint
///
/// `GET /api/rides/passenger/{passengerId}`
///
/// # Errors
///
/// Returns 404 when the passenger has no rides.
pub async fn rides_by_passenger_handler(
    Path(passenger_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    Ok(to_response(
        state.ride_service.rides_by_passenger(passenger_id).await?,
    ))
}

/// Completed rides of a passenger.
///
/// # Endpoint
///
/// `GET /api/rides/history/passenger/{id}`
pub async fn passenger_history_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    Ok(to_response(state.ride_service.passenger_history(id).await?))
}

/// Completed rides of a driver.
///
/// # Endpoint
///
/// `GET /api/rides/history/driver/{id}`
pub async fn driver_history_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    Ok(to_response(state.ride_service.driver_history(id).await?))
}

/// `GET /api/rides/cancelled`
pub async fn cancelled_rides_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    Ok(to_response(state.ride_service.cancelled_rides().await?))
}

/// Rides with a customer rating below 3 or feedback mentioning a complaint.
///
/// # Endpoint
///
/// `GET /api/rides/complaints`
pub async fn complaint_rides_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    Ok(to_response(state.ride_service.rides_with_complaints().await?))
}

/// `GET /api/rides/feedback`
pub async fn feedback_rides_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    Ok(to_response(state.ride_service.rides_with_feedback().await?))
}

/// Partially updates a ride.
///
/// # Endpoint
///
/// `PUT /api/rides/{id}`
///
/// A `passengerId` or `driverId` that differs from the current one must
/// reference an existing record.
///
/// # Errors
///
/// Returns 404 if the ride or a newly referenced passenger or driver is missing.
pub async fn update_ride_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateRideRequest>,
) -> Result<Json<RideResponse>, AppError> {
    let ride = state.ride_service.update_ride(id, payload.into()).await?;

    Ok(Json(ride.into()))
}

/// `DELETE /api/rides/{id}`
pub async fn delete_ride_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.ride_service.delete_ride(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
