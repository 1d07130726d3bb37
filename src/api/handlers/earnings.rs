//! Handlers for earnings ledger endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::api::dto::earning::{
    CreateEarningRequest, DateRangeQuery, EarningResponse, parse_timestamp,
};
use crate::api::extract::ValidatedJson;
use crate::domain::entities::{Earning, PaymentStatus};
use crate::error::AppError;
use crate::state::AppState;

fn to_response(earnings: Vec<Earning>) -> Json<Vec<EarningResponse>> {
    Json(earnings.into_iter().map(EarningResponse::from).collect())
}

fn required_timestamp(name: &str, value: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    let raw = value.ok_or_else(|| {
        AppError::bad_request(
            format!("Query parameter '{name}' is required"),
            json!({ "field": name }),
        )
    })?;

    parse_timestamp(raw).ok_or_else(|| {
        AppError::bad_request(
            format!("Query parameter '{name}' is not a valid timestamp"),
            json!({ "field": name, "value": raw }),
        )
    })
}

/// Records a payment for a driver.
///
/// # Endpoint
///
/// `POST /api/earnings`
///
/// # Errors
///
/// Returns 400 if the amount is below 0.01 or the date is in the future.
/// Returns 404 if the driver does not exist.
pub async fn create_earning_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEarningRequest>,
) -> Result<(StatusCode, Json<EarningResponse>), AppError> {
    let earning = state.earning_service.create_earning(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(earning.into())))
}

/// `GET /api/earnings`
pub async fn list_earnings_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<EarningResponse>>, AppError> {
    Ok(to_response(state.earning_service.list_earnings().await?))
}

/// `GET /api/earnings/{id}`
pub async fn get_earning_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<EarningResponse>, AppError> {
    let earning = state.earning_service.get_earning(id).await?;

    Ok(Json(earning.into()))
}

/// `GET /api/earnings/driver/{driverId}`
pub async fn earnings_by_driver_handler(
    Path(driver_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<EarningResponse>>, AppError> {
    Ok(to_response(
        state.earning_service.earnings_by_driver(driver_id).await?,
    ))
}

/// Earnings with a transaction date inside an inclusive range.
///
/// # Endpoint
///
/// `GET /api/earnings/date-range?start=...&end=...`
///
/// Bounds are RFC 3339 timestamps, or `YYYY-MM-DDTHH:MM:SS` read as UTC.
///
/// # Errors
///
/// Returns 400 if a bound is missing or malformed, or if `start` is after `end`.
pub async fn earnings_by_date_range_handler(
    Query(query): Query<DateRangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<EarningResponse>>, AppError> {
    let start = required_timestamp("start", query.start.as_deref())?;
    let end = required_timestamp("end", query.end.as_deref())?;

    Ok(to_response(
        state.earning_service.earnings_by_date_range(start, end).await?,
    ))
}

/// `GET /api/earnings/status/{status}`
///
/// # Errors
///
/// Returns 400 for a status outside `PENDING`, `PAID`, `UNPAID`,
/// `COMPLETED`, `FAILED`.
pub async fn earnings_by_status_handler(
    Path(status): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<EarningResponse>>, AppError> {
    let status: PaymentStatus = status.parse().map_err(|_| {
        AppError::bad_request(
            format!("Unknown payment status '{status}'"),
            json!({ "allowed": PaymentStatus::ALL.map(|s| s.as_str()) }),
        )
    })?;

    Ok(to_response(
        state.earning_service.earnings_by_status(status).await?,
    ))
}
