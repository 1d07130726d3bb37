//! Handlers for the admin audit log.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::admin_log::{AdminLogListQuery, AdminLogResponse, CreateAdminLogRequest};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Lists entries newest first.
///
/// # Endpoint
///
/// `GET /api/admin-logs[?limit=N]`
pub async fn list_admin_logs_handler(
    Query(query): Query<AdminLogListQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminLogResponse>>, AppError> {
    let logs = state.admin_log_service.list_logs(query.limit).await?;

    Ok(Json(logs.into_iter().map(AdminLogResponse::from).collect()))
}

/// `GET /api/admin-logs/{id}`
pub async fn get_admin_log_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<AdminLogResponse>, AppError> {
    let log = state.admin_log_service.get_log(id).await?;

    Ok(Json(log.into()))
}

/// Appends an entry stamped with the server time.
///
/// # Endpoint
///
/// `POST /api/admin-logs`
pub async fn create_admin_log_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAdminLogRequest>,
) -> Result<(StatusCode, Json<AdminLogResponse>), AppError> {
    let log = state.admin_log_service.add_log(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(log.into())))
}
