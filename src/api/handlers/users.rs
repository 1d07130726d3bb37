//! Handlers for user account endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a user account.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Errors
///
/// Returns 400 if the body is malformed or fails validation.
/// Returns 409 if the email or phone number is already registered.
pub async fn create_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.user_service.create_user(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `GET /api/users`
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// `GET /api/users/{id}`
pub async fn get_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user(id).await?;

    Ok(Json(user.into()))
}

/// Partially updates a user.
///
/// # Endpoint
///
/// `PUT /api/users/{id}`
///
/// Only fields present in the body are changed. A new password is hashed
/// before it is stored.
///
/// # Errors
///
/// Returns 404 if the user does not exist.
/// Returns 409 if a changed email or phone number belongs to another user.
pub async fn update_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.update_user(id, payload.into()).await?;

    Ok(Json(user.into()))
}

/// `DELETE /api/users/{id}`
pub async fn delete_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
