//! Application error type and its HTTP mapping.
//!
//! Every failure raised by services and repositories is an [`AppError`]. The
//! variant decides the status code; the response body always has the shape
//!
//! ```json
//! { "error": { "code": "not_found", "message": "User not found", "details": { "id": 7 } } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing input. 400.
    Validation { message: String, details: Value },
    /// Referenced entity does not exist. 404.
    NotFound { message: String, details: Value },
    /// Duplicate value or business rule violation. 409.
    Conflict { message: String, details: Value },
    /// Attempt to change a field the caller may not change. 403.
    Forbidden { message: String, details: Value },
    /// Anything unexpected. 500.
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Shorthand for the `"<Entity> not found"` error every resource raises.
    pub fn entity_not_found(entity: &str, id: i64) -> Self {
        Self::not_found(format!("{entity} not found"), json!({ "id": id }))
    }

    /// Shorthand for a uniqueness violation on a single field.
    pub fn duplicate(entity: &str, field: &str, value: impl fmt::Display) -> Self {
        Self::conflict(
            format!("{entity} with {field} '{value}' already exists"),
            json!({ "field": field }),
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Forbidden { .. } => "forbidden",
            AppError::Internal { .. } => "internal_error",
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }

    pub fn to_error_info(self) -> ErrorInfo {
        let code = self.code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Forbidden { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let messages: Vec<Value> = errs
                    .iter()
                    .map(|err| {
                        json!({
                            "code": err.code,
                            "message": err.message,
                        })
                    })
                    .collect();
                (field.to_string(), Value::Array(messages))
            })
            .collect::<serde_json::Map<_, _>>();

        AppError::bad_request("Validation failed", Value::Object(details))
    }
}

/// Translates database errors into the application taxonomy.
///
/// Unique violations become 409 with the constraint name, foreign key
/// violations become 404. Everything else is logged and surfaced as an opaque 500.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        if db.is_foreign_key_violation() {
            return AppError::not_found(
                "Referenced entity not found",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    if matches!(e, sqlx::Error::RowNotFound) {
        return AppError::not_found("Record not found", json!({}));
    }

    tracing::error!(error = %e, "database error");
    AppError::internal("Database error", json!({}))
}
