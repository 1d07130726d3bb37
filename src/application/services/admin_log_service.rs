//! Admin audit log service.

use crate::domain::entities::{AdminLog, NewAdminLog};
use crate::domain::repositories::AdminLogRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Append-only audit trail of administrative actions.
pub struct AdminLogService<R: AdminLogRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: AdminLogRepository + ?Sized> AdminLogService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Entries newest first, at most `limit` of them when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is negative; the repository
    /// is not queried in that case.
    pub async fn list_logs(&self, limit: Option<i64>) -> Result<Vec<AdminLog>, AppError> {
        if let Some(limit) = limit
            && limit < 0
        {
            return Err(AppError::bad_request(
                "Limit must not be negative",
                json!({ "field": "limit", "value": limit }),
            ));
        }
        self.repository.list(limit).await
    }

    pub async fn get_log(&self, id: i64) -> Result<AdminLog, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("AdminLog", id))
    }

    /// Appends an entry. The timestamp is assigned on insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the action or admin name is blank.
    pub async fn add_log(&self, new_log: NewAdminLog) -> Result<AdminLog, AppError> {
        Self::check_entry(&new_log)?;

        let log = self.repository.create(new_log).await?;
        tracing::info!(log_id = log.id, admin = %log.admin_name, action = %log.action, "admin action logged");
        Ok(log)
    }

    /// Checks an entry without writing it, so a caller can validate the
    /// audit record before performing the action it describes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the action or admin name is blank.
    pub fn check_entry(entry: &NewAdminLog) -> Result<(), AppError> {
        if entry.action.trim().is_empty() {
            return Err(AppError::bad_request(
                "Action cannot be blank",
                json!({ "field": "action" }),
            ));
        }
        if entry.admin_name.trim().is_empty() {
            return Err(AppError::bad_request(
                "Admin name cannot be blank",
                json!({ "field": "adminName" }),
            ));
        }
        Ok(())
    }

    pub async fn count_logs(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
