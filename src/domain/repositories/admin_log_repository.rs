//! Repository trait for the admin audit log.

use crate::domain::entities::{AdminLog, NewAdminLog};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store of [`AdminLog`] entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminLogRepository: Send + Sync {
    /// Appends an entry stamped with the current time.
    async fn create(&self, new_log: NewAdminLog) -> Result<AdminLog, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<AdminLog>, AppError>;

    /// Entries newest first, optionally capped at `limit`.
    async fn list(&self, limit: Option<i64>) -> Result<Vec<AdminLog>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
