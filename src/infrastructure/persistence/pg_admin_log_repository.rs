//! PostgreSQL implementation of the admin audit log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{AdminLog, NewAdminLog};
use crate::domain::repositories::AdminLogRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct AdminLogRow {
    id: i64,
    action: String,
    admin_name: String,
    timestamp: DateTime<Utc>,
}

impl From<AdminLogRow> for AdminLog {
    fn from(r: AdminLogRow) -> Self {
        AdminLog {
            id: r.id,
            action: r.action,
            admin_name: r.admin_name,
            timestamp: r.timestamp,
        }
    }
}

pub struct PgAdminLogRepository {
    pool: Arc<PgPool>,
}

impl PgAdminLogRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminLogRepository for PgAdminLogRepository {
    async fn create(&self, new_log: NewAdminLog) -> Result<AdminLog, AppError> {
        let row = sqlx::query_as::<_, AdminLogRow>(
            r#"
            INSERT INTO admin_logs (action, admin_name)
            VALUES ($1, $2)
            RETURNING id, action, admin_name, timestamp
            "#,
        )
        .bind(&new_log.action)
        .bind(&new_log.admin_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AdminLog>, AppError> {
        let row = sqlx::query_as::<_, AdminLogRow>(
            "SELECT id, action, admin_name, timestamp FROM admin_logs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<AdminLog>, AppError> {
        // LIMIT NULL means no limit in PostgreSQL.
        let rows = sqlx::query_as::<_, AdminLogRow>(
            r#"
            SELECT id, action, admin_name, timestamp
            FROM admin_logs
            ORDER BY timestamp DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_logs")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
