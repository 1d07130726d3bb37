//! PostgreSQL implementation of the earnings repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Earning, NewEarning, PaymentMethod, PaymentStatus};
use crate::domain::repositories::EarningRepository;
use crate::error::AppError;

const EARNING_SELECT: &str = "e.id, e.driver_id, u.first_name || ' ' || u.last_name AS driver_name, \
     e.amount, e.transaction_date, e.payment_method, e.payment_status";

const EARNING_JOIN: &str = "JOIN drivers d ON d.id = e.driver_id JOIN users u ON u.id = d.user_id";

#[derive(FromRow)]
struct EarningRow {
    id: i64,
    driver_id: i64,
    driver_name: String,
    amount: f64,
    transaction_date: DateTime<Utc>,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
}

impl From<EarningRow> for Earning {
    fn from(r: EarningRow) -> Self {
        Earning {
            id: r.id,
            driver_id: r.driver_id,
            driver_name: r.driver_name,
            amount: r.amount,
            transaction_date: r.transaction_date,
            payment_method: r.payment_method,
            payment_status: r.payment_status,
        }
    }
}

/// PostgreSQL repository for the earnings ledger.
pub struct PgEarningRepository {
    pool: Arc<PgPool>,
}

impl PgEarningRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EarningRepository for PgEarningRepository {
    async fn create(&self, new_earning: NewEarning) -> Result<Earning, AppError> {
        let row = sqlx::query_as::<_, EarningRow>(&format!(
            r#"
            WITH e AS (
                INSERT INTO earnings (driver_id, amount, transaction_date, payment_method, payment_status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {EARNING_SELECT} FROM e {EARNING_JOIN}
            "#
        ))
        .bind(new_earning.driver_id)
        .bind(new_earning.amount)
        .bind(new_earning.transaction_date)
        .bind(new_earning.payment_method)
        .bind(new_earning.payment_status)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Earning>, AppError> {
        let row = sqlx::query_as::<_, EarningRow>(&format!(
            "SELECT {EARNING_SELECT} FROM earnings e {EARNING_JOIN} WHERE e.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Earning>, AppError> {
        let rows = sqlx::query_as::<_, EarningRow>(&format!(
            "SELECT {EARNING_SELECT} FROM earnings e {EARNING_JOIN} ORDER BY e.id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_driver(&self, driver_id: i64) -> Result<Vec<Earning>, AppError> {
        let rows = sqlx::query_as::<_, EarningRow>(&format!(
            "SELECT {EARNING_SELECT} FROM earnings e {EARNING_JOIN} \
             WHERE e.driver_id = $1 ORDER BY e.transaction_date, e.id"
        ))
        .bind(driver_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Earning>, AppError> {
        let rows = sqlx::query_as::<_, EarningRow>(&format!(
            "SELECT {EARNING_SELECT} FROM earnings e {EARNING_JOIN} \
             WHERE e.transaction_date BETWEEN $1 AND $2 ORDER BY e.transaction_date, e.id"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_payment_status(
        &self,
        status: PaymentStatus,
    ) -> Result<Vec<Earning>, AppError> {
        let rows = sqlx::query_as::<_, EarningRow>(&format!(
            "SELECT {EARNING_SELECT} FROM earnings e {EARNING_JOIN} \
             WHERE e.payment_status = $1 ORDER BY e.id"
        ))
        .bind(status)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM earnings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
