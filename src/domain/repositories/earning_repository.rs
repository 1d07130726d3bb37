//! Repository trait for the earnings ledger.

use crate::domain::entities::{Earning, NewEarning, PaymentStatus};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence contract for [`Earning`] records.
///
/// Reads join the owning driver's user to fill in `driver_name`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EarningRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    async fn create(&self, new_earning: NewEarning) -> Result<Earning, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Earning>, AppError>;

    async fn list(&self) -> Result<Vec<Earning>, AppError>;

    async fn list_by_driver(&self, driver_id: i64) -> Result<Vec<Earning>, AppError>;

    /// Earnings with `start <= transaction_date <= end`.
    async fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Earning>, AppError>;

    async fn list_by_payment_status(&self, status: PaymentStatus)
    -> Result<Vec<Earning>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
