//! Driver earnings ledger service.

use crate::domain::entities::{Earning, MIN_EARNING_AMOUNT, NewEarning, PaymentStatus};
use crate::domain::repositories::{DriverRepository, EarningRepository};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

pub struct EarningService<E: EarningRepository + ?Sized, D: DriverRepository + ?Sized> {
    earnings: Arc<E>,
    drivers: Arc<D>,
}

impl<E: EarningRepository + ?Sized, D: DriverRepository + ?Sized> EarningService<E, D> {
    pub fn new(earnings: Arc<E>, drivers: Arc<D>) -> Self {
        Self { earnings, drivers }
    }

    /// Records a payment for a driver.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the amount is below 0.01 or the
    /// transaction date lies in the future.
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    pub async fn create_earning(&self, new_earning: NewEarning) -> Result<Earning, AppError> {
        if !(new_earning.amount >= MIN_EARNING_AMOUNT) {
            return Err(AppError::bad_request(
                "Amount must be greater than or equal to 0.01",
                json!({ "field": "amount", "min": MIN_EARNING_AMOUNT }),
            ));
        }

        if new_earning.transaction_date > Utc::now() {
            return Err(AppError::bad_request(
                "Transaction date must be in the past or present",
                json!({ "field": "transactionDate" }),
            ));
        }

        if !self.drivers.exists(new_earning.driver_id).await? {
            return Err(AppError::entity_not_found("Driver", new_earning.driver_id));
        }

        let earning = self.earnings.create(new_earning).await?;
        tracing::info!(
            earning_id = earning.id,
            driver_id = earning.driver_id,
            amount = earning.amount,
            "earning recorded"
        );
        Ok(earning)
    }

    pub async fn list_earnings(&self) -> Result<Vec<Earning>, AppError> {
        self.earnings.list().await
    }

    pub async fn get_earning(&self, id: i64) -> Result<Earning, AppError> {
        self.earnings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Earning", id))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    pub async fn earnings_by_driver(&self, driver_id: i64) -> Result<Vec<Earning>, AppError> {
        if !self.drivers.exists(driver_id).await? {
            return Err(AppError::entity_not_found("Driver", driver_id));
        }
        self.earnings.list_by_driver(driver_id).await
    }

    /// Earnings with a transaction date in `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `start` is after `end`; the
    /// repository is not queried in that case.
    pub async fn earnings_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Earning>, AppError> {
        if start > end {
            tracing::debug!(%start, %end, "rejected inverted date range");
            return Err(AppError::bad_request(
                "Start date must be before end date",
                json!({ "start": start, "end": end }),
            ));
        }
        self.earnings.list_by_date_range(start, end).await
    }

    pub async fn earnings_by_status(
        &self,
        status: PaymentStatus,
    ) -> Result<Vec<Earning>, AppError> {
        self.earnings.list_by_payment_status(status).await
    }

    pub async fn count_earnings(&self) -> Result<i64, AppError> {
        self.earnings.count().await
    }
}
