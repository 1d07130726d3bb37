//! Driver registration, profile maintenance and verification.

use crate::domain::entities::{Driver, DriverPatch, DriverRegistration, DriverStatus, NewDriver};
use crate::domain::repositories::{DriverRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Service for driver profiles.
///
/// Consults the user repository to resolve the owning account on registration.
pub struct DriverService<D: DriverRepository + ?Sized, U: UserRepository + ?Sized> {
    drivers: Arc<D>,
    users: Arc<U>,
}

/// Per-status driver counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStatusCounts {
    pub pending: i64,
    pub verified: i64,
    pub rejected: i64,
}

impl DriverStatusCounts {
    pub fn total(&self) -> i64 {
        self.pending + self.verified + self.rejected
    }
}

impl<D: DriverRepository + ?Sized, U: UserRepository + ?Sized> DriverService<D, U> {
    pub fn new(drivers: Arc<D>, users: Arc<U>) -> Self {
        Self { drivers, users }
    }

    /// Registers a driver profile for an existing user.
    ///
    /// Checks run in order: license number uniqueness, owning user exists,
    /// user has no profile yet. The new profile starts `PENDING`, offline and
    /// unavailable, with a zeroed rating and earnings summary.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a duplicate license or an existing profile.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn register_driver(&self, registration: DriverRegistration) -> Result<Driver, AppError> {
        if self
            .drivers
            .exists_by_license_number(&registration.license_number)
            .await?
        {
            tracing::warn!(license = %registration.license_number, "duplicate license number");
            return Err(AppError::duplicate(
                "Driver",
                "license number",
                &registration.license_number,
            ));
        }

        let user_id = registration.user_id;
        if !self.users.exists(user_id).await? {
            return Err(AppError::entity_not_found("User", user_id));
        }

        if self.drivers.find_by_user_id(user_id).await?.is_some() {
            tracing::warn!(user_id, "user already has a driver profile");
            return Err(AppError::conflict(
                "User already has a driver profile",
                json!({ "userId": user_id }),
            ));
        }

        let driver = self
            .drivers
            .create(NewDriver::from_registration(registration))
            .await?;

        tracing::info!(driver_id = driver.id, user_id, "driver registered");
        Ok(driver)
    }

    pub async fn list_drivers(&self) -> Result<Vec<Driver>, AppError> {
        self.drivers.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    pub async fn get_driver(&self, id: i64) -> Result<Driver, AppError> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Driver", id))
    }

    /// Applies a partial update to a driver profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    /// Returns [`AppError::Forbidden`] if the patch names a different owning user.
    /// Returns [`AppError::Conflict`] if a changed license number belongs to
    /// another driver.
    pub async fn update_driver(&self, id: i64, patch: DriverPatch) -> Result<Driver, AppError> {
        let mut driver = self.get_driver(id).await?;

        if let Some(user_id) = patch.user_id
            && user_id != driver.owner.user_id
        {
            tracing::warn!(
                driver_id = id,
                owner = driver.owner.user_id,
                requested = user_id,
                "attempt to reassign driver owner"
            );
            return Err(AppError::forbidden(
                "Changing the owning user of a driver is not allowed",
                json!({ "field": "userId" }),
            ));
        }

        if let Some(license) = patch.license_number.as_deref()
            && license != driver.license_number
            && self.drivers.exists_by_license_number(license).await?
        {
            return Err(AppError::duplicate("Driver", "license number", license));
        }

        patch.apply_to(&mut driver);

        let updated = self.drivers.update(&driver).await?;
        tracing::info!(driver_id = id, "driver updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist; no delete is issued.
    pub async fn delete_driver(&self, id: i64) -> Result<(), AppError> {
        if !self.drivers.exists(id).await? {
            return Err(AppError::entity_not_found("Driver", id));
        }

        self.drivers.delete(id).await?;
        tracing::info!(driver_id = id, "driver deleted");
        Ok(())
    }

    /// Marks a driver `VERIFIED`.
    pub async fn verify_driver(&self, id: i64) -> Result<Driver, AppError> {
        self.set_status(id, DriverStatus::Verified).await
    }

    /// Marks a driver `REJECTED`.
    pub async fn reject_driver(&self, id: i64) -> Result<Driver, AppError> {
        self.set_status(id, DriverStatus::Rejected).await
    }

    async fn set_status(&self, id: i64, status: DriverStatus) -> Result<Driver, AppError> {
        if !self.drivers.exists(id).await? {
            return Err(AppError::entity_not_found("Driver", id));
        }

        let driver = self.drivers.update_status(id, status).await?;
        tracing::info!(driver_id = id, status = %status, "driver verification status changed");
        Ok(driver)
    }

    pub async fn count_drivers(&self) -> Result<i64, AppError> {
        self.drivers.count().await
    }

    pub async fn count_by_status(&self) -> Result<DriverStatusCounts, AppError> {
        Ok(DriverStatusCounts {
            pending: self.drivers.count_by_status(DriverStatus::Pending).await?,
            verified: self.drivers.count_by_status(DriverStatus::Verified).await?,
            rejected: self.drivers.count_by_status(DriverStatus::Rejected).await?,
        })
    }
}
