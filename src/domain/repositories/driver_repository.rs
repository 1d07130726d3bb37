//! Repository trait for driver profiles.

use crate::domain::entities::{Driver, DriverStatus, NewDriver};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence contract for [`Driver`] profiles.
///
/// Every returned [`Driver`] carries its owning user's name and email.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDriverRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_driver.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Inserts a new driver profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has a profile or the
    /// license number is taken.
    /// Returns [`AppError::NotFound`] if the owning user does not exist.
    async fn create(&self, new_driver: NewDriver) -> Result<Driver, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Driver>, AppError>;

    /// Finds the driver profile owned by a user, if any.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Driver>, AppError>;

    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    async fn exists_by_license_number(&self, license_number: &str) -> Result<bool, AppError>;

    async fn list(&self) -> Result<Vec<Driver>, AppError>;

    /// Writes the mutable profile columns of `driver` back to its row.
    ///
    /// Neither the owner nor the verification status is written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row no longer exists.
    /// Returns [`AppError::Conflict`] if the license number collides.
    async fn update(&self, driver: &Driver) -> Result<Driver, AppError>;

    /// Sets the verification status only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    async fn update_status(&self, id: i64, status: DriverStatus) -> Result<Driver, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    async fn count_by_status(&self, status: DriverStatus) -> Result<i64, AppError>;
}
