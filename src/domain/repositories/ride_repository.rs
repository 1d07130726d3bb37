//! Repository trait for ride records.

use crate::domain::entities::{NewRide, Ride, RideStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence contract for [`Ride`] records.
///
/// All list queries return rides ordered by ID.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Inserts a ride. A `None` creation time is stamped by the database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the passenger or driver vanished
    /// between validation and insert.
    async fn create(&self, new_ride: NewRide) -> Result<Ride, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Ride>, AppError>;

    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    async fn list(&self) -> Result<Vec<Ride>, AppError>;

    async fn list_by_driver(&self, driver_id: i64) -> Result<Vec<Ride>, AppError>;

    async fn list_by_passenger(&self, passenger_id: i64) -> Result<Vec<Ride>, AppError>;

    async fn list_by_passenger_and_status(
        &self,
        passenger_id: i64,
        status: RideStatus,
    ) -> Result<Vec<Ride>, AppError>;

    async fn list_by_driver_and_status(
        &self,
        driver_id: i64,
        status: RideStatus,
    ) -> Result<Vec<Ride>, AppError>;

    async fn list_by_status(&self, status: RideStatus) -> Result<Vec<Ride>, AppError>;

    /// Rides whose customer rating is below `max_rating` or whose customer
    /// feedback contains `keyword`, ignoring case.
    async fn list_with_complaints(
        &self,
        max_rating: i32,
        keyword: &str,
    ) -> Result<Vec<Ride>, AppError>;

    /// Rides carrying customer or driver feedback.
    async fn list_with_feedback(&self) -> Result<Vec<Ride>, AppError>;

    /// Writes every column of `ride` back to its row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row or a referenced user/driver
    /// no longer exists.
    async fn update(&self, ride: &Ride) -> Result<Ride, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ride does not exist.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
