//! Ride ledger service.

use crate::domain::entities::{
    COMPLAINT_KEYWORD, COMPLAINT_RATING_THRESHOLD, NewRide, Ride, RidePatch, RideStatus,
};
use crate::domain::repositories::{DriverRepository, RideRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Service for ride records.
///
/// Passenger and driver references are resolved against their repositories
/// before any ride is written. Status changes are stored as given.
pub struct RideService<R, U, D>
where
    R: RideRepository + ?Sized,
    U: UserRepository + ?Sized,
    D: DriverRepository + ?Sized,
{
    rides: Arc<R>,
    users: Arc<U>,
    drivers: Arc<D>,
}

impl<R, U, D> RideService<R, U, D>
where
    R: RideRepository + ?Sized,
    U: UserRepository + ?Sized,
    D: DriverRepository + ?Sized,
{
    pub fn new(rides: Arc<R>, users: Arc<U>, drivers: Arc<D>) -> Self {
        Self {
            rides,
            users,
            drivers,
        }
    }

    async fn ensure_passenger(&self, passenger_id: i64) -> Result<(), AppError> {
        if self.users.exists(passenger_id).await? {
            Ok(())
        } else {
            Err(AppError::entity_not_found("User", passenger_id))
        }
    }

    async fn ensure_driver(&self, driver_id: i64) -> Result<(), AppError> {
        if self.drivers.exists(driver_id).await? {
            Ok(())
        } else {
            Err(AppError::entity_not_found("Driver", driver_id))
        }
    }

    /// Records a ride.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the passenger or the driver does not exist.
    pub async fn create_ride(&self, new_ride: NewRide) -> Result<Ride, AppError> {
        self.ensure_passenger(new_ride.passenger_id).await?;
        self.ensure_driver(new_ride.driver_id).await?;

        let ride = self.rides.create(new_ride).await?;
        tracing::info!(
            ride_id = ride.id,
            passenger_id = ride.passenger_id,
            driver_id = ride.driver_id,
            status = ?ride.status,
            "ride created"
        );
        Ok(ride)
    }

    pub async fn list_rides(&self) -> Result<Vec<Ride>, AppError> {
        self.rides.list().await
    }

    pub async fn get_ride(&self, id: i64) -> Result<Ride, AppError> {
        self.rides
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Ride", id))
    }

    /// All rides of a driver.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver has no rides.
    pub async fn rides_by_driver(&self, driver_id: i64) -> Result<Vec<Ride>, AppError> {
        let rides = self.rides.list_by_driver(driver_id).await?;
        if rides.is_empty() {
            return Err(AppError::not_found(
                "No rides found for driver",
                json!({ "driverId": driver_id }),
            ));
        }
        Ok(rides)
    }

    /// All rides of a passenger.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the passenger has no rides.
    pub async fn rides_by_passenger(&self, passenger_id: i64) -> Result<Vec<Ride>, AppError> {
        let rides = self.rides.list_by_passenger(passenger_id).await?;
        if rides.is_empty() {
            return Err(AppError::not_found(
                "No rides found for passenger",
                json!({ "passengerId": passenger_id }),
            ));
        }
        Ok(rides)
    }

    /// Completed rides of a passenger. May be empty.
    pub async fn passenger_history(&self, passenger_id: i64) -> Result<Vec<Ride>, AppError> {
        self.rides
            .list_by_passenger_and_status(passenger_id, RideStatus::Completed)
            .await
    }

    /// Completed rides of a driver. May be empty.
    pub async fn driver_history(&self, driver_id: i64) -> Result<Vec<Ride>, AppError> {
        self.rides
            .list_by_driver_and_status(driver_id, RideStatus::Completed)
            .await
    }

    pub async fn cancelled_rides(&self) -> Result<Vec<Ride>, AppError> {
        self.rides.list_by_status(RideStatus::Cancelled).await
    }

    /// Rides rated below 3 or whose customer feedback mentions a complaint.
    pub async fn rides_with_complaints(&self) -> Result<Vec<Ride>, AppError> {
        self.rides
            .list_with_complaints(COMPLAINT_RATING_THRESHOLD, COMPLAINT_KEYWORD)
            .await
    }

    pub async fn rides_with_feedback(&self) -> Result<Vec<Ride>, AppError> {
        self.rides.list_with_feedback().await
    }

    /// Applies a partial update.
    ///
    /// A passenger or driver id in the patch is validated only when it differs
    /// from the current association.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ride, or a newly referenced
    /// passenger or driver, does not exist.
    pub async fn update_ride(&self, id: i64, patch: RidePatch) -> Result<Ride, AppError> {
        let mut ride = self.get_ride(id).await?;

        if let Some(passenger_id) = patch.passenger_id
            && passenger_id != ride.passenger_id
        {
            self.ensure_passenger(passenger_id).await?;
        }

        if let Some(driver_id) = patch.driver_id
            && driver_id != ride.driver_id
        {
            self.ensure_driver(driver_id).await?;
        }

        patch.apply_to(&mut ride);

        let updated = self.rides.update(&ride).await?;
        tracing::info!(ride_id = id, status = ?updated.status, "ride updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ride does not exist; no delete is issued.
    pub async fn delete_ride(&self, id: i64) -> Result<(), AppError> {
        if !self.rides.exists(id).await? {
            return Err(AppError::entity_not_found("Ride", id));
        }

        self.rides.delete(id).await?;
        tracing::info!(ride_id = id, "ride deleted");
        Ok(())
    }

    pub async fn count_rides(&self) -> Result<i64, AppError> {
        self.rides.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PaymentMethod, PaymentStatus, VehicleType};
    use crate::domain::repositories::{
        MockDriverRepository, MockRideRepository, MockUserRepository,
    };
    use chrono::Utc;

    type TestService = RideService<MockRideRepository, MockUserRepository, MockDriverRepository>;

    fn service(
        rides: MockRideRepository,
        users: MockUserRepository,
        drivers: MockDriverRepository,
    ) -> TestService {
        RideService::new(Arc::new(rides), Arc::new(users), Arc::new(drivers))
    }

    fn new_ride() -> NewRide {
        NewRide {
            passenger_id: 1,
            driver_id: 2,
            vehicle_type: VehicleType::Sedan,
            pickup_address: "1 Main St".to_string(),
            pickup_latitude: 40.7,
            pickup_longitude: -74.0,
            dropoff_address: "99 Broadway".to_string(),
            dropoff_latitude: 40.8,
            dropoff_longitude: -73.9,
            status: RideStatus::Requested,
            actual_fare: None,
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Pending,
            cancellation_reason: None,
            customer_rating: None,
            customer_feedback: None,
            driver_rating: None,
            driver_feedback: None,
            requested_at: None,
            accepted_at: None,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
            created_at: None,
        }
    }

    fn create_test_ride(id: i64, passenger_id: i64, driver_id: i64) -> Ride {
        Ride {
            id,
            passenger_id,
            driver_id,
            vehicle_type: VehicleType::Sedan,
            pickup_address: "1 Main St".to_string(),
            pickup_latitude: 40.7,
            pickup_longitude: -74.0,
            dropoff_address: "99 Broadway".to_string(),
            dropoff_latitude: 40.8,
            dropoff_longitude: -73.9,
            status: RideStatus::Requested,
            actual_fare: None,
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Pending,
            cancellation_reason: None,
            customer_rating: None,
            customer_feedback: None,
            driver_rating: None,
            driver_feedback: None,
            requested_at: None,
            accepted_at: None,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_ride_success() {
        let mut rides = MockRideRepository::new();
        let mut users = MockUserRepository::new();
        let mut drivers = MockDriverRepository::new();

        users
            .expect_exists()
            .withf(|id| *id == 1)
            .returning(|_| Ok(true));
        drivers
            .expect_exists()
            .withf(|id| *id == 2)
            .returning(|_| Ok(true));
        rides
            .expect_create()
            .times(1)
            .returning(|r| Ok(create_test_ride(10, r.passenger_id, r.driver_id)));

        let ride = service(rides, users, drivers)
            .create_ride(new_ride())
            .await
            .unwrap();
        assert_eq!(ride.id, 10);
        assert_eq!(ride.passenger_id, 1);
    }

    #[tokio::test]
    async fn test_create_ride_missing_passenger() {
        let mut rides = MockRideRepository::new();
        let mut users = MockUserRepository::new();
        let mut drivers = MockDriverRepository::new();

        users.expect_exists().returning(|_| Ok(false));
        drivers.expect_exists().never();
        rides.expect_create().never();

        let err = service(rides, users, drivers)
            .create_ride(new_ride())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "not_found: User not found");
    }

    #[tokio::test]
    async fn test_create_ride_missing_driver() {
        let mut rides = MockRideRepository::new();
        let mut users = MockUserRepository::new();
        let mut drivers = MockDriverRepository::new();

        users.expect_exists().returning(|_| Ok(true));
        drivers.expect_exists().returning(|_| Ok(false));
        rides.expect_create().never();

        let err = service(rides, users, drivers)
            .create_ride(new_ride())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "not_found: Driver not found");
    }

    #[tokio::test]
    async fn test_rides_by_driver_empty_is_not_found() {
        let mut rides = MockRideRepository::new();
        rides.expect_list_by_driver().returning(|_| Ok(vec![]));

        let result = service(rides, MockUserRepository::new(), MockDriverRepository::new())
            .rides_by_driver(2)
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_rides_by_passenger_returns_rides() {
        let mut rides = MockRideRepository::new();
        rides
            .expect_list_by_passenger()
            .withf(|id| *id == 1)
            .returning(|id| Ok(vec![create_test_ride(1, id, 2), create_test_ride(2, id, 3)]));

        let result = service(rides, MockUserRepository::new(), MockDriverRepository::new())
            .rides_by_passenger(1)
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_history_filters_completed_and_may_be_empty() {
        let mut rides = MockRideRepository::new();
        rides
            .expect_list_by_passenger_and_status()
            .withf(|_, status| *status == RideStatus::Completed)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let result = service(rides, MockUserRepository::new(), MockDriverRepository::new())
            .passenger_history(1)
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_complaints_query_uses_threshold_and_keyword() {
        let mut rides = MockRideRepository::new();
        rides
            .expect_list_with_complaints()
            .withf(|rating, keyword| *rating == 3 && keyword == "complaint")
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let result = service(rides, MockUserRepository::new(), MockDriverRepository::new())
            .rides_with_complaints()
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_ride_same_associations_skip_lookups() {
        let mut rides = MockRideRepository::new();
        let mut users = MockUserRepository::new();
        let mut drivers = MockDriverRepository::new();

        rides
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_ride(id, 1, 2))));
        users.expect_exists().never();
        drivers.expect_exists().never();
        rides
            .expect_update()
            .withf(|r| r.status == RideStatus::Completed && r.pickup_address == "1 Main St")
            .times(1)
            .returning(|r| Ok(r.clone()));

        let patch = RidePatch {
            passenger_id: Some(1),
            driver_id: Some(2),
            status: Some(RideStatus::Completed),
            actual_fare: Some(18.25),
            ..Default::default()
        };

        let updated = service(rides, users, drivers)
            .update_ride(5, patch)
            .await
            .unwrap();
        assert_eq!(updated.actual_fare, Some(18.25));
    }

    #[tokio::test]
    async fn test_update_ride_reassigns_driver_after_validation() {
        let mut rides = MockRideRepository::new();
        let mut drivers = MockDriverRepository::new();

        rides
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_ride(id, 1, 2))));
        drivers
            .expect_exists()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(true));
        rides
            .expect_update()
            .withf(|r| r.driver_id == 7)
            .times(1)
            .returning(|r| Ok(r.clone()));

        let patch = RidePatch {
            driver_id: Some(7),
            ..Default::default()
        };

        let updated = service(rides, MockUserRepository::new(), drivers)
            .update_ride(5, patch)
            .await
            .unwrap();
        assert_eq!(updated.driver_id, 7);
    }

    #[tokio::test]
    async fn test_update_ride_unknown_new_passenger() {
        let mut rides = MockRideRepository::new();
        let mut users = MockUserRepository::new();

        rides
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_ride(id, 1, 2))));
        users.expect_exists().returning(|_| Ok(false));
        rides.expect_update().never();

        let patch = RidePatch {
            passenger_id: Some(99),
            ..Default::default()
        };

        let result = service(rides, users, MockDriverRepository::new())
            .update_ride(5, patch)
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_ride_not_found_issues_no_delete() {
        let mut rides = MockRideRepository::new();
        rides.expect_exists().returning(|_| Ok(false));
        rides.expect_delete().never();

        let result = service(rides, MockUserRepository::new(), MockDriverRepository::new())
            .delete_ride(1)
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
