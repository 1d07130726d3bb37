//! DTOs for ride ledger endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{
    NewRide, PaymentMethod, PaymentStatus, Ride, RidePatch, RideStatus, VehicleType,
};

/// Request body for `POST /api/rides`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRideRequest {
    pub passenger_id: i64,
    pub driver_id: i64,
    pub vehicle_type: VehicleType,

    #[validate(
        custom(function = "not_blank", message = "Pickup address is mandatory"),
        length(max = 255)
    )]
    pub pickup_address: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Pickup latitude must be between -90 and 90"))]
    pub pickup_latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Pickup longitude must be between -180 and 180"
    ))]
    pub pickup_longitude: f64,

    #[validate(
        custom(function = "not_blank", message = "Dropoff address is mandatory"),
        length(max = 255)
    )]
    pub dropoff_address: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Dropoff latitude must be between -90 and 90"))]
    pub dropoff_latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Dropoff longitude must be between -180 and 180"
    ))]
    pub dropoff_longitude: f64,

    pub status: RideStatus,

    #[validate(range(min = 0.0, message = "Actual fare must be a positive number or zero"))]
    pub actual_fare: Option<f64>,

    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,

    #[validate(length(max = 255))]
    pub cancellation_reason: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Customer rating must be between 1 and 5"))]
    pub customer_rating: Option<i32>,

    #[validate(length(max = 255))]
    pub customer_feedback: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Driver rating must be between 1 and 5"))]
    pub driver_rating: Option<i32>,

    #[validate(length(max = 255))]
    pub driver_feedback: Option<String>,

    pub requested_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<CreateRideRequest> for NewRide {
    fn from(req: CreateRideRequest) -> Self {
        NewRide {
            passenger_id: req.passenger_id,
            driver_id: req.driver_id,
            vehicle_type: req.vehicle_type,
            pickup_address: req.pickup_address,
            pickup_latitude: req.pickup_latitude,
            pickup_longitude: req.pickup_longitude,
            dropoff_address: req.dropoff_address,
            dropoff_latitude: req.dropoff_latitude,
            dropoff_longitude: req.dropoff_longitude,
            status: req.status,
            actual_fare: req.actual_fare,
            payment_method: req.payment_method,
            payment_status: req.payment_status,
            cancellation_reason: req.cancellation_reason,
            customer_rating: req.customer_rating,
            customer_feedback: req.customer_feedback,
            driver_rating: req.driver_rating,
            driver_feedback: req.driver_feedback,
            requested_at: req.requested_at,
            accepted_at: req.accepted_at,
            started_at: req.started_at,
            completed_at: req.completed_at,
            cancelled_at: req.cancelled_at,
            created_at: req.created_at,
        }
    }
}

/// Request body for `PUT /api/rides/{id}`. Omitted fields keep their value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRideRequest {
    pub passenger_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub vehicle_type: Option<VehicleType>,

    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub pickup_address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub pickup_latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub pickup_longitude: Option<f64>,

    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub dropoff_address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub dropoff_latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub dropoff_longitude: Option<f64>,

    pub status: Option<RideStatus>,

    #[validate(range(min = 0.0))]
    pub actual_fare: Option<f64>,

    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,

    #[validate(length(max = 255))]
    pub cancellation_reason: Option<String>,

    #[validate(range(min = 1, max = 5))]
    pub customer_rating: Option<i32>,

    #[validate(length(max = 255))]
    pub customer_feedback: Option<String>,

    #[validate(range(min = 1, max = 5))]
    pub driver_rating: Option<i32>,

    #[validate(length(max = 255))]
    pub driver_feedback: Option<String>,

    pub requested_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<UpdateRideRequest> for RidePatch {
    fn from(req: UpdateRideRequest) -> Self {
        RidePatch {
            passenger_id: req.passenger_id,
            driver_id: req.driver_id,
            vehicle_type: req.vehicle_type,
            pickup_address: req.pickup_address,
            pickup_latitude: req.pickup_latitude,
            pickup_longitude: req.pickup_longitude,
            dropoff_address: req.dropoff_address,
            dropoff_latitude: req.dropoff_latitude,
            dropoff_longitude: req.dropoff_longitude,
            status: req.status,
            actual_fare: req.actual_fare,
            payment_method: req.payment_method,
            payment_status: req.payment_status,
            cancellation_reason: req.cancellation_reason,
            customer_rating: req.customer_rating,
            customer_feedback: req.customer_feedback,
            driver_rating: req.driver_rating,
            driver_feedback: req.driver_feedback,
            requested_at: req.requested_at,
            accepted_at: req.accepted_at,
            started_at: req.started_at,
            completed_at: req.completed_at,
            cancelled_at: req.cancelled_at,
            created_at: req.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideResponse {
    pub id: i64,
    pub passenger_id: i64,
    pub driver_id: i64,
    pub vehicle_type: VehicleType,
    pub pickup_address: String,
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
    pub dropoff_address: String,
    pub dropoff_latitude: f64,
    pub dropoff_longitude: f64,
    pub status: RideStatus,
    pub actual_fare: Option<f64>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub cancellation_reason: Option<String>,
    pub customer_rating: Option<i32>,
    pub customer_feedback: Option<String>,
    pub driver_rating: Option<i32>,
    pub driver_feedback: Option<String>,
    pub requested_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        RideResponse {
            id: ride.id,
            passenger_id: ride.passenger_id,
            driver_id: ride.driver_id,
            vehicle_type: ride.vehicle_type,
            pickup_address: ride.pickup_address,
            pickup_latitude: ride.pickup_latitude,
            pickup_longitude: ride.pickup_longitude,
            dropoff_address: ride.dropoff_address,
            dropoff_latitude: ride.dropoff_latitude,
            dropoff_longitude: ride.dropoff_longitude,
            status: ride.status,
            actual_fare: ride.actual_fare,
            payment_method: ride.payment_method,
            payment_status: ride.payment_status,
            cancellation_reason: ride.cancellation_reason,
            customer_rating: ride.customer_rating,
            customer_feedback: ride.customer_feedback,
            driver_rating: ride.driver_rating,
            driver_feedback: ride.driver_feedback,
            requested_at: ride.requested_at,
            accepted_at: ride.accepted_at,
            started_at: ride.started_at,
            completed_at: ride.completed_at,
            cancelled_at: ride.cancelled_at,
            created_at: ride.created_at,
        }
    }
}
