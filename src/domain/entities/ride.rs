//! Ride records linking a passenger to a driver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::driver::VehicleType;
use super::payment::{PaymentMethod, PaymentStatus};

/// Lifecycle of a ride.
///
/// REQUESTED → ACCEPTED → STARTED → COMPLETED, with CANCELLED reachable from
/// any of the first three. Transitions are recorded as given; nothing here
/// enforces ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "ride_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideStatus {
    Requested,
    Accepted,
    Started,
    Completed,
    Cancelled,
}

/// Rating below which a customer rating counts as a complaint.
pub const COMPLAINT_RATING_THRESHOLD: i32 = 3;

/// Feedback containing this word (any case) counts as a complaint.
pub const COMPLAINT_KEYWORD: &str = "complaint";

#[derive(Debug, Clone)]
pub struct Ride {
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

impl Ride {
    pub fn is_complaint(&self) -> bool {
        let low_rating = self
            .customer_rating
            .is_some_and(|r| r < COMPLAINT_RATING_THRESHOLD);
        let keyword = self
            .customer_feedback
            .as_deref()
            .is_some_and(|f| f.to_lowercase().contains(COMPLAINT_KEYWORD));
        low_rating || keyword
    }

    pub fn has_feedback(&self) -> bool {
        self.customer_feedback.is_some() || self.driver_feedback.is_some()
    }
}

/// Row to insert into `rides`. A missing `created_at` is stamped by the database.
#[derive(Debug, Clone)]
pub struct NewRide {
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
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial update for a ride.
///
/// `passenger_id` and `driver_id` are reassignments; the ride service checks
/// the new references exist before applying.
#[derive(Debug, Clone, Default)]
pub struct RidePatch {
    pub passenger_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub vehicle_type: Option<VehicleType>,
    pub pickup_address: Option<String>,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub dropoff_address: Option<String>,
    pub dropoff_latitude: Option<f64>,
    pub dropoff_longitude: Option<f64>,
    pub status: Option<RideStatus>,
    pub actual_fare: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
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
    pub created_at: Option<DateTime<Utc>>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn set_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

impl RidePatch {
    pub fn apply_to(self, ride: &mut Ride) {
        set(&mut ride.passenger_id, self.passenger_id);
        set(&mut ride.driver_id, self.driver_id);
        set(&mut ride.vehicle_type, self.vehicle_type);
        set(&mut ride.pickup_address, self.pickup_address);
        set(&mut ride.pickup_latitude, self.pickup_latitude);
        set(&mut ride.pickup_longitude, self.pickup_longitude);
        set(&mut ride.dropoff_address, self.dropoff_address);
        set(&mut ride.dropoff_latitude, self.dropoff_latitude);
        set(&mut ride.dropoff_longitude, self.dropoff_longitude);
        set(&mut ride.status, self.status);
        set_opt(&mut ride.actual_fare, self.actual_fare);
        set(&mut ride.payment_method, self.payment_method);
        set(&mut ride.payment_status, self.payment_status);
        set_opt(&mut ride.cancellation_reason, self.cancellation_reason);
        set_opt(&mut ride.customer_rating, self.customer_rating);
        set_opt(&mut ride.customer_feedback, self.customer_feedback);
        set_opt(&mut ride.driver_rating, self.driver_rating);
        set_opt(&mut ride.driver_feedback, self.driver_feedback);
        set_opt(&mut ride.requested_at, self.requested_at);
        set_opt(&mut ride.accepted_at, self.accepted_at);
        set_opt(&mut ride.started_at, self.started_at);
        set_opt(&mut ride.completed_at, self.completed_at);
        set_opt(&mut ride.cancelled_at, self.cancelled_at);
        set(&mut ride.created_at, self.created_at);
    }
}
