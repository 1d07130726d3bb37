//! Driver profile entity: the one-to-one extension of a user into a ride provider.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Admin-controlled verification state.
///
/// New profiles start as `Pending`; admins move them to `Verified` or `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "driver_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Pending,
    Verified,
    Rejected,
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 3] = [
        DriverStatus::Pending,
        DriverStatus::Verified,
        DriverStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Pending => "PENDING",
            DriverStatus::Verified => "VERIFIED",
            DriverStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "vehicle_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Sedan,
    Hatchback,
    Suv,
    Auto,
}

/// Owning user's identity, denormalized into every driver read.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOwner {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl DriverOwner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct Driver {
    pub id: i64,
    pub owner: DriverOwner,
    pub license_number: String,
    pub vehicle_type: VehicleType,
    pub vehicle_model: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_image: Option<String>,
    pub license_image: Option<String>,
    pub license_expiry_date: NaiveDate,
    pub verification_status: DriverStatus,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub is_available: bool,
    pub is_online: bool,
    pub rating: f64,
    pub total_earnings: f64,
    pub total_rides: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration input for a new driver profile.
///
/// Status, availability and the earnings summary are not part of the input;
/// see [`NewDriver::from_registration`].
#[derive(Debug, Clone)]
pub struct DriverRegistration {
    pub user_id: i64,
    pub license_number: String,
    pub vehicle_type: VehicleType,
    pub vehicle_model: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_image: Option<String>,
    pub license_image: Option<String>,
    pub license_expiry_date: NaiveDate,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
}

/// Row to insert into `drivers`.
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub user_id: i64,
    pub license_number: String,
    pub vehicle_type: VehicleType,
    pub vehicle_model: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_image: Option<String>,
    pub license_image: Option<String>,
    pub license_expiry_date: NaiveDate,
    pub verification_status: DriverStatus,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub is_available: bool,
    pub is_online: bool,
    pub rating: f64,
    pub total_earnings: f64,
    pub total_rides: i32,
}

impl NewDriver {
    /// Applies registration defaults: pending, offline, unavailable, zero
    /// rating, earnings and rides.
    pub fn from_registration(reg: DriverRegistration) -> Self {
        Self {
            user_id: reg.user_id,
            license_number: reg.license_number,
            vehicle_type: reg.vehicle_type,
            vehicle_model: reg.vehicle_model,
            vehicle_color: reg.vehicle_color,
            vehicle_number: reg.vehicle_number,
            vehicle_image: reg.vehicle_image,
            license_image: reg.license_image,
            license_expiry_date: reg.license_expiry_date,
            verification_status: DriverStatus::Pending,
            current_latitude: reg.current_latitude,
            current_longitude: reg.current_longitude,
            is_available: false,
            is_online: false,
            rating: 0.0,
            total_earnings: 0.0,
            total_rides: 0,
        }
    }
}

/// Partial update for a driver profile. `None` leaves the field untouched.
///
/// `user_id` is carried only so the service can reject ownership changes;
/// [`DriverPatch::apply_to`] never reassigns the owner. Verification status is
/// deliberately absent: it changes through verify/reject only.
#[derive(Debug, Clone, Default)]
pub struct DriverPatch {
    pub user_id: Option<i64>,
    pub license_number: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub vehicle_model: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_image: Option<String>,
    pub license_image: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub current_latitude: Option<f64>,
    pub current_longitude: Option<f64>,
    pub is_available: Option<bool>,
    pub is_online: Option<bool>,
    pub rating: Option<f64>,
    pub total_earnings: Option<f64>,
    pub total_rides: Option<i32>,
}

impl DriverPatch {
    pub fn apply_to(self, driver: &mut Driver) {
        let DriverPatch {
            user_id: _,
            license_number,
            vehicle_type,
            vehicle_model,
            vehicle_color,
            vehicle_number,
            vehicle_image,
            license_image,
            license_expiry_date,
            current_latitude,
            current_longitude,
            is_available,
            is_online,
            rating,
            total_earnings,
            total_rides,
        } = self;

        if let Some(v) = license_number {
            driver.license_number = v;
        }
        if let Some(v) = vehicle_type {
            driver.vehicle_type = v;
        }
        if vehicle_model.is_some() {
            driver.vehicle_model = vehicle_model;
        }
        if vehicle_color.is_some() {
            driver.vehicle_color = vehicle_color;
        }
        if vehicle_number.is_some() {
            driver.vehicle_number = vehicle_number;
        }
        if vehicle_image.is_some() {
            driver.vehicle_image = vehicle_image;
        }
        if license_image.is_some() {
            driver.license_image = license_image;
        }
        if let Some(v) = license_expiry_date {
            driver.license_expiry_date = v;
        }
        if current_latitude.is_some() {
            driver.current_latitude = current_latitude;
        }
        if current_longitude.is_some() {
            driver.current_longitude = current_longitude;
        }
        if let Some(v) = is_available {
            driver.is_available = v;
        }
        if let Some(v) = is_online {
            driver.is_online = v;
        }
        if let Some(v) = rating {
            driver.rating = v;
        }
        if let Some(v) = total_earnings {
            driver.total_earnings = v;
        }
        if let Some(v) = total_rides {
            driver.total_rides = v;
        }
    }
}
